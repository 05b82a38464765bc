//! The uniform agent execution envelope.
//!
//! Concrete agents implement [`Agent::process`]. The pipeline never calls
//! that directly: it wraps each agent in a [`TrackedAgent`] whose
//! [`execute`](TrackedAgent::execute) counts executions and successes,
//! times the call, and reports start/complete/error events.

use crate::ports::event_logger::{EventLogger, RunEvent};
use crate::ports::exhibition_store::StoreError;
use crate::ports::model_gateway::GatewayError;
use crate::ports::search::SearchError;
use async_trait::async_trait;
use curator_domain::core::string::truncate_with_ellipsis;
use curator_domain::{AgentStats, DomainError};
use serde_json::json;
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Characters of input/output kept in start/complete events
const PREVIEW_CHARS: usize = 500;

/// Errors an agent can fail with
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Model call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Storage failed: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Agent task aborted: {0}")]
    Aborted(String),
}

/// A named unit of pipeline work
#[async_trait]
pub trait Agent: Send + Sync {
    type Input: Debug + Send + 'static;
    type Output: Debug + Send + 'static;

    fn name(&self) -> &'static str;

    async fn process(&self, input: Self::Input) -> Result<Self::Output, AgentError>;
}

/// Per-agent execution counters
#[derive(Debug, Default)]
pub struct AgentCounters {
    executions: AtomicU64,
    successes: AtomicU64,
    total_nanos: AtomicU64,
}

impl AgentCounters {
    fn record_start(&self) {
        self.executions.fetch_add(1, Ordering::SeqCst);
    }

    fn record_end(&self, elapsed: Duration, success: bool) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.total_nanos.fetch_add(nanos, Ordering::SeqCst);
        if success {
            self.successes.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn snapshot(&self, name: &str) -> AgentStats {
        AgentStats::new(
            name,
            self.executions.load(Ordering::SeqCst),
            self.successes.load(Ordering::SeqCst),
            Duration::from_nanos(self.total_nanos.load(Ordering::SeqCst)),
        )
    }
}

/// Read access to an agent's statistics, independent of its concrete type
pub trait AgentStatsSource: Send + Sync {
    fn agent_name(&self) -> &'static str;
    fn stats(&self) -> AgentStats;

    fn success_rate(&self) -> f64 {
        self.stats().success_rate()
    }
}

/// An agent wrapped in the execution envelope
pub struct TrackedAgent<A: Agent> {
    agent: A,
    counters: AgentCounters,
    events: Arc<dyn EventLogger>,
}

impl<A: Agent> TrackedAgent<A> {
    pub fn new(agent: A, events: Arc<dyn EventLogger>) -> Self {
        Self {
            agent,
            counters: AgentCounters::default(),
            events,
        }
    }

    pub fn inner(&self) -> &A {
        &self.agent
    }

    /// Run the agent.
    ///
    /// The execution counter is bumped before the agent runs and the
    /// elapsed time is accumulated whatever the outcome. Only successful
    /// runs bump the success counter; errors are returned unchanged.
    pub async fn execute(&self, input: A::Input) -> Result<A::Output, AgentError> {
        let name = self.agent.name();
        self.counters.record_start();
        self.events.log(RunEvent::new(
            "agent_start",
            json!({
                "agent": name,
                "input_preview": preview(&input),
            }),
        ));
        debug!("Agent {} started", name);

        let start = Instant::now();
        let result = self.agent.process(input).await;
        let elapsed = start.elapsed();
        self.counters.record_end(elapsed, result.is_ok());

        match &result {
            Ok(output) => {
                debug!("Agent {} completed in {:.2}s", name, elapsed.as_secs_f64());
                self.events.log(RunEvent::new(
                    "agent_complete",
                    json!({
                        "agent": name,
                        "duration_seconds": elapsed.as_secs_f64(),
                        "output_preview": preview(output),
                    }),
                ));
            }
            Err(e) => {
                warn!("Agent {} failed: {}", name, e);
                self.events.log(RunEvent::new(
                    "agent_error",
                    json!({
                        "agent": name,
                        "error": e.to_string(),
                    }),
                ));
            }
        }
        result
    }
}

impl<A: Agent> AgentStatsSource for TrackedAgent<A> {
    fn agent_name(&self) -> &'static str {
        self.agent.name()
    }

    fn stats(&self) -> AgentStats {
        self.counters.snapshot(self.agent.name())
    }
}

fn preview(value: &impl Debug) -> String {
    truncate_with_ellipsis(&format!("{:?}", value), PREVIEW_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::event_logger::NoEventLogger;
    use std::sync::Mutex;

    /// Fails on odd inputs
    struct Parity;

    #[async_trait]
    impl Agent for Parity {
        type Input = u32;
        type Output = u32;

        fn name(&self) -> &'static str {
            "ParityAgent"
        }

        async fn process(&self, input: u32) -> Result<u32, AgentError> {
            if input % 2 == 0 {
                Ok(input / 2)
            } else {
                Err(AgentError::InvalidInput(format!("{} is odd", input)))
            }
        }
    }

    #[derive(Default)]
    struct RecordingLogger(Mutex<Vec<(&'static str, serde_json::Value)>>);

    impl EventLogger for RecordingLogger {
        fn log(&self, event: RunEvent) {
            self.0.lock().unwrap().push((event.event_type, event.payload));
        }
    }

    #[tokio::test]
    async fn test_zero_executions_rate_is_zero() {
        let agent = TrackedAgent::new(Parity, Arc::new(NoEventLogger));
        let stats = agent.stats();
        assert_eq!(stats.executions, 0);
        assert_eq!(agent.success_rate(), 0.0);
    }

    #[tokio::test]
    async fn test_success_rate_tracks_outcomes() {
        let agent = TrackedAgent::new(Parity, Arc::new(NoEventLogger));
        for input in [2, 4, 5, 6, 7] {
            let _ = agent.execute(input).await;
        }
        let stats = agent.stats();
        assert_eq!(stats.executions, 5);
        assert_eq!(stats.successes, 3);
        assert!(stats.successes <= stats.executions);
        assert_eq!(agent.success_rate(), 3.0 / 5.0);
    }

    #[tokio::test]
    async fn test_error_propagates_unchanged() {
        let agent = TrackedAgent::new(Parity, Arc::new(NoEventLogger));
        let err = agent.execute(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: 3 is odd");
        assert_eq!(agent.execute(8).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_events_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let agent = TrackedAgent::new(Parity, logger.clone());
        agent.execute(2).await.unwrap();
        let _ = agent.execute(1).await;

        let events = logger.0.lock().unwrap();
        let types: Vec<&str> = events.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            vec!["agent_start", "agent_complete", "agent_start", "agent_error"]
        );
        assert_eq!(events[0].1["agent"], "ParityAgent");
        assert_eq!(events[3].1["error"], "Invalid input: 1 is odd");
    }

    #[test]
    fn test_preview_truncated() {
        let long = "x".repeat(2000);
        assert_eq!(preview(&long).len(), PREVIEW_CHARS + 3);
    }
}
