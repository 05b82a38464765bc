//! Port for structured run event logging.
//!
//! Defines the [`EventLogger`] trait for recording pipeline events (agent
//! starts and completions, degraded stages, refinement iterations, metrics)
//! to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the run in
//! a machine-readable format (JSONL).

use serde_json::Value;

/// A structured run event for logging.
///
/// Each event has a type string and a JSON payload containing event-specific
/// fields. Adapters add the timestamp when writing.
pub struct RunEvent {
    /// Event type identifier (e.g., "agent_start", "stage_degraded", "metrics").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging run events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures never
/// disturb the pipeline.
pub trait EventLogger: Send + Sync {
    /// Record a run event.
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEventLogger;

impl EventLogger for NoEventLogger {
    fn log(&self, _event: RunEvent) {}
}
