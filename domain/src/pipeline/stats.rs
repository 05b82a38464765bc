//! Agent execution statistics and run-wide metrics.

use crate::evaluation::report::EvaluationReport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Point-in-time view of one agent's counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub name: String,
    pub executions: u64,
    pub successes: u64,
    pub total_duration_secs: f64,
}

impl AgentStats {
    pub fn new(name: impl Into<String>, executions: u64, successes: u64, total: Duration) -> Self {
        Self {
            name: name.into(),
            executions,
            successes,
            total_duration_secs: total.as_secs_f64(),
        }
    }

    /// Successes over executions; 0.0 before the first execution.
    pub fn success_rate(&self) -> f64 {
        if self.executions == 0 {
            0.0
        } else {
            self.successes as f64 / self.executions as f64
        }
    }

    pub fn avg_duration_secs(&self) -> f64 {
        if self.executions == 0 {
            0.0
        } else {
            self.total_duration_secs / self.executions as f64
        }
    }
}

/// Arithmetic mean of per-agent success rates.
///
/// Every agent weighs the same regardless of how often it ran; agents that
/// never ran contribute 0.0.
pub fn mean_success_rate(stats: &[AgentStats]) -> f64 {
    if stats.is_empty() {
        return 0.0;
    }
    stats.iter().map(AgentStats::success_rate).sum::<f64>() / stats.len() as f64
}

/// Aggregate statistics across an orchestrator's agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_executions: u64,
    pub total_successes: u64,
    /// Global successes over executions, unlike [`mean_success_rate`]
    pub overall_success_rate: f64,
    pub target_success_rate: f64,
    pub meets_target: bool,
    pub agent_stats: Vec<AgentStats>,
}

impl SystemStats {
    pub fn from_agents(agent_stats: Vec<AgentStats>, target_success_rate: f64) -> Self {
        let total_executions: u64 = agent_stats.iter().map(|s| s.executions).sum();
        let total_successes: u64 = agent_stats.iter().map(|s| s.successes).sum();
        let overall_success_rate = if total_executions == 0 {
            0.0
        } else {
            total_successes as f64 / total_executions as f64
        };
        Self {
            total_executions,
            total_successes,
            overall_success_rate,
            target_success_rate,
            meets_target: overall_success_rate >= target_success_rate,
            agent_stats,
        }
    }
}

/// Metrics for one completed pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub overall_quality_score: f64,
    pub completeness_score: f64,
    pub narrative_quality: f64,
    pub factual_quality: f64,
    pub cultural_sensitivity: f64,
    pub agent_success_rate: f64,
    pub total_duration_secs: f64,
    pub meets_quality_threshold: bool,
    pub refinement_iterations: usize,
    /// Isolated stages that fell back to defaults
    pub degraded_stages: Vec<String>,
}

impl RunMetrics {
    pub fn new(
        evaluation: &EvaluationReport,
        agent_stats: &[AgentStats],
        duration: Duration,
    ) -> Self {
        Self {
            overall_quality_score: evaluation.overall_score,
            completeness_score: evaluation.completeness_score,
            narrative_quality: evaluation.narrative_quality,
            factual_quality: evaluation.factual_quality,
            cultural_sensitivity: evaluation.cultural_sensitivity,
            agent_success_rate: mean_success_rate(agent_stats),
            total_duration_secs: duration.as_secs_f64(),
            meets_quality_threshold: evaluation.meets_threshold,
            refinement_iterations: 0,
            degraded_stages: Vec::new(),
        }
    }

    pub fn with_refinement_iterations(mut self, iterations: usize) -> Self {
        self.refinement_iterations = iterations;
        self
    }

    pub fn with_degraded_stages(mut self, stages: Vec<String>) -> Self {
        self.degraded_stages = stages;
        self
    }
}
