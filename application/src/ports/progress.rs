//! Progress notification port
//!
//! Defines the interface for reporting progress during a pipeline run.

use curator_domain::Stage;

/// How a stage ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Completed,
    /// An isolated stage failed and was replaced with its default
    Degraded,
    Failed,
}

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage);

    /// Called when a stage ends
    fn on_stage_complete(&self, stage: Stage, status: StageStatus);

    /// Called after each refinement iteration is re-evaluated
    fn on_refinement_iteration(&self, _iteration: usize, _overall_score: f64) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage) {}
    fn on_stage_complete(&self, _stage: Stage, _status: StageStatus) {}
}
