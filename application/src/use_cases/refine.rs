//! Refinement loop
//!
//! Drives an evaluated exhibition through evaluate → refine → re-evaluate
//! cycles until it clears the refinement threshold, the iteration budget
//! runs out, or a refinement pass changes nothing.

use super::generate_exhibition::GenerateExhibitionError;
use crate::agents::{EvaluatorAgent, RefinementAgent, RefinementRequest, TrackedAgent};
use crate::ports::event_logger::{EventLogger, RunEvent};
use crate::ports::progress::ProgressNotifier;
use curator_domain::{EvaluationReport, Exhibition, Stage};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// The exhibition and report the loop settled on
#[derive(Debug)]
pub struct RefinedExhibition {
    pub exhibition: Exhibition,
    /// Report of the final re-evaluation, or the input report when no
    /// refinement applied
    pub evaluation: EvaluationReport,
    /// Refinement passes that changed the exhibition
    pub iterations: usize,
}

pub struct RefinementController {
    evaluator: Arc<TrackedAgent<EvaluatorAgent>>,
    refiner: Arc<TrackedAgent<RefinementAgent>>,
    events: Arc<dyn EventLogger>,
    refinement_threshold: f64,
    max_loops: usize,
}

impl RefinementController {
    pub fn new(
        evaluator: Arc<TrackedAgent<EvaluatorAgent>>,
        refiner: Arc<TrackedAgent<RefinementAgent>>,
        events: Arc<dyn EventLogger>,
    ) -> Self {
        Self {
            evaluator,
            refiner,
            events,
            refinement_threshold: 0.80,
            max_loops: 3,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.refinement_threshold = threshold;
        self
    }

    pub fn with_max_loops(mut self, max_loops: usize) -> Self {
        self.max_loops = max_loops;
        self
    }

    pub fn needs_refinement(&self, evaluation: &EvaluationReport) -> bool {
        evaluation.overall_score < self.refinement_threshold
    }

    /// Refine until accepted.
    ///
    /// Every pass that changes the exhibition is followed by a fresh
    /// evaluation; the loop never trusts the refiner's own claim of
    /// improvement.
    pub async fn run(
        &self,
        mut exhibition: Exhibition,
        mut evaluation: EvaluationReport,
        progress: &dyn ProgressNotifier,
    ) -> Result<RefinedExhibition, GenerateExhibitionError> {
        let mut iterations = 0;

        while iterations < self.max_loops && self.needs_refinement(&evaluation) {
            info!(
                "Refinement loop {} (score {:.2} < {:.2})",
                iterations + 1,
                evaluation.overall_score,
                self.refinement_threshold
            );

            let outcome = self
                .refiner
                .execute(RefinementRequest {
                    exhibition,
                    evaluation: evaluation.clone(),
                })
                .await
                .map_err(|source| GenerateExhibitionError::stage(Stage::Refinement, source))?;
            exhibition = outcome.exhibition;

            if !outcome.refined {
                info!("Refinement made no change, accepting current exhibition");
                break;
            }
            iterations += 1;

            evaluation = self
                .evaluator
                .execute(exhibition.clone())
                .await
                .map_err(|source| GenerateExhibitionError::stage(Stage::Evaluation, source))?;

            self.events.log(RunEvent::new(
                "refinement_iteration",
                json!({
                    "iteration": iterations,
                    "overall_score": evaluation.overall_score,
                    "improvements": outcome.improvements,
                }),
            ));
            progress.on_refinement_iteration(iterations, evaluation.overall_score);
        }

        Ok(RefinedExhibition {
            exhibition,
            evaluation,
            iterations,
        })
    }
}
