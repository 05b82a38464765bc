//! Pipeline parameters: quality thresholds, refinement budget and stage toggles.

use serde::{Deserialize, Serialize};

/// Runtime-tunable parameters of the exhibition pipeline.
///
/// Two thresholds coexist on purpose: `min_quality_score` decides whether
/// an exhibition is accepted, `refinement_threshold` decides whether another
/// refinement pass is attempted. A run scoring between them is accepted
/// and still refined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Overall score at or above which an exhibition meets the threshold.
    pub min_quality_score: f64,
    /// Refinement continues while the overall score is below this.
    pub refinement_threshold: f64,
    /// Maximum refinement iterations per run.
    pub max_refinement_loops: usize,
    /// Aggregate agent success rate the system aims for.
    pub target_success_rate: f64,
    /// Run the image generation stage.
    pub enable_image_generation: bool,
    /// Upper bound on exhibits per room when choosing the room count.
    pub max_exhibits_per_room: usize,
    /// Maximum search results the research stage keeps.
    pub max_research_results: usize,
    /// Exhibits requested from the model.
    pub exhibits_per_run: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_quality_score: 0.70,
            refinement_threshold: 0.80,
            max_refinement_loops: 3,
            target_success_rate: 0.97,
            enable_image_generation: true,
            max_exhibits_per_room: 4,
            max_research_results: 15,
            exhibits_per_run: 8,
        }
    }
}

impl PipelineConfig {
    // ==================== Builder Methods ====================

    pub fn with_min_quality_score(mut self, score: f64) -> Self {
        self.min_quality_score = score;
        self
    }

    pub fn with_refinement_threshold(mut self, score: f64) -> Self {
        self.refinement_threshold = score;
        self
    }

    pub fn with_max_refinement_loops(mut self, loops: usize) -> Self {
        self.max_refinement_loops = loops;
        self
    }

    pub fn with_image_generation(mut self, enabled: bool) -> Self {
        self.enable_image_generation = enabled;
        self
    }

    pub fn with_target_success_rate(mut self, rate: f64) -> Self {
        self.target_success_rate = rate;
        self
    }
}
