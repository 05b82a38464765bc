//! Pipeline configuration from TOML (`[pipeline]` section)

use curator_application::PipelineConfig;
use serde::{Deserialize, Serialize};

/// Raw pipeline configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    pub min_quality_score: f64,
    pub refinement_threshold: f64,
    pub max_refinement_loops: usize,
    pub target_success_rate: f64,
    pub enable_image_generation: bool,
    pub max_exhibits_per_room: usize,
    pub max_research_results: usize,
    pub exhibits_per_run: usize,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        let defaults = PipelineConfig::default();
        Self {
            min_quality_score: defaults.min_quality_score,
            refinement_threshold: defaults.refinement_threshold,
            max_refinement_loops: defaults.max_refinement_loops,
            target_success_rate: defaults.target_success_rate,
            enable_image_generation: defaults.enable_image_generation,
            max_exhibits_per_room: defaults.max_exhibits_per_room,
            max_research_results: defaults.max_research_results,
            exhibits_per_run: defaults.exhibits_per_run,
        }
    }
}

impl FilePipelineConfig {
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            min_quality_score: self.min_quality_score,
            refinement_threshold: self.refinement_threshold,
            max_refinement_loops: self.max_refinement_loops,
            target_success_rate: self.target_success_rate,
            enable_image_generation: self.enable_image_generation,
            max_exhibits_per_room: self.max_exhibits_per_room.max(1),
            max_research_results: self.max_research_results,
            exhibits_per_run: self.exhibits_per_run.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application() {
        assert_eq!(
            FilePipelineConfig::default().to_pipeline_config(),
            PipelineConfig::default()
        );
    }

    #[test]
    fn test_partial_section() {
        let toml_str = r#"
[pipeline]
max_refinement_loops = 1
enable_image_generation = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let pipeline = config.pipeline.to_pipeline_config();
        assert_eq!(pipeline.max_refinement_loops, 1);
        assert!(!pipeline.enable_image_generation);
        assert_eq!(pipeline.refinement_threshold, 0.80);
    }
}
