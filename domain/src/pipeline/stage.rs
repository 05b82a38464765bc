//! Pipeline stage declarations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a stage failure aborts the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    /// Failure propagates and the run yields no exhibition
    Critical,
    /// Failure is logged and replaced with a safe default
    Isolated,
}

/// One step of the fixed exhibition pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    TopicIntake,
    Research,
    ExhibitGeneration,
    ExhibitionDesign,
    Narrative,
    VisualContext,
    Timeline,
    SemanticAnalysis,
    InteractiveGuide,
    MultimediaCuration,
    Accessibility,
    ImageGeneration,
    Evaluation,
    Refinement,
    Storage,
}

impl Stage {
    pub const ALL: [Stage; 15] = [
        Stage::TopicIntake,
        Stage::Research,
        Stage::ExhibitGeneration,
        Stage::ExhibitionDesign,
        Stage::Narrative,
        Stage::VisualContext,
        Stage::Timeline,
        Stage::SemanticAnalysis,
        Stage::InteractiveGuide,
        Stage::MultimediaCuration,
        Stage::Accessibility,
        Stage::ImageGeneration,
        Stage::Evaluation,
        Stage::Refinement,
        Stage::Storage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::TopicIntake => "topic_intake",
            Stage::Research => "research",
            Stage::ExhibitGeneration => "exhibit_generation",
            Stage::ExhibitionDesign => "exhibition_design",
            Stage::Narrative => "narrative",
            Stage::VisualContext => "visual_context",
            Stage::Timeline => "timeline",
            Stage::SemanticAnalysis => "semantic_analysis",
            Stage::InteractiveGuide => "interactive_guide",
            Stage::MultimediaCuration => "multimedia_curation",
            Stage::Accessibility => "accessibility",
            Stage::ImageGeneration => "image_generation",
            Stage::Evaluation => "evaluation",
            Stage::Refinement => "refinement",
            Stage::Storage => "storage",
        }
    }

    /// Human-readable label for progress output
    pub fn label(&self) -> &'static str {
        match self {
            Stage::TopicIntake => "Analyzing topic",
            Stage::Research => "Researching",
            Stage::ExhibitGeneration => "Generating exhibits",
            Stage::ExhibitionDesign => "Designing rooms",
            Stage::Narrative => "Writing narrative",
            Stage::VisualContext => "Gathering visual context",
            Stage::Timeline => "Building timeline",
            Stage::SemanticAnalysis => "Analyzing semantics",
            Stage::InteractiveGuide => "Creating interactive guide",
            Stage::MultimediaCuration => "Curating multimedia",
            Stage::Accessibility => "Adding accessibility",
            Stage::ImageGeneration => "Generating images",
            Stage::Evaluation => "Evaluating quality",
            Stage::Refinement => "Refining",
            Stage::Storage => "Storing exhibition",
        }
    }

    /// Static failure policy of this stage.
    pub fn criticality(&self) -> Criticality {
        match self {
            Stage::SemanticAnalysis | Stage::InteractiveGuide | Stage::ImageGeneration => {
                Criticality::Isolated
            }
            _ => Criticality::Critical,
        }
    }

    pub fn is_isolated(&self) -> bool {
        self.criticality() == Criticality::Isolated
    }

    /// 1-based position in the pipeline
    pub fn number(&self) -> usize {
        Stage::ALL
            .iter()
            .position(|s| s == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of running a stage that may degrade
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    Completed(T),
    /// The stage failed; `value` is the safe default standing in for it
    Degraded { value: T, error: String },
}

impl<T> StageOutcome<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutcome::Degraded { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StageOutcome::Completed(_) => None,
            StageOutcome::Degraded { error, .. } => Some(error),
        }
    }

    pub fn into_value(self) -> T {
        match self {
            StageOutcome::Completed(value) | StageOutcome::Degraded { value, .. } => value,
        }
    }
}
