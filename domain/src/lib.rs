//! Domain layer for museum-curator
//!
//! This crate contains the exhibition entities, the structured-output
//! parsers and the quality scoring rules. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Exhibition
//!
//! The artifact a pipeline run produces: themed [`Room`]s partitioning the
//! generated [`Exhibit`]s, curator notes, a [`TimelineEvent`] timeline and
//! optional enrichment records added by later stages.
//!
//! ## Evaluation
//!
//! [`EvaluationReport::evaluate`] scores an exhibition on structure,
//! narrative, facts and cultural sensitivity, weighted 0.30/0.25/0.20/0.25.
//!
//! ## Stages
//!
//! Every pipeline [`Stage`] declares whether its failure is critical or
//! isolated; isolated stages degrade to defaults via [`StageOutcome`].

pub mod core;
pub mod evaluation;
pub mod exhibition;
pub mod parsing;
pub mod pipeline;
pub mod prompt;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    model::Model,
    topic::{Topic, TopicRecord},
};
pub use evaluation::{
    facts::{FactReport, check_facts},
    report::EvaluationReport,
    sensitivity::{SensitivityReport, check_sensitivity},
    structure::{StructureReport, validate_structure},
};
pub use exhibition::{
    enrichment::{
        AccessibilityFeature, AccessibilityProfile, AudioStop, Challenge, Connection,
        ImageDescriptor, ImageStatus, InteractiveContent, MultimediaExperience,
        MultimediaSuggestion, Quiz, QuizQuestion, RoomQuestion, SemanticAnalysis,
        SensoryElements, VirtualTour,
    },
    entities::{Exhibit, Exhibition, Room, VisualReference},
    layout::{RoomPlan, assign_exhibits, parse_room_plan, room_count},
    timeline::{TimelineEvent, build_timeline, format_timeline},
};
pub use pipeline::{
    stage::{Criticality, Stage, StageOutcome},
    stats::{AgentStats, RunMetrics, SystemStats, mean_success_rate},
};
pub use prompt::PromptTemplate;
