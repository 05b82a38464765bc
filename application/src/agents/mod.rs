//! Pipeline agents
//!
//! Each agent is one named unit of pipeline work behind the uniform
//! [`Agent`] contract. The orchestrator runs them inside a
//! [`TrackedAgent`] envelope that keeps per-agent statistics.

pub mod accessibility;
pub mod envelope;
pub mod evaluator;
pub mod exhibit_generator;
pub mod exhibition_designer;
pub mod image_generator;
pub mod interactive_guide;
pub mod memory_bank;
pub mod multimedia_curator;
pub mod narrative;
pub mod refinement;
pub mod research;
pub mod semantic_analyzer;
pub mod topic_intake;
pub mod visual_context;

pub use accessibility::AccessibilityAgent;
pub use envelope::{Agent, AgentCounters, AgentError, AgentStatsSource, TrackedAgent};
pub use evaluator::EvaluatorAgent;
pub use exhibit_generator::ExhibitGeneratorAgent;
pub use exhibition_designer::{DesignRequest, ExhibitionDesignerAgent};
pub use image_generator::ImageGeneratorAgent;
pub use interactive_guide::InteractiveGuideAgent;
pub use memory_bank::{MemoryBankAgent, StoreRequest};
pub use multimedia_curator::MultimediaCuratorAgent;
pub use narrative::NarrativeAgent;
pub use refinement::{RefinementAgent, RefinementOutcome, RefinementRequest};
pub use research::{ResearchAgent, ResearchBrief};
pub use semantic_analyzer::{SemanticAnalyzerAgent, SemanticRequest};
pub use topic_intake::TopicIntakeAgent;
pub use visual_context::VisualContextAgent;
