//! Application layer for museum-curator
//!
//! This crate contains the pipeline use case, the agents it runs, the
//! model client adapter, port definitions and application configuration.
//! It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod model_client;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use agents::{Agent, AgentError, AgentStatsSource, TrackedAgent};
pub use config::{ModelSettings, PipelineConfig, RetryPolicy};
pub use model_client::ModelClient;
pub use ports::{
    event_logger::{EventLogger, NoEventLogger, RunEvent},
    exhibition_store::{ExhibitionStore, ExhibitionSummary, StoreError, StoredExhibition},
    model_gateway::{GatewayError, GenerationOptions, ImagePayload, ModelGateway},
    progress::{NoProgress, ProgressNotifier, StageStatus},
    search::{SearchError, SearchPort, SearchResult},
};
pub use use_cases::generate_exhibition::{
    ExhibitionRun, GenerateExhibitionError, GenerateExhibitionUseCase,
};
pub use use_cases::refine::{RefinedExhibition, RefinementController};
