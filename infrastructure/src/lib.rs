//! Infrastructure layer for museum-curator
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod search;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileCacheConfig, FileConfig, FileModelConfig,
    FilePipelineConfig, FileRateLimitConfig, FileStorageConfig,
};
pub use gemini::GeminiGateway;
pub use logging::JsonlEventLogger;
pub use search::OfflineSearch;
pub use storage::SqliteExhibitionStore;
