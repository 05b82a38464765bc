//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`PipelineConfig`]: quality thresholds, refinement budget, stage toggles
//! - [`RetryPolicy`]: inter-call delay and backoff for model calls
//! - [`ModelSettings`]: model identifier and generation defaults

pub mod model_settings;
pub mod pipeline_config;
pub mod retry_policy;

pub use model_settings::ModelSettings;
pub use pipeline_config::PipelineConfig;
pub use retry_policy::RetryPolicy;
