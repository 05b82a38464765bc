//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application-level
//! configuration values before any use case sees them.

mod model;
mod pipeline;
mod rate_limit;
mod storage;

pub use model::FileModelConfig;
pub use pipeline::FilePipelineConfig;
pub use rate_limit::FileRateLimitConfig;
pub use storage::{FileCacheConfig, FileStorageConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("model.name cannot be empty")]
    EmptyModelName,

    #[error("model.api_key_env cannot be empty")]
    EmptyApiKeyEnv,

    #[error("model.timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model selection and endpoint
    pub model: FileModelConfig,
    /// Quality thresholds, refinement budget and stage toggles
    pub pipeline: FilePipelineConfig,
    /// Throttle and retry settings for model calls
    pub rate_limit: FileRateLimitConfig,
    /// Response cache
    pub cache: FileCacheConfig,
    /// Database and log locations
    pub storage: FileStorageConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every detected issue.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.model.name.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self.model.api_key_env.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyApiKeyEnv);
        }
        if self.model.timeout_secs == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        let unit_fields = [
            ("model.temperature", f64::from(self.model.temperature)),
            ("pipeline.min_quality_score", self.pipeline.min_quality_score),
            ("pipeline.refinement_threshold", self.pipeline.refinement_threshold),
            ("pipeline.target_success_rate", self.pipeline.target_success_rate),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                issues.push(ConfigValidationError::OutOfRange { field, value });
            }
        }

        issues
    }
}
