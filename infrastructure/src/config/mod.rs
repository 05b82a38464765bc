//! Configuration file loading for museum-curator
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `CURATOR_`
//! 2. `--config <path>` specified file
//! 3. Project root: `./curator.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/museum-curator/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCacheConfig, FileConfig, FileModelConfig, FilePipelineConfig,
    FileRateLimitConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
