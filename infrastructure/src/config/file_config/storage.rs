//! Storage and cache configuration from TOML (`[storage]`, `[cache]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// SQLite database holding finished exhibitions
    pub database_path: PathBuf,
    /// Directory for diagnostic logs and run event files
    pub logs_dir: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/exhibitions.db"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

/// Raw response cache configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Response lifetime; 0 disables the cache
    pub ttl_secs: u64,
}

impl FileCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
