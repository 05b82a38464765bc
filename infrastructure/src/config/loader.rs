//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const APP_DIR: &str = "museum-curator";
const PROJECT_FILE: &str = "curator.toml";
const ENV_PREFIX: &str = "CURATOR_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables `CURATOR_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./curator.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/museum-curator/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/museum-curator/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let overrides: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if overrides.is_empty() {
            println!("  [     ] Env:     {ENV_PREFIX}<SECTION>__<KEY>");
        } else {
            println!("  [FOUND] Env:     {}", overrides.join(", "));
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{mark}] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{PROJECT_FILE}");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
