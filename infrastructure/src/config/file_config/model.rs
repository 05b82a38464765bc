//! Model configuration from TOML (`[model]` section)

use curator_application::ModelSettings;
use curator_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw model configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Text model identifier
    pub name: String,
    /// Model used for poster, room and exhibit images
    pub image_model: String,
    /// Default sampling temperature
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub base_url: String,
    /// HTTP timeout per request
    pub timeout_secs: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: Model::default().to_string(),
            image_model: Model::Gemini25FlashImage.to_string(),
            temperature: 0.8,
            max_output_tokens: 8192,
            api_key_env: "GOOGLE_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 120,
        }
    }
}

impl FileModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn to_model_settings(&self) -> ModelSettings {
        let Ok(model) = self.name.parse::<Model>();
        let Ok(image_model) = self.image_model.parse::<Model>();
        ModelSettings {
            model,
            temperature: self.temperature.clamp(0.0, 1.0),
            max_output_tokens: self.max_output_tokens,
            image_model,
        }
    }
}
