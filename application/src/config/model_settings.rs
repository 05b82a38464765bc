//! Model identifier and generation defaults.

use curator_domain::Model;

/// Default sampling parameters for text generation
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: Model,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Model used for image requests
    pub image_model: Model,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: 0.8,
            max_output_tokens: 8192,
            image_model: Model::Gemini25FlashImage,
        }
    }
}

impl ModelSettings {
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
