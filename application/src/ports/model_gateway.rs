//! Model gateway port
//!
//! Defines the interface for calling the generative model service.

use async_trait::async_trait;
use curator_domain::Model;
use thiserror::Error;

/// Errors that can occur during model gateway operations
///
/// Rate-limit failures are a distinct variant so the model client can back
/// off harder for them than for other transient errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GatewayError::RateLimited(_))
    }

    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            GatewayError::InvalidRequest(_)
                | GatewayError::MissingApiKey(_)
                | GatewayError::ModelNotAvailable(_)
        )
    }
}

/// Sampling parameters for one text generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Result of an image request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Raw image bytes returned inline by the service
    Inline { mime_type: String, data: Vec<u8> },
    /// The service produced no image
    Unavailable { reason: String },
}

/// Gateway for model communication
///
/// This port defines how the application layer talks to the model service.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generate text for a prompt
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GatewayError>;

    /// Generate an image for a prompt
    ///
    /// Gateways without image support report the image as unavailable.
    async fn generate_image(&self, _model: &Model, _prompt: &str) -> Result<ImagePayload, GatewayError> {
        Ok(ImagePayload::Unavailable {
            reason: "image generation not supported by this gateway".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(GatewayError::RateLimited("429".into()).is_rate_limited());
        assert!(GatewayError::RateLimited("429".into()).is_retryable());
        assert!(GatewayError::Timeout.is_retryable());
        assert!(!GatewayError::MissingApiKey("GOOGLE_API_KEY".into()).is_retryable());
        assert!(!GatewayError::RequestFailed("500".into()).is_rate_limited());
    }
}
