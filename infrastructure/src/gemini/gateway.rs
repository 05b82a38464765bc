//! HTTP gateway implementation

use super::protocol::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use curator_application::{GatewayError, GenerationOptions, ImagePayload, ModelGateway};
use curator_domain::Model;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

/// Model gateway backed by the Gemini REST API
#[derive(Debug, Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiGateway {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Create from an API key with the default endpoint.
    pub fn new(api_key: &str) -> Result<Self, GatewayError> {
        Self::with_config(api_key, Self::DEFAULT_BASE_URL, Self::DEFAULT_TIMEOUT)
    }

    /// Create from the API key held in environment variable `var`.
    pub fn from_env(var: &str, base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::MissingApiKey(var.to_string()))?;
        Self::with_config(&api_key, base_url, timeout)
    }

    pub fn with_config(
        api_key: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| GatewayError::InvalidRequest("API key is not a valid header value".into()))?;
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::ConnectionError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &Model) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model.as_str())
    }

    async fn post(
        &self,
        model: &Model,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, GatewayError> {
        debug!("POST generateContent for {}", model);

        let response = self
            .client
            .post(self.endpoint(model))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let error = status_error(status, &body);
            warn!("Gemini request for {} failed: {}", model, error);
            return Err(error);
        }

        serde_json::from_str(&body)
            .map_err(|e| GatewayError::RequestFailed(format!("Malformed response body: {e}")))
    }
}

/// Map a transport-level failure onto the gateway error taxonomy.
fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Map a non-success status and its body onto the gateway error taxonomy.
///
/// Quota exhaustion is reported as rate limiting whatever the status code.
fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let (message, api_status) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (
            envelope
                .error
                .message
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            envelope.error.status.unwrap_or_default(),
        ),
        Err(_) => (format!("HTTP {}", status.as_u16()), String::new()),
    };

    let quota = api_status == "RESOURCE_EXHAUSTED" || message.to_lowercase().contains("quota");
    if status == StatusCode::TOO_MANY_REQUESTS || quota {
        return GatewayError::RateLimited(message);
    }

    match status {
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(message),
        StatusCode::BAD_REQUEST => GatewayError::InvalidRequest(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(message),
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        let request =
            GenerateContentRequest::text(prompt, options.temperature, options.max_output_tokens);
        let response = self.post(model, &request).await?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GatewayError::RequestFailed(response.empty_reason()));
        }
        Ok(text)
    }

    async fn generate_image(&self, model: &Model, prompt: &str) -> Result<ImagePayload, GatewayError> {
        if !model.supports_images() {
            return Ok(ImagePayload::Unavailable {
                reason: format!("{model} does not return images"),
            });
        }

        let response = self.post(model, &GenerateContentRequest::image(prompt)).await?;
        let Some(inline) = response.inline_data() else {
            return Ok(ImagePayload::Unavailable {
                reason: response.empty_reason(),
            });
        };

        let data = STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| GatewayError::RequestFailed(format!("Invalid inline image data: {e}")))?;
        Ok(ImagePayload::Inline {
            mime_type: inline.mime_type.clone(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_model() {
        let gateway = GeminiGateway::with_config(
            "test-key",
            "https://example.test/v1beta/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            gateway.endpoint(&Model::Gemini25Flash),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_from_env_missing_key() {
        let err = GeminiGateway::from_env(
            "CURATOR_TEST_KEY_THAT_IS_NEVER_SET",
            GeminiGateway::DEFAULT_BASE_URL,
            GeminiGateway::DEFAULT_TIMEOUT,
        )
        .unwrap_err();
        assert_eq!(
            err,
            GatewayError::MissingApiKey("CURATOR_TEST_KEY_THAT_IS_NEVER_SET".to_string())
        );
    }

    #[test]
    fn test_status_error_rate_limited() {
        let body = r#"{"error": {"code": 429, "message": "Too many requests", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(err, GatewayError::RateLimited("Too many requests".into()));
    }

    #[test]
    fn test_status_error_quota_on_other_status() {
        let body = r#"{"error": {"code": 403, "message": "Quota exceeded for project"}}"#;
        assert!(status_error(StatusCode::FORBIDDEN, body).is_rate_limited());
    }

    #[test]
    fn test_status_error_classification() {
        let body = r#"{"error": {"message": "models/foo is not found"}}"#;
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, body),
            GatewayError::ModelNotAvailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "{}"),
            GatewayError::InvalidRequest(_)
        ));
        assert_eq!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, "not json"),
            GatewayError::RequestFailed("HTTP 500".into())
        );
    }

    #[tokio::test]
    async fn test_text_model_does_not_request_images() {
        let gateway = GeminiGateway::new("test-key").unwrap();
        let payload = gateway
            .generate_image(&Model::Gemini25Flash, "A clay tablet")
            .await
            .unwrap();
        assert!(matches!(payload, ImagePayload::Unavailable { .. }));
    }
}
