//! Model client adapter
//!
//! Wraps the [`ModelGateway`] port with the per-call throttle, bounded
//! retry with backoff, and an optional response cache. Every agent talks to
//! the model through one shared [`ModelClient`].

use crate::config::{ModelSettings, RetryPolicy};
use crate::ports::model_gateway::{GatewayError, GenerationOptions, ImagePayload, ModelGateway};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Prompt + temperature keyed response cache with a fixed TTL
struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<(String, u32), (Instant, String)>>,
}

impl ResponseCache {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(prompt: &str, temperature: f32) -> (String, u32) {
        (prompt.to_string(), temperature.to_bits())
    }

    fn get(&self, prompt: &str, temperature: f32) -> Option<String> {
        let mut entries = self.entries.lock().ok()?;
        let key = Self::key(prompt, temperature);
        match entries.get(&key) {
            Some((stored_at, text)) if stored_at.elapsed() < self.ttl => Some(text.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Store a response, dropping every entry that has outlived the TTL.
    fn put(&self, prompt: &str, temperature: f32, text: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            let ttl = self.ttl;
            entries.retain(|_, (stored_at, _)| stored_at.elapsed() < ttl);
            entries.insert(Self::key(prompt, temperature), (Instant::now(), text.to_string()));
        }
    }
}

/// Shared entry point for every model call in a pipeline run
pub struct ModelClient {
    gateway: Arc<dyn ModelGateway>,
    settings: ModelSettings,
    retry: RetryPolicy,
    cache: Option<ResponseCache>,
    calls: AtomicU64,
}

impl ModelClient {
    pub fn new(gateway: Arc<dyn ModelGateway>, settings: ModelSettings, retry: RetryPolicy) -> Self {
        Self {
            gateway,
            settings,
            retry,
            cache: None,
            calls: AtomicU64::new(0),
        }
    }

    /// Cache responses for `ttl`; a zero TTL leaves caching disabled.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = (!ttl.is_zero()).then(|| ResponseCache::new(ttl));
        self
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Outbound attempts made so far, retries included
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Generate text at the configured default temperature.
    pub async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        self.generate_with_temperature(prompt, self.settings.temperature)
            .await
    }

    /// Generate text at `temperature`, clamped to `[0, 1]`.
    ///
    /// Each attempt is preceded by the policy's request delay. Failed
    /// attempts back off and retry up to the policy's attempt bound; the
    /// last error is returned once the bound is exhausted.
    pub async fn generate_with_temperature(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        if prompt.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("prompt is empty".to_string()));
        }
        let temperature = temperature.clamp(0.0, 1.0);

        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(prompt, temperature)) {
            debug!("Model response served from cache");
            return Ok(cached);
        }

        let options = GenerationOptions {
            temperature,
            max_output_tokens: self.settings.max_output_tokens,
        };
        let model = &self.settings.model;
        let text = self
            .with_retry(|| self.gateway.generate(model, prompt, &options))
            .await?;

        if let Some(cache) = &self.cache {
            cache.put(prompt, temperature, &text);
        }
        Ok(text)
    }

    /// Request an image, under the same throttle and retry policy.
    pub async fn generate_image(&self, prompt: &str) -> Result<ImagePayload, GatewayError> {
        let model = &self.settings.image_model;
        self.with_retry(|| self.gateway.generate_image(model, prompt))
            .await
    }

    async fn with_retry<T, F, Fut>(&self, mut call: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, GatewayError>>,
    {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            if !self.retry.request_delay.is_zero() {
                tokio::time::sleep(self.retry.request_delay).await;
            }
            self.calls.fetch_add(1, Ordering::Relaxed);

            match call().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    let last = attempt + 1 >= max_attempts;
                    if last || !e.is_retryable() {
                        return Err(e);
                    }
                    let wait = self.retry.backoff(attempt, e.is_rate_limited());
                    if e.is_rate_limited() {
                        warn!("Rate limit hit, waiting {:?} before retry", wait);
                    } else {
                        warn!("Model call failed ({}), retrying in {:?}", e, wait);
                    }
                    if !wait.is_zero() {
                        tokio::time::sleep(wait).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}
