use std::sync::Arc;
use std::time::Instant;

use nerza_observability::AppMetrics;
use tracing::{debug, error, info, instrument, warn};

use crate::backend::{GeminiBackend, GenerationBackend, GenerationRequest};
use crate::config::AiSettings;
use crate::error::GenerationError;
use crate::latency::{Latency, TokioLatency};

/// Wraps a generation backend with rate-limit retries and static fallbacks.
pub struct ResilientClient<B, L = TokioLatency> {
    settings: AiSettings,
    backend: B,
    latency: L,
    metrics: Arc<AppMetrics>,
}

impl ResilientClient<GeminiBackend, TokioLatency> {
    pub fn from_settings(
        settings: AiSettings,
        metrics: Arc<AppMetrics>,
    ) -> Result<Self, GenerationError> {
        let backend = GeminiBackend::new(&settings)?;
        if !settings.has_credential() {
            warn!("no generation api key configured, serving fallback content");
        }
        Ok(Self::new(settings, backend, TokioLatency, metrics))
    }
}

impl<B, L> ResilientClient<B, L>
where
    B: GenerationBackend,
    L: Latency,
{
    pub fn new(settings: AiSettings, backend: B, latency: L, metrics: Arc<AppMetrics>) -> Self {
        Self {
            settings,
            backend,
            latency,
            metrics,
        }
    }

    pub fn is_available(&self) -> bool {
        self.settings.has_credential()
    }

    pub fn settings(&self) -> &AiSettings {
        &self.settings
    }

    pub fn latency(&self) -> &L {
        &self.latency
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    pub fn request(&self, prompt: &str, temperature: f32) -> GenerationRequest {
        GenerationRequest {
            model: self.settings.model.clone(),
            prompt: prompt.to_string(),
            temperature,
        }
    }

    /// Calls the backend, retrying only rate-limit failures with exponential backoff and
    /// jitter. Makes at most `retry.max_attempts()` calls.
    #[instrument(skip_all, fields(backend = %self.backend.name(), model = %request.model))]
    pub async fn generate_with_retry(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        if !self.is_available() {
            return Err(GenerationError::NotConfigured);
        }

        let policy = &self.settings.retry;
        let started = Instant::now();
        self.metrics.inc_generation_request();

        let mut attempt = 0_u32;
        let outcome = loop {
            attempt += 1;
            self.metrics.inc_attempt();

            let err = match self.backend.generate(request).await {
                Ok(text) => {
                    debug!(attempt, "generation succeeded");
                    break Ok(text);
                }
                Err(err) => err,
            };

            let rate_limited = err.is_rate_limited();
            if rate_limited {
                self.metrics.inc_rate_limited();
            }

            let retries_left = policy.max_retries.saturating_sub(attempt - 1);
            if rate_limited && retries_left > 0 {
                let wait = policy.backoff_delay(attempt - 1) + policy.jitter();
                warn!(
                    attempt,
                    retries_left,
                    wait_ms = wait.as_millis() as u64,
                    "generation rate limited, backing off"
                );
                self.latency.pause(wait).await;
                continue;
            }

            if rate_limited {
                error!(attempts = attempt, error = %err, "generation still rate limited after retries");
            } else {
                error!(attempts = attempt, error = %err, "generation failed with a non-retriable error");
            }
            self.metrics.inc_failure();
            break Err(err);
        };

        self.metrics.observe_latency(started.elapsed());
        outcome
    }

    /// Never fails: without a credential, or once retries are spent, `fallback` is returned.
    pub async fn generate_with_fallback(
        &self,
        prompt: &str,
        fallback: &str,
        temperature: f32,
    ) -> String {
        if !self.is_available() {
            self.metrics.inc_fallback();
            return fallback.to_string();
        }

        match self
            .generate_with_retry(&self.request(prompt, temperature))
            .await
        {
            Ok(text) => text,
            Err(err) => {
                info!(error = %err, "serving fallback content");
                self.metrics.inc_fallback();
                fallback.to_string()
            }
        }
    }
}
