use std::env;
use std::fmt;
use std::time::Duration;

use crate::retry::RetryPolicy;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

impl AiSettings {
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let api_key = non_empty_var("NERZA_GEMINI_API_KEY").or_else(|| non_empty_var("API_KEY"));
        let model = non_empty_var("NERZA_GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let endpoint =
            non_empty_var("NERZA_GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let defaults = RetryPolicy::default();
        let max_retries = parsed_var::<u32>("NERZA_AI_MAX_RETRIES")
            .map(|value| value.min(6))
            .unwrap_or(defaults.max_retries);
        let base_delay = parsed_var::<u64>("NERZA_AI_BASE_DELAY_MS")
            .map(|value| Duration::from_millis(value.clamp(50, 30_000)))
            .unwrap_or(defaults.base_delay);

        Self {
            api_key,
            model,
            endpoint,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry: RetryPolicy {
                max_retries,
                base_delay,
                ..defaults
            },
        }
    }

    /// True when a credential is configured and the remote backend may be called.
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentSettings {
    pub tagline_temperature: f32,
    pub itinerary_temperature: f32,
    /// Pause before the sample itinerary is served in offline mode.
    pub offline_itinerary_delay: Duration,
    /// Serve the sample itinerary instead of an error when generation gives up.
    pub fallback_on_failure: bool,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            tagline_temperature: 0.7,
            itinerary_temperature: 0.8,
            offline_itinerary_delay: Duration::from_millis(1_500),
            fallback_on_failure: false,
        }
    }
}

impl ContentSettings {
    pub fn from_env() -> Self {
        let fallback_on_failure = env::var("NERZA_ITINERARY_FALLBACK_ON_FAILURE")
            .ok()
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            fallback_on_failure,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingTimings {
    /// Simulated payment processing for a trip booking.
    pub payment_delay: Duration,
    /// How long the confirmation stays up before the form resets.
    pub confirmation_display: Duration,
    /// Simulated payment processing for a single catalogue service.
    pub service_payment_delay: Duration,
}

impl Default for BookingTimings {
    fn default() -> Self {
        Self {
            payment_delay: Duration::from_millis(1_500),
            confirmation_display: Duration::from_millis(5_000),
            service_payment_delay: Duration::from_millis(2_000),
        }
    }
}

impl BookingTimings {
    /// No simulated payment or banner pauses. Backoff between retries is unaffected.
    pub fn immediate() -> Self {
        Self {
            payment_delay: Duration::ZERO,
            confirmation_display: Duration::ZERO,
            service_payment_delay: Duration::ZERO,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    non_empty_var(name).and_then(|value| value.parse::<T>().ok())
}
