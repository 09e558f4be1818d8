mod backend;
mod booking;
mod client;
mod config;
mod configurator;
mod content;
mod error;
mod latency;
mod retry;

use std::sync::Arc;

use nerza_observability::AppMetrics;

pub use backend::{GeminiBackend, GenerationBackend, GenerationRequest};
pub use booking::{ServiceBookingConfirmation, ServiceBookingDesk};
pub use client::ResilientClient;
pub use config::{AiSettings, BookingTimings, ContentSettings, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use configurator::{BookingConfirmation, TripConfigurator, TripStage};
pub use content::{ContentStudio, ItineraryGenerator};
pub use error::{
    is_rate_limit_signature, GenerationError, ItineraryError, TransitionError,
    GENERATION_FAILED_MESSAGE,
};
pub use latency::{Latency, RecordingLatency, TokioLatency};
pub use retry::RetryPolicy;

/// Wires the content studio, trip forms and service desk around one latency source.
/// Retry backoff always waits; only the simulated pauses can be switched off.
pub struct NerzaAgency<B = GeminiBackend, L = TokioLatency> {
    studio: ContentStudio<B, L>,
    timings: BookingTimings,
    latency: L,
    metrics: Arc<AppMetrics>,
}

impl NerzaAgency<GeminiBackend, TokioLatency> {
    pub fn from_env(metrics: Arc<AppMetrics>) -> Result<Self, GenerationError> {
        let client = ResilientClient::from_settings(AiSettings::from_env(), metrics.clone())?;
        Ok(Self {
            studio: ContentStudio::new(client, ContentSettings::from_env()),
            timings: BookingTimings::default(),
            latency: TokioLatency,
            metrics,
        })
    }
}

impl<B, L> NerzaAgency<B, L>
where
    B: GenerationBackend,
    L: Latency + Clone,
{
    pub fn new(
        client: ResilientClient<B, L>,
        content: ContentSettings,
        timings: BookingTimings,
    ) -> Self {
        let latency = client.latency().clone();
        let metrics = client.metrics().clone();
        Self {
            studio: ContentStudio::new(client, content),
            timings,
            latency,
            metrics,
        }
    }

    /// Zeroes the payment, banner and offline-sample pauses.
    pub fn without_simulated_pauses(self) -> Self {
        Self {
            studio: self.studio.without_offline_delay(),
            timings: BookingTimings::immediate(),
            ..self
        }
    }

    pub fn studio(&self) -> &ContentStudio<B, L> {
        &self.studio
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    pub fn new_trip(&self) -> TripConfigurator<L> {
        TripConfigurator::new(self.timings, self.latency.clone(), self.metrics.clone())
    }

    pub fn booking_desk(&self) -> ServiceBookingDesk<L> {
        ServiceBookingDesk::new(self.timings, self.latency.clone(), self.metrics.clone())
    }
}
