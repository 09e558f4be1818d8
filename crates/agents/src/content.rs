use std::time::Duration;

use nerza_core::fallback::{ABOUT_TEXT, FALLBACK_ITINERARY, FALLBACK_TAGLINE};
use nerza_core::{
    build_itinerary_prompt, build_tagline_prompt, normalize_markup, uses_only_supported_markers,
    AgencyContent, ItineraryRequest,
};
use tracing::{info, instrument, warn};

use crate::backend::GenerationBackend;
use crate::client::ResilientClient;
use crate::config::ContentSettings;
use crate::error::ItineraryError;
use crate::latency::{Latency, TokioLatency};

/// Produces itinerary text for a trip request.
pub trait ItineraryGenerator {
    async fn generate_itinerary(&self, request: &ItineraryRequest) -> Result<String, ItineraryError>;
}

/// The two generated texts of the site: header tagline and trip itinerary.
pub struct ContentStudio<B, L = TokioLatency> {
    client: ResilientClient<B, L>,
    settings: ContentSettings,
}

impl<B, L> ContentStudio<B, L>
where
    B: GenerationBackend,
    L: Latency,
{
    pub fn new(client: ResilientClient<B, L>, settings: ContentSettings) -> Self {
        Self { client, settings }
    }

    pub fn client(&self) -> &ResilientClient<B, L> {
        &self.client
    }

    pub fn without_offline_delay(mut self) -> Self {
        self.settings.offline_itinerary_delay = Duration::ZERO;
        self
    }

    pub async fn generate_tagline(&self) -> String {
        let tagline = self
            .client
            .generate_with_fallback(
                &build_tagline_prompt(),
                FALLBACK_TAGLINE,
                self.settings.tagline_temperature,
            )
            .await;
        strip_wrapping_quotes(&tagline)
    }

    pub async fn agency_content(&self) -> AgencyContent {
        AgencyContent {
            tagline: self.generate_tagline().await,
            about: ABOUT_TEXT.to_string(),
        }
    }

    fn serve_fallback_itinerary(&self) -> String {
        self.client.metrics().inc_fallback();
        FALLBACK_ITINERARY.to_string()
    }
}

impl<B, L> ItineraryGenerator for ContentStudio<B, L>
where
    B: GenerationBackend,
    L: Latency,
{
    #[instrument(skip_all, fields(region = %request.region, days = request.duration_days, budget = %request.budget))]
    async fn generate_itinerary(&self, request: &ItineraryRequest) -> Result<String, ItineraryError> {
        if !self.client.is_available() {
            self.client
                .latency()
                .pause(self.settings.offline_itinerary_delay)
                .await;
            info!("offline mode, serving sample itinerary");
            return Ok(self.serve_fallback_itinerary());
        }

        let prompt = build_itinerary_prompt(request);
        let generation = self
            .client
            .generate_with_retry(
                &self
                    .client
                    .request(&prompt, self.settings.itinerary_temperature),
            )
            .await;

        match generation {
            Ok(text) => {
                let text = normalize_markup(&text);
                debug_assert!(uses_only_supported_markers(&text));
                Ok(text)
            }
            Err(err) if self.settings.fallback_on_failure => {
                warn!(error = %err, "itinerary generation failed, serving sample itinerary");
                Ok(self.serve_fallback_itinerary())
            }
            Err(err) => Err(ItineraryError::GenerationFailed(err)),
        }
    }
}

fn strip_wrapping_quotes(text: &str) -> String {
    text.trim()
        .trim_matches(|c| matches!(c, '"' | '«' | '»' | '“' | '”'))
        .trim()
        .to_string()
}
