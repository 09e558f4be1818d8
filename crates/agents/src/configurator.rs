use std::sync::Arc;

use chrono::{DateTime, Utc};
use nerza_core::{
    ensure_interest_offered, quote, validate_submission, BookingSession, BudgetTier, ContactInfo,
    GeneratedItinerary, Interest, ItineraryRequest, PriceQuote, Region, TripPreferences,
};
use nerza_observability::AppMetrics;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::BookingTimings;
use crate::content::ItineraryGenerator;
use crate::error::{ItineraryError, TransitionError};
use crate::latency::{Latency, TokioLatency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStage {
    SelectingRegion,
    CollectingPreferences,
    Generating,
    ItineraryReady,
    Finalizing,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub reference: Uuid,
    pub confirmed_at: DateTime<Utc>,
    pub session: BookingSession,
}

/// State of one visitor's trip form, from region choice to the simulated booking.
pub struct TripConfigurator<L = TokioLatency> {
    stage: TripStage,
    preferences: TripPreferences,
    contact: ContactInfo,
    itinerary: Option<GeneratedItinerary>,
    quote: Option<PriceQuote>,
    error_message: Option<String>,
    pending_booking: Option<BookingSession>,
    confirmation: Option<BookingConfirmation>,
    timings: BookingTimings,
    latency: L,
    metrics: Arc<AppMetrics>,
}

impl<L: Latency> TripConfigurator<L> {
    pub fn new(timings: BookingTimings, latency: L, metrics: Arc<AppMetrics>) -> Self {
        Self {
            stage: TripStage::SelectingRegion,
            preferences: TripPreferences::default(),
            contact: ContactInfo::default(),
            itinerary: None,
            quote: None,
            error_message: None,
            pending_booking: None,
            confirmation: None,
            timings,
            latency,
            metrics,
        }
    }

    pub fn stage(&self) -> TripStage {
        self.stage
    }

    pub fn preferences(&self) -> &TripPreferences {
        &self.preferences
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn itinerary(&self) -> Option<&str> {
        self.itinerary.as_ref().map(|itinerary| itinerary.text.as_str())
    }

    /// Only present alongside the itinerary it was computed with.
    pub fn quote(&self) -> Option<PriceQuote> {
        self.itinerary.as_ref().and(self.quote)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn pending_booking(&self) -> Option<&BookingSession> {
        self.pending_booking.as_ref()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn offered_interests(&self) -> &'static [Interest] {
        self.preferences
            .region
            .map(Region::interests)
            .unwrap_or(&[])
    }

    pub fn select_region(&mut self, region: Region) -> Result<(), TransitionError> {
        self.ensure_editable("select_region")?;
        self.preferences.region = Some(region);
        self.preferences.interests.clear();
        self.error_message = None;
        self.stage = TripStage::CollectingPreferences;
        Ok(())
    }

    /// Returns whether the interest is selected after the toggle.
    pub fn toggle_interest(&mut self, interest: Interest) -> Result<bool, TransitionError> {
        self.ensure_stage("toggle_interest", TripStage::CollectingPreferences)?;
        ensure_interest_offered(self.preferences.region, interest)?;
        if self.preferences.interests.remove(&interest) {
            Ok(false)
        } else {
            self.preferences.interests.insert(interest);
            Ok(true)
        }
    }

    /// Durations below one day are raised to one.
    pub fn set_duration(&mut self, days: u32) -> Result<u32, TransitionError> {
        self.ensure_editable("set_duration")?;
        self.preferences.duration_days = days.max(1);
        Ok(self.preferences.duration_days)
    }

    pub fn set_budget(&mut self, budget: BudgetTier) -> Result<(), TransitionError> {
        self.ensure_editable("set_budget")?;
        self.preferences.budget = budget;
        Ok(())
    }

    pub fn set_contact(&mut self, contact: ContactInfo) -> Result<(), TransitionError> {
        self.ensure_editable("set_contact")?;
        self.contact = contact;
        Ok(())
    }

    /// Validates the form and enters `Generating`. A second call before
    /// [`complete_generation`](Self::complete_generation) is rejected.
    pub fn begin_generation(&mut self) -> Result<ItineraryRequest, TransitionError> {
        match self.stage {
            TripStage::Generating => return Err(TransitionError::GenerationInProgress),
            TripStage::SelectingRegion | TripStage::CollectingPreferences => {}
            stage => {
                return Err(TransitionError::NotAllowed {
                    action: "submit",
                    stage,
                })
            }
        }

        let region = match validate_submission(&self.contact, &self.preferences) {
            Ok(region) => region,
            Err(err) => {
                self.error_message = Some(err.user_message().to_string());
                return Err(err.into());
            }
        };

        self.error_message = None;
        self.itinerary = None;
        self.quote = None;
        self.stage = TripStage::Generating;

        Ok(ItineraryRequest {
            region,
            interests: self.preferences.interests.iter().copied().collect(),
            duration_days: self.preferences.duration_days.max(1),
            budget: self.preferences.budget,
        })
    }

    pub fn complete_generation(
        &mut self,
        outcome: Result<String, ItineraryError>,
    ) -> Result<(), TransitionError> {
        self.ensure_stage("complete_generation", TripStage::Generating)?;

        match outcome {
            Ok(text) => {
                let quote = quote(
                    self.preferences.budget,
                    self.preferences.duration_days.max(1),
                );
                info!(amount = quote.amount, budget = %quote.budget, days = quote.duration_days, "itinerary ready");
                self.itinerary = Some(GeneratedItinerary { text });
                self.quote = Some(quote);
                self.stage = TripStage::ItineraryReady;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "itinerary generation failed");
                self.itinerary = None;
                self.quote = None;
                self.error_message = Some(err.user_message().to_string());
                self.stage = TripStage::CollectingPreferences;
                Err(err.into())
            }
        }
    }

    /// Runs a whole generation. If the future is dropped before it finishes,
    /// the form returns to `CollectingPreferences` instead of staying in `Generating`.
    #[instrument(skip_all)]
    pub async fn submit<G: ItineraryGenerator>(
        &mut self,
        generator: &G,
    ) -> Result<(), TransitionError> {
        let request = self.begin_generation()?;
        let mut guard = GenerationGuard(self);
        let outcome = generator.generate_itinerary(&request).await;
        guard.0.complete_generation(outcome)
    }

    /// Drops the itinerary and quote; contact details and region are kept.
    pub fn modify_preferences(&mut self) -> Result<(), TransitionError> {
        self.ensure_stage("modify_preferences", TripStage::ItineraryReady)?;
        self.itinerary = None;
        self.quote = None;
        self.error_message = None;
        self.stage = TripStage::CollectingPreferences;
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<&BookingSession, TransitionError> {
        self.ensure_stage("finalize", TripStage::ItineraryReady)?;
        let quote = self.quote().ok_or(TransitionError::NotAllowed {
            action: "finalize",
            stage: self.stage,
        })?;

        self.stage = TripStage::Finalizing;
        Ok(self.pending_booking.insert(BookingSession {
            contact: self.contact.clone(),
            preferences: self.preferences.clone(),
            quote,
        }))
    }

    pub fn cancel_finalization(&mut self) -> Result<(), TransitionError> {
        self.ensure_stage("cancel_finalization", TripStage::Finalizing)?;
        self.pending_booking = None;
        self.stage = TripStage::ItineraryReady;
        Ok(())
    }

    /// Simulated payment: waits `payment_delay`, then records the confirmation.
    #[instrument(skip_all)]
    pub async fn confirm(&mut self) -> Result<BookingConfirmation, TransitionError> {
        self.ensure_stage("confirm", TripStage::Finalizing)?;
        let session = self.pending_booking.clone().ok_or(TransitionError::NotAllowed {
            action: "confirm",
            stage: self.stage,
        })?;

        self.latency.pause(self.timings.payment_delay).await;

        let confirmation = BookingConfirmation {
            reference: Uuid::new_v4(),
            confirmed_at: Utc::now(),
            session,
        };
        self.metrics.inc_booking_confirmed();
        info!(
            reference = %confirmation.reference,
            amount = confirmation.session.quote.amount,
            "booking confirmed"
        );

        self.pending_booking = None;
        self.confirmation = Some(confirmation.clone());
        self.stage = TripStage::Confirmed;
        Ok(confirmation)
    }

    /// Keeps the confirmation up for `confirmation_display`, then resets the form.
    pub async fn finish_confirmation(&mut self) -> Result<(), TransitionError> {
        self.ensure_stage("finish_confirmation", TripStage::Confirmed)?;
        self.latency.pause(self.timings.confirmation_display).await;
        self.reset_all();
        Ok(())
    }

    pub fn dismiss_confirmation(&mut self) -> Result<(), TransitionError> {
        self.ensure_stage("dismiss_confirmation", TripStage::Confirmed)?;
        self.reset_all();
        Ok(())
    }

    pub fn full_reset(&mut self) -> Result<(), TransitionError> {
        if self.stage == TripStage::Generating {
            return Err(TransitionError::GenerationInProgress);
        }
        self.reset_all();
        Ok(())
    }

    fn reset_all(&mut self) {
        self.stage = TripStage::SelectingRegion;
        self.preferences = TripPreferences::default();
        self.contact = ContactInfo::default();
        self.itinerary = None;
        self.quote = None;
        self.error_message = None;
        self.pending_booking = None;
        self.confirmation = None;
    }

    fn ensure_stage(&self, action: &'static str, expected: TripStage) -> Result<(), TransitionError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(TransitionError::NotAllowed {
                action,
                stage: self.stage,
            })
        }
    }

    fn ensure_editable(&self, action: &'static str) -> Result<(), TransitionError> {
        match self.stage {
            TripStage::SelectingRegion | TripStage::CollectingPreferences => Ok(()),
            TripStage::Generating => Err(TransitionError::GenerationInProgress),
            stage => Err(TransitionError::NotAllowed { action, stage }),
        }
    }
}

struct GenerationGuard<'a, L>(&'a mut TripConfigurator<L>);

impl<L> Drop for GenerationGuard<'_, L> {
    fn drop(&mut self) {
        let configurator = &mut *self.0;
        if configurator.stage == TripStage::Generating {
            warn!("itinerary generation abandoned");
            configurator.stage = TripStage::CollectingPreferences;
        }
    }
}
