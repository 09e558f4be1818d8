use std::sync::Arc;
use std::time::Duration;

use nerza_agents::{
    AiSettings, BookingTimings, ContentSettings, GenerationBackend, GenerationError,
    GenerationRequest, NerzaAgency, RecordingLatency, ResilientClient, TransitionError, TripStage,
};
use nerza_core::fallback::FALLBACK_ITINERARY;
use nerza_core::{
    uses_only_supported_markers, BudgetTier, ContactInfo, DomainError, Interest, Region,
};
use nerza_observability::AppMetrics;
use parking_lot::Mutex;

/// Answers every prompt with a fixed itinerary and keeps the prompts it saw.
#[derive(Default)]
struct CannedBackend {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl GenerationBackend for CannedBackend {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.prompts.lock().push(request.prompt.clone());
        self.reply.clone().ok_or(GenerationError::Api {
            status: 503,
            message: "UNAVAILABLE".to_string(),
        })
    }
}

fn agency(
    settings: AiSettings,
    reply: Option<&str>,
) -> (
    NerzaAgency<Arc<CannedBackend>, RecordingLatency>,
    Arc<CannedBackend>,
    RecordingLatency,
) {
    let backend = Arc::new(CannedBackend {
        reply: reply.map(str::to_string),
        ..CannedBackend::default()
    });
    let latency = RecordingLatency::new();
    let client = ResilientClient::new(settings, backend.clone(), latency.clone(), AppMetrics::shared());
    let agency = NerzaAgency::new(client, ContentSettings::default(), BookingTimings::default());
    (agency, backend, latency)
}

fn sara() -> ContactInfo {
    ContactInfo::new("Sara", "sara@example.com", "+212 600 000 000")
}

#[tokio::test]
async fn agadir_confort_five_days_end_to_end() -> anyhow::Result<()> {
    let (agency, _, _) = agency(AiSettings::offline(), None);
    let mut trip = agency.new_trip();

    trip.select_region(Region::Agadir)?;
    trip.set_duration(5)?;
    trip.set_budget(BudgetTier::Confort)?;
    trip.set_contact(sara())?;
    trip.submit(agency.studio()).await?;

    assert_eq!(trip.stage(), TripStage::ItineraryReady);
    assert_eq!(trip.quote().map(|quote| quote.amount), Some(44_800));
    let itinerary = trip.itinerary().unwrap_or_default();
    assert!(!itinerary.is_empty());
    assert!(uses_only_supported_markers(itinerary));
    Ok(())
}

#[tokio::test]
async fn online_prompt_reflects_the_form() -> anyhow::Result<()> {
    let (agency, backend, _) = agency(
        AiSettings::with_api_key("test-key"),
        Some("### Jour 1: Tafraout\n**Nuit :** bivouac"),
    );
    let mut trip = agency.new_trip();

    trip.select_region(Region::Region)?;
    trip.toggle_interest(Interest::BivouacNights)?;
    trip.set_duration(4)?;
    trip.set_budget(BudgetTier::Luxe)?;
    trip.set_contact(sara())?;
    trip.submit(agency.studio()).await?;

    let prompts = backend.prompts.lock();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Camping Tazka"));
    assert!(prompts[0].contains("4 jours"));
    assert!(prompts[0].contains("Luxe"));
    assert_eq!(trip.itinerary(), Some("### Jour 1: Tafraout\n**Nuit :** bivouac"));
    Ok(())
}

#[tokio::test]
async fn region_switch_drops_previous_interests() -> anyhow::Result<()> {
    let (agency, _, _) = agency(AiSettings::offline(), None);
    let mut trip = agency.new_trip();

    trip.select_region(Region::Region)?;
    trip.toggle_interest(Interest::MountainTrekking)?;
    trip.select_region(Region::Agadir)?;

    assert!(trip.preferences().interests.is_empty());
    assert_eq!(
        trip.toggle_interest(Interest::MountainTrekking),
        Err(TransitionError::Invalid(DomainError::InterestNotOffered {
            interest: Interest::MountainTrekking,
            region: Region::Agadir,
        }))
    );
    Ok(())
}

#[tokio::test]
async fn failed_generation_shows_message_and_allows_retry() -> anyhow::Result<()> {
    let (agency, backend, _) = agency(AiSettings::with_api_key("test-key"), None);
    let mut trip = agency.new_trip();
    trip.select_region(Region::Agadir)?;
    trip.set_contact(sara())?;

    let err = trip.submit(agency.studio()).await.unwrap_err();

    assert!(matches!(err, TransitionError::Generation(_)));
    assert_eq!(trip.stage(), TripStage::CollectingPreferences);
    assert!(trip.quote().is_none());
    assert!(trip.error_message().is_some());
    assert_eq!(backend.prompts.lock().len(), 1);

    // still editable after the failure
    trip.set_duration(2)?;
    assert_eq!(trip.preferences().duration_days, 2);
    Ok(())
}

#[tokio::test]
async fn full_cycle_resets_after_confirmation() -> anyhow::Result<()> {
    let (agency, _, latency) = agency(AiSettings::offline(), None);
    let mut trip = agency.new_trip();

    trip.select_region(Region::Agadir)?;
    trip.set_contact(sara())?;
    trip.submit(agency.studio()).await?;
    assert_eq!(trip.itinerary(), Some(FALLBACK_ITINERARY));

    let session = trip.finalize()?.clone();
    assert_eq!(session.quote.amount, 26_880);

    let confirmation = trip.confirm().await?;
    assert_eq!(confirmation.session, session);
    trip.finish_confirmation().await?;

    assert_eq!(trip.stage(), TripStage::SelectingRegion);
    assert!(trip.preferences().region.is_none());
    assert!(trip.contact().name.is_empty());
    assert!(trip.confirmation().is_none());
    assert_eq!(
        latency.pauses(),
        vec![
            Duration::from_millis(1_500),
            Duration::from_millis(1_500),
            Duration::from_millis(5_000),
        ]
    );
    assert_eq!(agency.metrics().snapshot().bookings_confirmed_total, 1);
    Ok(())
}

#[tokio::test]
async fn generating_blocks_resubmission_and_reset() -> anyhow::Result<()> {
    let (agency, _, _) = agency(AiSettings::offline(), None);
    let mut trip = agency.new_trip();
    trip.select_region(Region::Region)?;
    trip.set_contact(sara())?;

    let request = trip.begin_generation()?;
    assert_eq!(request.region, Region::Region);
    assert_eq!(trip.begin_generation(), Err(TransitionError::GenerationInProgress));
    assert_eq!(trip.full_reset(), Err(TransitionError::GenerationInProgress));
    assert_eq!(
        trip.select_region(Region::Agadir),
        Err(TransitionError::GenerationInProgress)
    );

    trip.complete_generation(Ok("### Jour 1: Tiznit".to_string()))?;
    assert_eq!(trip.stage(), TripStage::ItineraryReady);
    trip.full_reset()?;
    assert_eq!(trip.stage(), TripStage::SelectingRegion);
    Ok(())
}

#[tokio::test]
async fn single_service_booking_uses_catalogue() -> anyhow::Result<()> {
    let (agency, _, latency) = agency(AiSettings::offline(), None);

    let confirmation = agency.booking_desk().book(3, &sara()).await?;
    assert_eq!(confirmation.service.title, "Canyoning à Tafraout");
    assert_eq!(latency.total(), Duration::from_millis(2_000));

    let rendered = serde_json::to_value(&confirmation)?;
    assert_eq!(rendered["service"]["id"], 3);
    Ok(())
}
