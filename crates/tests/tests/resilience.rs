use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use nerza_agents::{
    AiSettings, BookingTimings, ContentSettings, ContentStudio, GenerationBackend,
    GenerationError, GenerationRequest, ItineraryError, ItineraryGenerator, NerzaAgency,
    RecordingLatency, ResilientClient,
};
use nerza_core::fallback::{FALLBACK_ITINERARY, FALLBACK_TAGLINE};
use nerza_core::{BudgetTier, ContactInfo, ItineraryRequest, Region};
use nerza_observability::AppMetrics;
use parking_lot::Mutex;

struct FlakyBackend {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: Mutex<u32>,
}

impl FlakyBackend {
    fn new(script: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> u32 {
        *self.calls.lock()
    }
}

impl GenerationBackend for FlakyBackend {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        *self.calls.lock() += 1;
        self.script
            .lock()
            .pop_front()
            .unwrap_or(Err(GenerationError::EmptyResponse))
    }
}

fn quota_exhausted() -> Result<String, GenerationError> {
    Err(GenerationError::from_status(
        429,
        r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED"}}"#.to_string(),
    ))
}

fn studio(
    backend: Arc<FlakyBackend>,
    content: ContentSettings,
) -> (ContentStudio<Arc<FlakyBackend>, RecordingLatency>, RecordingLatency) {
    let latency = RecordingLatency::new();
    let client = ResilientClient::new(
        AiSettings::with_api_key("test-key"),
        backend,
        latency.clone(),
        AppMetrics::shared(),
    );
    (ContentStudio::new(client, content), latency)
}

fn request() -> ItineraryRequest {
    ItineraryRequest {
        region: Region::Agadir,
        interests: Vec::new(),
        duration_days: 3,
        budget: BudgetTier::Economique,
    }
}

#[tokio::test]
async fn itinerary_survives_two_quota_errors() {
    let backend = FlakyBackend::new(vec![
        quota_exhausted(),
        quota_exhausted(),
        Ok("# Jour 1 : Souk El Had".to_string()),
    ]);
    let (studio, latency) = studio(backend.clone(), ContentSettings::default());

    let text = studio.generate_itinerary(&request()).await.unwrap();

    assert_eq!(text, "### Jour 1 : Souk El Had");
    assert_eq!(backend.calls(), 3);
    let waits = latency.pauses();
    assert_eq!(waits.len(), 2);
    assert!(waits[0] < Duration::from_millis(1_500));
    assert!(waits[1] >= Duration::from_millis(2_000));
}

#[tokio::test]
async fn persistent_quota_errors_surface_after_four_calls() {
    let backend = FlakyBackend::new((0..10).map(|_| quota_exhausted()).collect());
    let (studio, latency) = studio(backend.clone(), ContentSettings::default());

    let err = studio.generate_itinerary(&request()).await.unwrap_err();

    assert!(matches!(
        err,
        ItineraryError::GenerationFailed(GenerationError::RateLimited(_))
    ));
    assert_eq!(backend.calls(), 4);
    assert!(latency.total() < Duration::from_millis(8_500));
    assert!(latency.total() >= Duration::from_millis(7_000));

    let snapshot = studio.client().metrics().snapshot();
    assert_eq!(snapshot.generation_failures_total, 1);
    assert_eq!(snapshot.rate_limited_total, 4);
}

#[tokio::test]
async fn fallback_setting_serves_sample_after_exhaustion() {
    let backend = FlakyBackend::new((0..4).map(|_| quota_exhausted()).collect());
    let content = ContentSettings {
        fallback_on_failure: true,
        ..ContentSettings::default()
    };
    let (studio, _) = studio(backend, content);

    let text = studio.generate_itinerary(&request()).await.unwrap();
    assert_eq!(text, FALLBACK_ITINERARY);
}

#[tokio::test]
async fn tagline_falls_back_on_hard_error() {
    let backend = FlakyBackend::new(vec![Err(GenerationError::Api {
        status: 403,
        message: "PERMISSION_DENIED".to_string(),
    })]);
    let (studio, latency) = studio(backend.clone(), ContentSettings::default());

    assert_eq!(studio.generate_tagline().await, FALLBACK_TAGLINE);
    assert_eq!(backend.calls(), 1);
    assert!(latency.pauses().is_empty());
}

#[tokio::test]
async fn skipping_simulated_pauses_keeps_retry_backoff() {
    let backend = FlakyBackend::new((0..4).map(|_| quota_exhausted()).collect());
    let latency = RecordingLatency::new();
    let client = ResilientClient::new(
        AiSettings::with_api_key("test-key"),
        backend.clone(),
        latency.clone(),
        AppMetrics::shared(),
    );
    let agency = NerzaAgency::new(client, ContentSettings::default(), BookingTimings::default())
        .without_simulated_pauses();

    let mut trip = agency.new_trip();
    trip.select_region(Region::Agadir).unwrap();
    trip.set_contact(ContactInfo::new("Sara", "sara@example.com", "0600000000"))
        .unwrap();
    assert!(trip.submit(agency.studio()).await.is_err());

    assert_eq!(backend.calls(), 4);
    let waits = latency.pauses();
    assert_eq!(waits.len(), 3);
    assert!(waits[0] >= Duration::from_millis(1_000));
    assert!(waits[1] >= Duration::from_millis(2_000));
    assert!(waits[2] >= Duration::from_millis(4_000));

    agency
        .booking_desk()
        .book(1, &ContactInfo::new("Sara", "sara@example.com", "0600000000"))
        .await
        .unwrap();
    assert_eq!(latency.pauses().last(), Some(&Duration::ZERO));
}

#[tokio::test]
async fn skipping_simulated_pauses_zeroes_offline_sample_delay() {
    let backend = FlakyBackend::new(Vec::new());
    let latency = RecordingLatency::new();
    let client = ResilientClient::new(
        AiSettings::offline(),
        backend.clone(),
        latency.clone(),
        AppMetrics::shared(),
    );
    let agency = NerzaAgency::new(client, ContentSettings::default(), BookingTimings::default())
        .without_simulated_pauses();

    let text = agency.studio().generate_itinerary(&request()).await.unwrap();

    assert_eq!(text, FALLBACK_ITINERARY);
    assert_eq!(latency.total(), Duration::ZERO);
    assert_eq!(backend.calls(), 0);
}
