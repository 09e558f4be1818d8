use std::sync::Arc;

use chrono::{DateTime, Utc};
use nerza_core::{find_service, ContactInfo, DomainError, Service};
use nerza_observability::AppMetrics;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::BookingTimings;
use crate::latency::{Latency, TokioLatency};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBookingConfirmation {
    pub reference: Uuid,
    pub confirmed_at: DateTime<Utc>,
    pub service: Service,
    pub contact: ContactInfo,
}

/// Books a single catalogue service outside of the trip configurator.
pub struct ServiceBookingDesk<L = TokioLatency> {
    timings: BookingTimings,
    latency: L,
    metrics: Arc<AppMetrics>,
}

impl<L: Latency> ServiceBookingDesk<L> {
    pub fn new(timings: BookingTimings, latency: L, metrics: Arc<AppMetrics>) -> Self {
        Self {
            timings,
            latency,
            metrics,
        }
    }

    #[instrument(skip(self, contact))]
    pub async fn book(
        &self,
        service_id: u32,
        contact: &ContactInfo,
    ) -> Result<ServiceBookingConfirmation, DomainError> {
        let service = find_service(service_id).ok_or(DomainError::UnknownService(service_id))?;
        if !contact.is_complete() {
            return Err(DomainError::IncompleteContact);
        }

        self.latency.pause(self.timings.service_payment_delay).await;

        let confirmation = ServiceBookingConfirmation {
            reference: Uuid::new_v4(),
            confirmed_at: Utc::now(),
            service: service.clone(),
            contact: contact.clone(),
        };
        self.metrics.inc_booking_confirmed();
        info!(reference = %confirmation.reference, service = service.title, "service booked");
        Ok(confirmation)
    }
}
