use thiserror::Error;

use crate::models::{ContactInfo, Interest, Region, TripPreferences};

pub const FORM_INCOMPLETE_MESSAGE: &str =
    "Veuillez choisir une destination et remplir vos coordonnées.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("no region selected")]
    RegionNotSelected,
    #[error("contact information is incomplete")]
    IncompleteContact,
    #[error("interest `{interest}` is not offered for region {region}")]
    InterestNotOffered { interest: Interest, region: Region },
    #[error("interests cannot be chosen before a region")]
    InterestWithoutRegion,
    #[error("unknown service id {0}")]
    UnknownService(u32),
}

impl DomainError {
    /// Inline message shown to the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RegionNotSelected | Self::IncompleteContact => FORM_INCOMPLETE_MESSAGE,
            Self::InterestNotOffered { .. } | Self::InterestWithoutRegion => {
                "Ce centre d'intérêt n'est pas proposé pour cette destination."
            }
            Self::UnknownService(_) => "Ce service n'est plus disponible.",
        }
    }
}

/// Returns the region the itinerary will be built for.
pub fn validate_submission(
    contact: &ContactInfo,
    preferences: &TripPreferences,
) -> Result<Region, DomainError> {
    let region = preferences.region.ok_or(DomainError::RegionNotSelected)?;
    if !contact.is_complete() {
        return Err(DomainError::IncompleteContact);
    }
    Ok(region)
}

pub fn ensure_interest_offered(region: Option<Region>, interest: Interest) -> Result<(), DomainError> {
    let region = region.ok_or(DomainError::InterestWithoutRegion)?;
    if region.interests().contains(&interest) {
        Ok(())
    } else {
        Err(DomainError::InterestNotOffered { interest, region })
    }
}
