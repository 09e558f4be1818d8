use nerza_core::DomainError;
use thiserror::Error;

use crate::configurator::TripStage;

pub const GENERATION_FAILED_MESSAGE: &str =
    "Une erreur est survenue lors de la génération de l'itinéraire. Veuillez réessayer.";

/// Signatures the generation API uses when a quota is exhausted.
const RATE_LIMIT_SIGNATURES: [&str; 2] = ["429", "RESOURCE_EXHAUSTED"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("generation backend is not configured")]
    NotConfigured,
    #[error("rate limited by generation api: {0}")]
    RateLimited(String),
    #[error("generation api returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("generation request failed: {0}")]
    Transport(String),
    #[error("generation response could not be parsed: {0}")]
    MalformedResponse(String),
    #[error("generation response contained no text")]
    EmptyResponse,
}

impl GenerationError {
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 429 || is_rate_limit_signature(&body) {
            Self::RateLimited(body)
        } else {
            Self::Api {
                status,
                message: body,
            }
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Transport(message) => is_rate_limit_signature(message),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), err.to_string()),
            None => Self::Transport(err.to_string()),
        }
    }
}

pub fn is_rate_limit_signature(message: &str) -> bool {
    RATE_LIMIT_SIGNATURES
        .iter()
        .any(|signature| message.contains(signature))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    #[error("itinerary generation failed after retries")]
    GenerationFailed(#[source] GenerationError),
}

impl ItineraryError {
    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED_MESSAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("`{action}` is not allowed while {stage:?}")]
    NotAllowed {
        action: &'static str,
        stage: TripStage,
    },
    #[error("an itinerary is already being generated")]
    GenerationInProgress,
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error(transparent)]
    Generation(#[from] ItineraryError),
}
