pub mod catalog;
pub mod fallback;
pub mod markup;
pub mod models;
pub mod pricing;
pub mod prompt;
pub mod validation;

pub use catalog::{find_service, services};
pub use markup::{normalize_markup, uses_only_supported_markers};
pub use models::*;
pub use pricing::{calculate_price, quote};
pub use prompt::{build_itinerary_prompt, build_tagline_prompt};
pub use validation::{DomainError, ensure_interest_offered, validate_submission};
