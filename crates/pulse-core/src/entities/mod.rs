//! Entity structs for all callpulse domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so they can
//! be read from JSON fixtures, emitted by the CLI, and checked against their
//! generated schema.

mod analysis;
mod effectiveness;
mod lead;
mod recommendation;

pub use analysis::{CallAnalysis, SENTIMENT_MAX, SENTIMENT_MIN};
pub use effectiveness::{EffectivenessFactor, FollowUpEffectiveness};
pub use lead::{Interaction, Lead};
pub use recommendation::{FollowUpRecommendation, TimeWindow};

use crate::errors::CoreError;

/// Check that `value` is finite and inside `[0, 1]`.
pub(crate) fn check_unit_interval(field: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be within [0, 1], got {value}"
        )))
    }
}

pub(crate) fn check_not_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}
