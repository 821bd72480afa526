use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{check_not_blank, check_unit_interval};
use crate::enums::FollowUpPriority;
use crate::errors::CoreError;

/// Instant range in which a follow-up should happen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimeWindow {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

impl TimeWindow {
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.min <= instant && instant <= self.max
    }
}

/// Advisory follow-up plan derived from a lead and one of its analyses.
///
/// Recomputed on request, never treated as a source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FollowUpRecommendation {
    pub lead_id: String,
    pub priority: FollowUpPriority,
    pub recommended_time_frame: TimeWindow,
    pub reason: String,
    pub suggested_talking_points: Vec<String>,
    pub potential_value: f64,
    pub confidence: f64,
    #[serde(default)]
    pub next_steps: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl FollowUpRecommendation {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when a bound is violated.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_not_blank("recommendation lead_id", &self.lead_id)?;
        check_unit_interval("confidence", self.confidence)?;
        if !self.potential_value.is_finite() || self.potential_value < 0.0 {
            return Err(CoreError::Validation(format!(
                "potential_value must be a non-negative number, got {}",
                self.potential_value
            )));
        }
        if self.recommended_time_frame.min > self.recommended_time_frame.max {
            return Err(CoreError::Validation(
                "recommended_time_frame.min is after max".into(),
            ));
        }
        Ok(())
    }
}
