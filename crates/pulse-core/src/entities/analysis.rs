use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::check_not_blank;
use crate::enums::{CustomerSatisfaction, RiskLevel};
use crate::errors::CoreError;

/// Lower bound of the canonical sentiment scale.
pub const SENTIMENT_MIN: f64 = -1.0;
/// Upper bound of the canonical sentiment scale.
pub const SENTIMENT_MAX: f64 = 1.0;

/// Model-derived summary of one call.
///
/// `sentiment_score` is always on the signed `[-1, 1]` scale. Shapes that use
/// another scale go through [`crate::adapters`] first. Analyses are immutable
/// once attached to a lead; a re-analysis appends a new record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CallAnalysis {
    pub id: String,
    pub lead_id: String,
    pub sentiment_score: f64,
    #[serde(default)]
    pub key_points: Vec<String>,
    pub customer_satisfaction: CustomerSatisfaction,
    #[serde(default)]
    pub appointment_details: Option<String>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub topics_discussed: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl CallAnalysis {
    /// Validate identifiers and the sentiment range.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when an id is blank or the sentiment
    /// score is not a finite number in `[-1, 1]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_not_blank("analysis id", &self.id)?;
        check_not_blank("analysis lead_id", &self.lead_id)?;
        if !self.sentiment_score.is_finite()
            || !(SENTIMENT_MIN..=SENTIMENT_MAX).contains(&self.sentiment_score)
        {
            return Err(CoreError::Validation(format!(
                "sentiment_score must be within [{SENTIMENT_MIN}, {SENTIMENT_MAX}], got {}",
                self.sentiment_score
            )));
        }
        Ok(())
    }

    /// Appointment details, ignoring blank strings.
    #[must_use]
    pub fn appointment(&self) -> Option<&str> {
        self.appointment_details
            .as_deref()
            .map(str::trim)
            .filter(|details| !details.is_empty())
    }
}
