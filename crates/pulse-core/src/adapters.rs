//! Conversions from legacy analysis shapes into the canonical [`CallAnalysis`].
//!
//! Older rows store sentiment on a `[0, 1]` scale and satisfaction as free
//! text. Those shapes are accepted only here; everything downstream sees the
//! canonical signed scale and the [`CustomerSatisfaction`] enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::CallAnalysis;
use crate::enums::CustomerSatisfaction;
use crate::errors::CoreError;

/// Map a free-text satisfaction label onto the canonical enum.
///
/// Unknown labels (including "unknown" and empty text) map to `Neutral`.
#[must_use]
pub fn satisfaction_from_label(label: &str) -> CustomerSatisfaction {
    match label.trim().to_ascii_lowercase().as_str() {
        "satisfied" | "high" | "positive" | "happy" => CustomerSatisfaction::Satisfied,
        "dissatisfied" | "unsatisfied" | "low" | "negative" | "unhappy" => {
            CustomerSatisfaction::Dissatisfied
        }
        _ => CustomerSatisfaction::Neutral,
    }
}

/// Legacy analysis row with sentiment on the unit scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitScaleAnalysis {
    pub lead_id: String,
    pub sentiment_score: f64,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub customer_satisfaction: String,
    #[serde(default)]
    pub appointment_details: Option<String>,
}

impl UnitScaleAnalysis {
    /// Convert into a canonical analysis, rescaling sentiment with `2s - 1`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the unit-scale sentiment is outside
    /// `[0, 1]` or the resulting analysis fails validation.
    pub fn into_call_analysis(
        self,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<CallAnalysis, CoreError> {
        if !self.sentiment_score.is_finite() || !(0.0..=1.0).contains(&self.sentiment_score) {
            return Err(CoreError::Validation(format!(
                "unit-scale sentiment must be within [0, 1], got {}",
                self.sentiment_score
            )));
        }

        let analysis = CallAnalysis {
            id: id.into(),
            lead_id: self.lead_id,
            sentiment_score: self.sentiment_score.mul_add(2.0, -1.0),
            key_points: self.key_points,
            customer_satisfaction: satisfaction_from_label(&self.customer_satisfaction),
            appointment_details: self.appointment_details,
            risk_level: None,
            summary: None,
            topics_discussed: Vec::new(),
            action_items: Vec::new(),
            created_at,
        };
        analysis.validate()?;
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn legacy(sentiment: f64, satisfaction: &str) -> UnitScaleAnalysis {
        UnitScaleAnalysis {
            lead_id: "ld-1".into(),
            sentiment_score: sentiment,
            key_points: vec!["asked about pricing".into()],
            customer_satisfaction: satisfaction.into(),
            appointment_details: Some("No appointment details".into()),
        }
    }

    #[test]
    fn rescales_unit_sentiment_to_signed() {
        let now = Utc::now();
        let low = legacy(0.0, "satisfied")
            .into_call_analysis("an-1", now)
            .unwrap();
        let mid = legacy(0.5, "satisfied")
            .into_call_analysis("an-2", now)
            .unwrap();
        let high = legacy(1.0, "satisfied")
            .into_call_analysis("an-3", now)
            .unwrap();
        assert!((low.sentiment_score + 1.0).abs() < f64::EPSILON);
        assert!(mid.sentiment_score.abs() < f64::EPSILON);
        assert!((high.sentiment_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_signed_values_in_unit_shape() {
        assert!(legacy(-0.2, "neutral").into_call_analysis("an-1", Utc::now()).is_err());
    }

    #[test]
    fn dissatisfied_is_not_matched_as_satisfied() {
        assert_eq!(
            satisfaction_from_label("Dissatisfied"),
            CustomerSatisfaction::Dissatisfied
        );
        assert_eq!(
            satisfaction_from_label(" HIGH "),
            CustomerSatisfaction::Satisfied
        );
        assert_eq!(
            satisfaction_from_label("Unknown"),
            CustomerSatisfaction::Neutral
        );
    }
}
