use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{check_not_blank, check_unit_interval};
use crate::enums::{FollowUpOutcome, FollowUpPriority};
use crate::errors::CoreError;

/// One named contribution to an effectiveness score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EffectivenessFactor {
    pub name: String,
    pub impact: f64,
    pub suggestion: String,
}

/// Scoring of a specific proposed follow-up instant against a lead.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FollowUpEffectiveness {
    pub lead_id: String,
    pub original_priority: FollowUpPriority,
    pub scheduled_time: DateTime<Utc>,
    pub actual_follow_up_time: DateTime<Utc>,
    pub outcome: FollowUpOutcome,
    pub response_time_hours: f64,
    pub next_steps: Vec<String>,
    pub effectiveness_score: f64,
    pub factors: Vec<EffectivenessFactor>,
}

impl FollowUpEffectiveness {
    /// Check every bound before the report leaves the scoring service.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first violated field.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_not_blank("effectiveness lead_id", &self.lead_id)?;
        if !self.response_time_hours.is_finite() || self.response_time_hours < 0.0 {
            return Err(CoreError::Validation(format!(
                "response_time_hours must be non-negative, got {}",
                self.response_time_hours
            )));
        }
        check_unit_interval("effectiveness_score", self.effectiveness_score)?;
        if self.factors.is_empty() {
            return Err(CoreError::Validation(
                "effectiveness report has no factors".into(),
            ));
        }
        for factor in &self.factors {
            check_not_blank("factor name", &factor.name)?;
            check_not_blank("factor suggestion", &factor.suggestion)?;
            check_unit_interval(&format!("factor '{}' impact", factor.name), factor.impact)?;
        }
        for step in &self.next_steps {
            check_not_blank("next step", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn report() -> FollowUpEffectiveness {
        let at = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        FollowUpEffectiveness {
            lead_id: "ld-1".into(),
            original_priority: FollowUpPriority::High,
            scheduled_time: at,
            actual_follow_up_time: at,
            outcome: FollowUpOutcome::NoResponse,
            response_time_hours: 0.0,
            next_steps: vec![],
            effectiveness_score: 1.0,
            factors: vec![EffectivenessFactor {
                name: "Timing Alignment".into(),
                impact: 1.0,
                suggestion: "keep going".into(),
            }],
        }
    }

    #[test]
    fn valid_report_passes() {
        assert!(report().validate().is_ok());
    }

    #[test]
    fn impact_above_one_is_rejected() {
        let mut r = report();
        r.factors[0].impact = 1.2;
        let err = r.validate().unwrap_err().to_string();
        assert!(err.contains("Timing Alignment"), "{err}");
    }

    #[test]
    fn empty_factor_list_is_rejected() {
        let mut r = report();
        r.factors.clear();
        assert!(r.validate().is_err());
    }

    #[test]
    fn negative_response_time_is_rejected() {
        let mut r = report();
        r.response_time_hours = -0.5;
        assert!(r.validate().is_err());
    }
}
