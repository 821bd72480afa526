//! Follow-up recommendation generation.

use std::collections::HashSet;
use std::sync::Arc;

use pulse_config::ScoringSettings;
use pulse_core::clock::{Clock, SystemClock};
use pulse_core::entities::{CallAnalysis, FollowUpRecommendation, Lead, TimeWindow};
use pulse_core::enums::{CustomerSatisfaction, FollowUpPriority};

use crate::error::ScoringError;
use crate::policy;

/// Builds [`FollowUpRecommendation`]s from a lead and one of its analyses.
///
/// Stateless apart from the configured base value and the clock, so the
/// same inputs and clock reading always give the same recommendation.
#[derive(Clone)]
pub struct RecommendationEngine {
    base_value: f64,
    clock: Arc<dyn Clock>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(policy::DEFAULT_BASE_VALUE)
    }
}

impl RecommendationEngine {
    #[must_use]
    pub fn new(base_value: f64) -> Self {
        Self {
            base_value,
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &ScoringSettings) -> Self {
        Self::new(settings.base_value)
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Generate a recommendation for `lead` from `analysis`.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidInput` when the analysis belongs to a
    /// different lead, and `ScoringError::Core` when the analysis fails
    /// validation.
    pub fn generate_recommendation(
        &self,
        lead: &Lead,
        analysis: &CallAnalysis,
    ) -> Result<FollowUpRecommendation, ScoringError> {
        analysis.validate()?;
        if analysis.lead_id != lead.id {
            return Err(ScoringError::InvalidInput(format!(
                "analysis {} is for lead {}, not {}",
                analysis.id, analysis.lead_id, lead.id
            )));
        }

        let now = self.clock.now();
        let priority = policy::priority_for_analysis(analysis);

        let recommendation = FollowUpRecommendation {
            lead_id: lead.id.clone(),
            priority,
            recommended_time_frame: TimeWindow {
                min: now,
                max: now + policy::follow_up_offset(priority),
            },
            reason: reason(analysis.customer_satisfaction, priority).to_string(),
            suggested_talking_points: talking_points(&analysis.key_points),
            potential_value: policy::potential_value(self.base_value, analysis.sentiment_score),
            confidence: policy::confidence(analysis.sentiment_score),
            next_steps: next_steps(analysis),
            created_at: now,
        };
        recommendation.validate()?;

        tracing::debug!(
            lead_id = %lead.id,
            priority = %recommendation.priority,
            "generated follow-up recommendation"
        );
        Ok(recommendation)
    }

    /// Generate a recommendation from the lead's most recent analysis.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidInput` when the lead has no analysis,
    /// otherwise as [`Self::generate_recommendation`].
    pub fn recommend_for_lead(&self, lead: &Lead) -> Result<FollowUpRecommendation, ScoringError> {
        let analysis = lead.latest_analysis().ok_or_else(|| {
            ScoringError::InvalidInput(format!("lead {} has no call analysis", lead.id))
        })?;
        self.generate_recommendation(lead, analysis)
    }
}

/// Deduplicated, classified talking points in first-occurrence order.
fn talking_points(key_points: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    key_points
        .iter()
        .map(|point| point.trim())
        .filter(|point| !point.is_empty() && seen.insert(*point))
        .map(policy::talking_point)
        .collect()
}

const fn reason(satisfaction: CustomerSatisfaction, priority: FollowUpPriority) -> &'static str {
    if matches!(satisfaction, CustomerSatisfaction::Dissatisfied) {
        return "Customer showed signs of dissatisfaction";
    }
    match priority {
        FollowUpPriority::Critical | FollowUpPriority::High => {
            "Low sentiment on the call; re-engage before interest fades"
        }
        FollowUpPriority::Medium => "Mixed sentiment; follow up on open questions",
        FollowUpPriority::Low => "Regular follow-up recommended",
    }
}

fn next_steps(analysis: &CallAnalysis) -> Vec<String> {
    let mut steps = vec![String::from("Schedule follow-up call")];
    if analysis.customer_satisfaction == CustomerSatisfaction::Dissatisfied {
        steps.push(String::from("Prepare resolution plan"));
    }
    if let Some(details) = analysis.appointment() {
        steps.push(format!("Confirm appointment: {details}"));
    }
    steps
}
