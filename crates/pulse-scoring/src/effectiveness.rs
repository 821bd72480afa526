//! Effectiveness scoring of a proposed follow-up instant.
//!
//! Three factors are evaluated in a fixed order (timing, interest,
//! engagement). The score is their unweighted mean. Any failure after the
//! lead has been accepted is captured at `high` severity with the lead id
//! before it is returned.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use pulse_core::clock::{Clock, SystemClock};
use pulse_core::entities::{EffectivenessFactor, FollowUpEffectiveness, Lead};
use pulse_core::enums::{ErrorSeverity, FollowUpOutcome, FollowUpPriority, LeadStatus};
use pulse_core::telemetry::{ErrorReporter, TracingReporter, capture_error};

use crate::error::ScoringError;
use crate::policy;
use crate::source::RecommendationSource;

pub const TIMING_ALIGNMENT: &str = "Timing Alignment";
pub const LEAD_INTEREST_LEVEL: &str = "Lead Interest Level";
pub const ENGAGEMENT_QUALITY: &str = "Engagement Quality";

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Scores proposed follow-up instants for leads.
pub struct EffectivenessService<S> {
    source: S,
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn ErrorReporter>,
}

impl<S: RecommendationSource> EffectivenessService<S> {
    /// Create a service reading the system clock and reporting through `tracing`.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            reporter: Arc::new(TracingReporter),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Score a follow-up at `follow_up_at` for `lead`.
    ///
    /// `lead` is optional because it usually comes from a lookup that may
    /// miss; a missing lead is a caller bug and fails immediately.
    ///
    /// # Errors
    ///
    /// - `ScoringError::InvalidInput` when `lead` is `None` or has a blank id.
    /// - Any source or validation error, after it has been reported.
    pub async fn calculate_effectiveness(
        &self,
        lead: Option<&Lead>,
        follow_up_at: DateTime<Utc>,
    ) -> Result<FollowUpEffectiveness, ScoringError> {
        let lead = accepted_lead(lead)?;
        let now = self.clock.now();
        self.score_reported(lead, follow_up_at, now).await
    }

    /// Score every candidate instant and return the reports best-first.
    ///
    /// All candidates are measured against a single reading of the clock.
    /// Ties keep candidate order.
    ///
    /// # Errors
    ///
    /// Fails on the first candidate that fails [`Self::calculate_effectiveness`].
    pub async fn rank_candidates(
        &self,
        lead: Option<&Lead>,
        candidates: &[DateTime<Utc>],
    ) -> Result<Vec<FollowUpEffectiveness>, ScoringError> {
        let lead = accepted_lead(lead)?;
        let now = self.clock.now();
        let mut reports = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            reports.push(self.score_reported(lead, *candidate, now).await?);
        }
        reports.sort_by(|a, b| b.effectiveness_score.total_cmp(&a.effectiveness_score));
        Ok(reports)
    }

    async fn score_reported(
        &self,
        lead: &Lead,
        follow_up_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<FollowUpEffectiveness, ScoringError> {
        match self.score(lead, follow_up_at, now).await {
            Ok(report) => Ok(report),
            Err(error) => {
                capture_error(
                    self.reporter.as_ref(),
                    &error,
                    ErrorSeverity::High,
                    &[("lead_id", lead.id.as_str())],
                );
                Err(error)
            }
        }
    }

    async fn score(
        &self,
        lead: &Lead,
        follow_up_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<FollowUpEffectiveness, ScoringError> {
        let priority = self.source.priority_for(lead).await?;
        let response_time_hours = response_time_hours(follow_up_at, now);

        let factors = vec![
            timing_factor(priority, response_time_hours),
            interest_factor(lead),
            engagement_factor(lead, now),
        ];

        let report = FollowUpEffectiveness {
            lead_id: lead.id.clone(),
            original_priority: priority,
            scheduled_time: follow_up_at,
            actual_follow_up_time: now,
            outcome: determine_outcome(lead),
            response_time_hours,
            next_steps: next_steps(&factors),
            effectiveness_score: mean_impact(&factors),
            factors,
        };
        report.validate()?;

        tracing::debug!(
            lead_id = %lead.id,
            priority = %priority,
            score = report.effectiveness_score,
            "scored follow-up effectiveness"
        );
        Ok(report)
    }
}

fn accepted_lead(lead: Option<&Lead>) -> Result<&Lead, ScoringError> {
    let lead = lead.ok_or_else(|| ScoringError::InvalidInput("lead is required".into()))?;
    if lead.id.trim().is_empty() {
        return Err(ScoringError::InvalidInput("lead id is required".into()));
    }
    Ok(lead)
}

/// Absolute distance between the two instants in hours.
#[must_use]
pub fn response_time_hours(scheduled: DateTime<Utc>, actual: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let millis = (actual - scheduled).num_milliseconds().unsigned_abs() as f64;
    (millis / MILLIS_PER_HOUR).max(0.0)
}

/// Unweighted mean of factor impacts; `0.0` for an empty slice.
#[must_use]
pub fn mean_impact(factors: &[EffectivenessFactor]) -> f64 {
    if factors.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = factors.len() as f64;
    factors.iter().map(|factor| factor.impact).sum::<f64>() / count
}

#[must_use]
pub const fn determine_outcome(lead: &Lead) -> FollowUpOutcome {
    match lead.status {
        LeadStatus::Converted => FollowUpOutcome::Successful,
        LeadStatus::Lost => FollowUpOutcome::NotInterested,
        LeadStatus::New | LeadStatus::InProgress => {
            if lead.last_contact_date.is_some() {
                FollowUpOutcome::InProgress
            } else {
                FollowUpOutcome::NoResponse
            }
        }
    }
}

fn timing_factor(priority: FollowUpPriority, response_time_hours: f64) -> EffectivenessFactor {
    let tolerance = policy::max_allowed_delay_hours(priority);
    let suggestion = if response_time_hours <= policy::EXCELLENT_RESPONSE_HOURS {
        "Excellent response time, maintain this level of promptness"
    } else if response_time_hours <= policy::GOOD_RESPONSE_HOURS {
        "Good response time, try to improve slightly"
    } else {
        "Response time needs improvement, consider setting up automated initial responses"
    };
    EffectivenessFactor {
        name: TIMING_ALIGNMENT.into(),
        impact: (1.0 - response_time_hours / tolerance).max(0.0),
        suggestion: suggestion.into(),
    }
}

fn interest_factor(lead: &Lead) -> EffectivenessFactor {
    let count = lead.interaction_count();
    let suggestion = if count == 0 {
        "Initial contact needed - prioritize this lead"
    } else if count < policy::INTEREST_LOW_BELOW {
        "More follow-up needed to gauge interest level"
    } else {
        "Good engagement level, focus on conversion"
    };
    #[allow(clippy::cast_precision_loss)]
    let impact = (count as f64 / policy::INTEREST_SATURATION as f64).min(1.0);
    EffectivenessFactor {
        name: LEAD_INTEREST_LEVEL.into(),
        impact,
        suggestion: suggestion.into(),
    }
}

/// A contact exactly `RECENT_ENGAGEMENT_DAYS` ago scores as stale but is
/// still described as recent engagement.
fn engagement_factor(lead: &Lead, now: DateTime<Utc>) -> EffectivenessFactor {
    let window = Duration::days(policy::RECENT_ENGAGEMENT_DAYS);
    let recent = lead.contacted_within(window, now);
    let suggestion = match lead.last_contact_date {
        None => "No recent engagement - immediate follow-up required",
        Some(last) if now.signed_duration_since(last) <= window => {
            "Recent engagement is positive, maintain momentum"
        }
        Some(_) => "Re-engagement needed - consider a new approach",
    };
    EffectivenessFactor {
        name: ENGAGEMENT_QUALITY.into(),
        impact: if recent {
            policy::RECENT_ENGAGEMENT_IMPACT
        } else {
            policy::STALE_ENGAGEMENT_IMPACT
        },
        suggestion: suggestion.into(),
    }
}

fn next_steps(factors: &[EffectivenessFactor]) -> Vec<String> {
    factors
        .iter()
        .filter(|factor| factor.impact < policy::NEXT_STEP_BELOW)
        .map(|factor| factor.suggestion.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn mean_of_empty_factor_list_is_zero() {
        assert!(mean_impact(&[]).abs() < f64::EPSILON);
        assert!(!mean_impact(&[]).is_nan());
    }

    #[test]
    fn response_time_is_symmetric() {
        let early = now() - Duration::minutes(90);
        let late = now() + Duration::minutes(90);
        assert!((response_time_hours(early, now()) - 1.5).abs() < 1e-9);
        assert!((response_time_hours(late, now()) - 1.5).abs() < 1e-9);
        assert!(response_time_hours(now(), now()).abs() < f64::EPSILON);
    }

    #[test]
    fn on_time_critical_follow_up_has_full_timing_impact() {
        let factor = timing_factor(FollowUpPriority::Critical, 0.0);
        assert!((factor.impact - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn timing_impact_floors_at_zero() {
        let factor = timing_factor(FollowUpPriority::Low, 20.0);
        assert!(factor.impact.abs() < f64::EPSILON);
        assert!(factor.suggestion.starts_with("Response time needs improvement"));
    }

    #[test]
    fn contact_exactly_a_week_ago_is_stale_but_described_as_recent() {
        let mut lead = Lead {
            id: "ld-7".into(),
            name: String::new(),
            email: None,
            phone_number: None,
            company: None,
            call_status: None,
            call_length: None,
            status: LeadStatus::InProgress,
            call_analyses: vec![],
            interactions: vec![],
            last_contact_date: Some(now() - Duration::days(policy::RECENT_ENGAGEMENT_DAYS)),
            created_at: now() - Duration::days(30),
        };

        let factor = engagement_factor(&lead, now());
        assert!((factor.impact - policy::STALE_ENGAGEMENT_IMPACT).abs() < f64::EPSILON);
        assert_eq!(
            factor.suggestion,
            "Recent engagement is positive, maintain momentum"
        );

        lead.last_contact_date = Some(now() - Duration::days(7) - Duration::seconds(1));
        let factor = engagement_factor(&lead, now());
        assert_eq!(
            factor.suggestion,
            "Re-engagement needed - consider a new approach"
        );
    }

    #[test]
    fn timing_suggestion_bands() {
        assert!(timing_factor(FollowUpPriority::Medium, 2.0).suggestion.starts_with("Excellent"));
        assert!(timing_factor(FollowUpPriority::Medium, 3.5).suggestion.starts_with("Good"));
    }
}
