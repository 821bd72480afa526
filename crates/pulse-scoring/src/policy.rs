//! Canonical scoring policy.
//!
//! Every threshold used by recommendation and effectiveness scoring lives
//! here. Priority is satisfaction-first: a dissatisfied customer is always
//! critical, otherwise sentiment decides. `risk_level` is recorded on the
//! analysis but does not influence priority.
//!
//! Sentiment is on the signed `[-1, 1]` scale.

use chrono::Duration;
use pulse_core::entities::CallAnalysis;
use pulse_core::enums::{CustomerSatisfaction, FollowUpPriority};

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Sentiment strictly below this is `High` priority.
pub const HIGH_PRIORITY_BELOW: f64 = 0.3;
/// Sentiment strictly below this (and not high) is `Medium` priority.
pub const MEDIUM_PRIORITY_BELOW: f64 = 0.7;

/// Classify a follow-up priority. First matching rule wins.
#[must_use]
pub fn classify_priority(
    satisfaction: CustomerSatisfaction,
    sentiment_score: f64,
) -> FollowUpPriority {
    if satisfaction == CustomerSatisfaction::Dissatisfied {
        FollowUpPriority::Critical
    } else if sentiment_score < HIGH_PRIORITY_BELOW {
        FollowUpPriority::High
    } else if sentiment_score < MEDIUM_PRIORITY_BELOW {
        FollowUpPriority::Medium
    } else {
        FollowUpPriority::Low
    }
}

/// [`classify_priority`] applied to an analysis.
#[must_use]
pub fn priority_for_analysis(analysis: &CallAnalysis) -> FollowUpPriority {
    classify_priority(analysis.customer_satisfaction, analysis.sentiment_score)
}

// ---------------------------------------------------------------------------
// Time tables
// ---------------------------------------------------------------------------

/// How soon after "now" a follow-up should happen.
#[must_use]
pub fn follow_up_offset(priority: FollowUpPriority) -> Duration {
    match priority {
        FollowUpPriority::Critical => Duration::hours(12),
        FollowUpPriority::High => Duration::hours(24),
        FollowUpPriority::Medium => Duration::days(3),
        FollowUpPriority::Low => Duration::weeks(1),
    }
}

/// Delay, in hours, after which timing alignment has fully decayed to zero.
///
/// Separate from [`follow_up_offset`]: this is tolerance to delay, not the
/// target window.
#[must_use]
pub const fn max_allowed_delay_hours(priority: FollowUpPriority) -> f64 {
    match priority {
        FollowUpPriority::Critical | FollowUpPriority::High => 2.0,
        FollowUpPriority::Medium => 4.0,
        FollowUpPriority::Low => 8.0,
    }
}

// ---------------------------------------------------------------------------
// Value and confidence
// ---------------------------------------------------------------------------

/// Default base deal value before the sentiment multiplier.
pub const DEFAULT_BASE_VALUE: f64 = 1000.0;

/// Sentiment at or above this earns [`STRONG_VALUE_MULTIPLIER`].
pub const STRONG_SENTIMENT_FROM: f64 = 0.7;
/// Sentiment in `[MODERATE_SENTIMENT_FROM, STRONG_SENTIMENT_FROM)` earns
/// [`MODERATE_VALUE_MULTIPLIER`].
pub const MODERATE_SENTIMENT_FROM: f64 = 0.4;
pub const STRONG_VALUE_MULTIPLIER: f64 = 1.5;
pub const MODERATE_VALUE_MULTIPLIER: f64 = 0.8;

/// Base value scaled by the sentiment multiplier, rounded to an integer.
#[must_use]
pub fn potential_value(base_value: f64, sentiment_score: f64) -> f64 {
    let multiplier = if sentiment_score >= STRONG_SENTIMENT_FROM {
        STRONG_VALUE_MULTIPLIER
    } else if sentiment_score >= MODERATE_SENTIMENT_FROM {
        MODERATE_VALUE_MULTIPLIER
    } else {
        1.0
    };
    (base_value * multiplier).round()
}

/// Rescale signed sentiment onto `[0, 1]`. Input is assumed validated.
#[must_use]
pub fn confidence(sentiment_score: f64) -> f64 {
    f64::midpoint(sentiment_score, 1.0)
}

// ---------------------------------------------------------------------------
// Talking points
// ---------------------------------------------------------------------------

/// Keyword (matched case-insensitively) to talking-point prefix. First match wins.
pub const TALKING_POINT_RULES: &[(&str, &str)] = &[
    ("price", "Discuss pricing options — "),
    ("feature", "Highlight key features — "),
];

pub const DEFAULT_TALKING_POINT_PREFIX: &str = "Follow up on — ";

/// Prefix a key point according to [`TALKING_POINT_RULES`].
#[must_use]
pub fn talking_point(key_point: &str) -> String {
    let lowered = key_point.to_lowercase();
    let prefix = TALKING_POINT_RULES
        .iter()
        .find(|(keyword, _)| lowered.contains(*keyword))
        .map_or(DEFAULT_TALKING_POINT_PREFIX, |&(_, prefix)| prefix);
    format!("{prefix}{key_point}")
}

// ---------------------------------------------------------------------------
// Effectiveness
// ---------------------------------------------------------------------------

/// Interaction count at which lead interest saturates.
pub const INTEREST_SATURATION: usize = 5;
/// Interaction count below which more follow-up is suggested.
pub const INTEREST_LOW_BELOW: usize = 3;
/// Contact within this many days counts as recent engagement.
pub const RECENT_ENGAGEMENT_DAYS: i64 = 7;
pub const RECENT_ENGAGEMENT_IMPACT: f64 = 1.0;
pub const STALE_ENGAGEMENT_IMPACT: f64 = 0.5;
/// Factors scoring below this contribute their suggestion to next steps.
pub const NEXT_STEP_BELOW: f64 = 0.7;

/// Response time at or under this many hours is "excellent".
pub const EXCELLENT_RESPONSE_HOURS: f64 = 2.0;
/// Response time at or under this many hours is "good".
pub const GOOD_RESPONSE_HOURS: f64 = 4.0;
