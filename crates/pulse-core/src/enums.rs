//! Classification enums for leads, analyses, and follow-ups.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the storage/wire representation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Implements `Display` via `as_str()` and `FromStr` by matching every variant's
/// `as_str()` value.
macro_rules! str_enum_impls {
    ($ty:ident, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                $(
                    if normalized == Self::$variant.as_str() {
                        return Ok(Self::$variant);
                    }
                )+
                Err(CoreError::Validation(format!(
                    "unknown {}: '{s}'",
                    stringify!($ty)
                )))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// LeadStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a lead.
///
/// ```text
/// new → in_progress → converted
///                   → lost
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    InProgress,
    Converted,
    Lost,
}

impl LeadStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::New => &[Self::InProgress, Self::Converted, Self::Lost],
            Self::InProgress => &[Self::Converted, Self::Lost],
            Self::Converted | Self::Lost => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Converted => "converted",
            Self::Lost => "lost",
        }
    }
}

str_enum_impls!(LeadStatus, [New, InProgress, Converted, Lost]);

// ---------------------------------------------------------------------------
// CustomerSatisfaction
// ---------------------------------------------------------------------------

/// Customer satisfaction category reported by the call analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSatisfaction {
    Satisfied,
    Neutral,
    Dissatisfied,
}

impl CustomerSatisfaction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Satisfied => "satisfied",
            Self::Neutral => "neutral",
            Self::Dissatisfied => "dissatisfied",
        }
    }
}

str_enum_impls!(CustomerSatisfaction, [Satisfied, Neutral, Dissatisfied]);

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Churn/deal risk reported by the call analysis. Stored, not used for priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

str_enum_impls!(RiskLevel, [Low, Medium, High]);

// ---------------------------------------------------------------------------
// FollowUpPriority
// ---------------------------------------------------------------------------

/// Coarse urgency classification driving follow-up timing.
///
/// Variants are declared from most to least urgent, so `Ord` sorts
/// `Critical` first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl FollowUpPriority {
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

str_enum_impls!(FollowUpPriority, [Critical, High, Medium, Low]);

// ---------------------------------------------------------------------------
// FollowUpOutcome
// ---------------------------------------------------------------------------

/// Outcome classification of a follow-up, derived from the lead's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpOutcome {
    Successful,
    InProgress,
    NoResponse,
    NotInterested,
}

impl FollowUpOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Successful => "successful",
            Self::InProgress => "in_progress",
            Self::NoResponse => "no_response",
            Self::NotInterested => "not_interested",
        }
    }
}

str_enum_impls!(
    FollowUpOutcome,
    [Successful, InProgress, NoResponse, NotInterested]
);

// ---------------------------------------------------------------------------
// InteractionKind
// ---------------------------------------------------------------------------

/// Channel of a recorded interaction with a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Call,
    Email,
    Sms,
    Meeting,
    Note,
}

impl InteractionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Meeting => "meeting",
            Self::Note => "note",
        }
    }
}

str_enum_impls!(InteractionKind, [Call, Email, Sms, Meeting, Note]);

// ---------------------------------------------------------------------------
// ErrorSeverity
// ---------------------------------------------------------------------------

/// Severity attached to a captured error report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

str_enum_impls!(ErrorSeverity, [Low, Medium, High, Critical]);
