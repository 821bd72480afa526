use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::CallAnalysis;
use crate::enums::{InteractionKind, LeadStatus};
use crate::errors::CoreError;

/// One recorded touchpoint with a lead.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Interaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub date: DateTime<Utc>,
}

/// A single recorded phone call plus its contact and follow-up metadata.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Lead {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub call_status: Option<String>,
    /// Call duration in seconds.
    #[serde(default)]
    pub call_length: Option<f64>,
    pub status: LeadStatus,
    #[serde(default)]
    pub call_analyses: Vec<CallAnalysis>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub last_contact_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// Most recently appended analysis, if any.
    #[must_use]
    pub fn latest_analysis(&self) -> Option<&CallAnalysis> {
        self.call_analyses.last()
    }

    #[must_use]
    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Whether the last contact happened within `window` before `now`.
    ///
    /// A last-contact timestamp in the future counts as recent.
    #[must_use]
    pub fn contacted_within(&self, window: Duration, now: DateTime<Utc>) -> bool {
        self.last_contact_date
            .is_some_and(|last| now.signed_duration_since(last) < window)
    }

    /// Append a completed analysis.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the analysis is invalid or belongs to
    /// another lead.
    pub fn record_analysis(&mut self, analysis: CallAnalysis) -> Result<(), CoreError> {
        analysis.validate()?;
        if analysis.lead_id != self.id {
            return Err(CoreError::Validation(format!(
                "analysis {} belongs to lead {}, not {}",
                analysis.id, analysis.lead_id, self.id
            )));
        }
        self.call_analyses.push(analysis);
        Ok(())
    }

    /// Append an interaction and move `last_contact_date` forward to it.
    pub fn record_interaction(&mut self, interaction: Interaction) {
        if self
            .last_contact_date
            .is_none_or(|last| interaction.date > last)
        {
            self.last_contact_date = Some(interaction.date);
        }
        self.interactions.push(interaction);
    }

    /// Move the lead to `next` if the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a disallowed transition.
    pub fn transition_to(&mut self, next: LeadStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::Validation(format!(
                "lead {} cannot move from {} to {next}",
                self.id, self.status
            )));
        }
        self.status = next;
        Ok(())
    }
}
