//! Scoring error types.

use pulse_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// A required input was missing. Never retried.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The recommendation source has nothing for this lead.
    #[error("No recommendation found for lead {lead_id}")]
    NotFound { lead_id: String },

    /// The recommendation source failed.
    #[error("Recommendation source failed: {0}")]
    Source(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
