//! Analysis pipeline error types.

use pulse_core::errors::CoreError;
use pulse_scoring::ScoringError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The request itself is unusable (for example an empty transcript).
    /// Never retried.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The analysis provider failed to produce a response.
    #[error("Analysis provider failed: {0}")]
    Provider(String),

    /// The provider responded but the response could not be understood.
    #[error("Failed to parse analysis response: {0}")]
    Parse(String),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
