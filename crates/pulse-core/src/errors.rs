//! Error type shared by the core entities and adapters.
//!
//! Scoring, analysis and config failures have their own enums in their
//! crates and wrap this one where entity validation can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A field is out of range, blank, or inconsistent with another field.
    #[error("Validation error: {0}")]
    Validation(String),
}
