//! # pulse-analysis
//!
//! Call transcript analysis for callpulse.
//!
//! - [`retry`]: exponential-backoff retry for any fallible async operation
//! - [`AnalysisProvider`]: the model backend, injected so tests and the CLI
//!   can replay recorded responses
//! - [`parser`]: JSON and labeled-text response parsing
//! - [`AnalysisService`]: provider call and parse under retry, then a
//!   follow-up recommendation for the new analysis

pub mod error;
pub mod parser;
pub mod provider;
pub mod retry;
pub mod service;

pub use error::AnalysisError;
pub use provider::{AnalysisProvider, RecordedResponse};
pub use retry::{RetryConfig, with_retry, with_retry_observed};
pub use service::{AnalysisOutcome, AnalysisService};
