//! The model backend that turns a transcript into a raw analysis response.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AnalysisError;

/// Produces the raw model output for one call transcript.
///
/// The output is parsed by [`crate::parser::parse_response`], so providers
/// may return either a JSON object or labeled text.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, lead_id: &str, transcript: &str) -> Result<String, AnalysisError>;
}

#[async_trait]
impl<P: AnalysisProvider + ?Sized> AnalysisProvider for Arc<P> {
    async fn analyze(&self, lead_id: &str, transcript: &str) -> Result<String, AnalysisError> {
        (**self).analyze(lead_id, transcript).await
    }
}

/// Replays a previously recorded model response for every request.
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    body: String,
}

impl RecordedResponse {
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl AnalysisProvider for RecordedResponse {
    async fn analyze(&self, lead_id: &str, _transcript: &str) -> Result<String, AnalysisError> {
        if self.body.trim().is_empty() {
            return Err(AnalysisError::Provider(format!(
                "recorded response for lead {lead_id} is empty"
            )));
        }
        Ok(self.body.clone())
    }
}
