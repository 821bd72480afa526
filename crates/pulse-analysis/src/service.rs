//! Transcript analysis with retries, followed by a recommendation.

use std::sync::Arc;

use pulse_config::PulseConfig;
use pulse_core::clock::{Clock, SystemClock};
use pulse_core::entities::{CallAnalysis, FollowUpRecommendation, Lead};
use pulse_scoring::RecommendationEngine;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::parser::parse_response;
use crate::provider::AnalysisProvider;
use crate::retry::{RetryConfig, with_retry_observed};

/// A fresh analysis and the recommendation derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub analysis: CallAnalysis,
    pub recommendation: FollowUpRecommendation,
    /// Provider calls made, including the successful one.
    pub attempts: u32,
}

pub struct AnalysisService<P> {
    provider: P,
    retry: RetryConfig,
    engine: RecommendationEngine,
    clock: Arc<dyn Clock>,
}

impl<P: AnalysisProvider> AnalysisService<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            retry: RetryConfig::default(),
            engine: RecommendationEngine::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Build a service using the retry and scoring sections of `config`.
    #[must_use]
    pub fn from_config(provider: P, config: &PulseConfig) -> Self {
        Self {
            provider,
            retry: RetryConfig::from(&config.retry),
            engine: RecommendationEngine::from_settings(&config.scoring),
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Use `clock` for analysis timestamps and recommendation windows.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.engine = self.engine.with_clock(Arc::clone(&clock));
        self.clock = clock;
        self
    }

    /// Analyze `transcript` for `lead` and recommend a follow-up.
    ///
    /// The provider call and response parsing run together under the retry
    /// policy, so an unparseable response is asked for again.
    ///
    /// # Errors
    ///
    /// - `AnalysisError::InvalidInput` for a blank lead id or empty
    ///   transcript, without calling the provider.
    /// - The last provider or parse error once retries are exhausted.
    /// - Validation or scoring errors for the parsed analysis.
    pub async fn analyze_transcript(
        &self,
        lead: &Lead,
        transcript: &str,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        if lead.id.trim().is_empty() {
            return Err(AnalysisError::InvalidInput("lead id is required".into()));
        }
        if transcript.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(format!(
                "transcript for lead {} is empty",
                lead.id
            )));
        }

        let provider = &self.provider;
        let lead_id = lead.id.as_str();
        let mut retries = 0;
        let parsed = with_retry_observed(
            &self.retry,
            |attempt, _: &AnalysisError| retries = attempt,
            move || async move {
                let raw = provider.analyze(lead_id, transcript).await?;
                parse_response(&raw)
            },
        )
        .await?;

        let analysis =
            parsed.into_call_analysis(Uuid::new_v4().to_string(), lead_id, self.clock.now())?;
        let recommendation = self.engine.generate_recommendation(lead, &analysis)?;

        tracing::info!(
            lead_id,
            analysis_id = %analysis.id,
            priority = %recommendation.priority,
            attempts = retries + 1,
            "analyzed call transcript"
        );
        Ok(AnalysisOutcome {
            analysis,
            recommendation,
            attempts: retries + 1,
        })
    }
}
