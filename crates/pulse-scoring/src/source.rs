//! Where the effectiveness scorer gets a lead's priority from.
//!
//! [`EffectivenessService`](crate::EffectivenessService) takes a
//! [`RecommendationSource`] at construction so persistence can be swapped
//! for a stub in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pulse_core::entities::{FollowUpRecommendation, Lead};
use pulse_core::enums::FollowUpPriority;
use tokio::sync::RwLock;

use crate::error::ScoringError;
use crate::policy;

/// Supplies the current follow-up priority for a lead.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn priority_for(&self, lead: &Lead) -> Result<FollowUpPriority, ScoringError>;
}

#[async_trait]
impl<S: RecommendationSource + ?Sized> RecommendationSource for Arc<S> {
    async fn priority_for(&self, lead: &Lead) -> Result<FollowUpPriority, ScoringError> {
        (**self).priority_for(lead).await
    }
}

/// Derives priority from the lead's most recent analysis with the same
/// rules as [`RecommendationEngine`](crate::RecommendationEngine).
///
/// A lead that has not been analyzed yet is treated as `Medium`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestAnalysisPriority;

#[async_trait]
impl RecommendationSource for LatestAnalysisPriority {
    async fn priority_for(&self, lead: &Lead) -> Result<FollowUpPriority, ScoringError> {
        Ok(lead
            .latest_analysis()
            .map_or(FollowUpPriority::Medium, policy::priority_for_analysis))
    }
}

/// In-memory store of generated recommendations keyed by lead id.
#[derive(Debug, Default)]
pub struct RecommendationStore {
    by_lead: RwLock<HashMap<String, FollowUpRecommendation>>,
}

impl RecommendationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `recommendation`, replacing any previous one for the same lead.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::Core` if the recommendation fails validation.
    pub async fn save(&self, recommendation: FollowUpRecommendation) -> Result<(), ScoringError> {
        recommendation.validate()?;
        self.by_lead
            .write()
            .await
            .insert(recommendation.lead_id.clone(), recommendation);
        Ok(())
    }

    pub async fn get(&self, lead_id: &str) -> Option<FollowUpRecommendation> {
        self.by_lead.read().await.get(lead_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.by_lead.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.by_lead.read().await.is_empty()
    }
}

#[async_trait]
impl RecommendationSource for RecommendationStore {
    async fn priority_for(&self, lead: &Lead) -> Result<FollowUpPriority, ScoringError> {
        self.by_lead
            .read()
            .await
            .get(&lead.id)
            .map(|recommendation| recommendation.priority)
            .ok_or_else(|| ScoringError::NotFound {
                lead_id: lead.id.clone(),
            })
    }
}

/// Always answers with the same priority.
#[derive(Debug, Clone, Copy)]
pub struct FixedPriority(pub FollowUpPriority);

#[async_trait]
impl RecommendationSource for FixedPriority {
    async fn priority_for(&self, _lead: &Lead) -> Result<FollowUpPriority, ScoringError> {
        Ok(self.0)
    }
}
