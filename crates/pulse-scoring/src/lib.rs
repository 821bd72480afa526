//! # pulse-scoring
//!
//! Follow-up scoring for callpulse.
//!
//! - [`RecommendationEngine`] turns a lead's call analysis into a
//!   [`FollowUpRecommendation`](pulse_core::entities::FollowUpRecommendation):
//!   priority, time window, talking points, potential value, confidence.
//! - [`EffectivenessService`] scores a proposed follow-up instant against a
//!   lead, using an injected [`RecommendationSource`] for the lead's priority.
//! - [`policy`] holds every threshold and lookup table as named constants.

pub mod effectiveness;
pub mod error;
pub mod policy;
pub mod recommendation;
pub mod source;

pub use effectiveness::EffectivenessService;
pub use error::ScoringError;
pub use recommendation::RecommendationEngine;
pub use source::{
    FixedPriority, LatestAnalysisPriority, RecommendationSource, RecommendationStore,
};
