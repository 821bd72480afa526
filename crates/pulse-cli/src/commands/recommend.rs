use anyhow::Context;
use chrono::Utc;
use pulse_config::PulseConfig;
use pulse_core::adapters::UnitScaleAnalysis;
use pulse_core::entities::{CallAnalysis, FollowUpRecommendation, Lead};
use pulse_scoring::RecommendationEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RecommendArgs;
use crate::commands::shared::read_json;
use crate::output::output;

/// Handle `pulse recommend`.
pub fn handle(
    args: &RecommendArgs,
    config: &PulseConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(&build(args, config)?, flags.format)
}

pub fn build(args: &RecommendArgs, config: &PulseConfig) -> anyhow::Result<FollowUpRecommendation> {
    let lead: Lead = read_json(&args.lead, "lead")?;
    let engine = RecommendationEngine::from_settings(&config.scoring);

    let recommendation = match &args.analysis {
        None => engine.recommend_for_lead(&lead),
        Some(path) => {
            let analysis = if args.unit_scale {
                let legacy: UnitScaleAnalysis = read_json(path, "analysis")?;
                legacy
                    .into_call_analysis(format!("legacy-{}", lead.id), Utc::now())
                    .context("legacy analysis is invalid")?
            } else {
                read_json::<CallAnalysis>(path, "analysis")?
            };
            engine.generate_recommendation(&lead, &analysis)
        }
    };

    recommendation.with_context(|| format!("failed to recommend a follow-up for lead {}", lead.id))
}
