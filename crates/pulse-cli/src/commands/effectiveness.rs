use chrono::Utc;
use pulse_core::entities::{FollowUpEffectiveness, Lead};
use pulse_scoring::{
    EffectivenessService, FixedPriority, LatestAnalysisPriority, RecommendationSource,
};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EffectivenessArgs;
use crate::commands::shared::read_json;
use crate::output::output;

/// One report for `--at`, or every `--candidate` ranked best-first.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EffectivenessReport {
    Single(Box<FollowUpEffectiveness>),
    Ranked(Vec<FollowUpEffectiveness>),
}

/// Handle `pulse effectiveness`.
pub async fn handle(args: &EffectivenessArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&build(args).await?, flags.format)
}

pub async fn build(args: &EffectivenessArgs) -> anyhow::Result<EffectivenessReport> {
    let lead: Lead = read_json(&args.lead, "lead")?;
    match args.priority {
        Some(priority) => {
            let service = EffectivenessService::new(FixedPriority(priority));
            evaluate(service, &lead, args).await
        }
        None => {
            let service = EffectivenessService::new(LatestAnalysisPriority);
            evaluate(service, &lead, args).await
        }
    }
}

async fn evaluate<S: RecommendationSource>(
    service: EffectivenessService<S>,
    lead: &Lead,
    args: &EffectivenessArgs,
) -> anyhow::Result<EffectivenessReport> {
    if args.candidate.is_empty() {
        let at = args.at.unwrap_or_else(Utc::now);
        let report = service.calculate_effectiveness(Some(lead), at).await?;
        Ok(EffectivenessReport::Single(Box::new(report)))
    } else {
        let ranked = service.rank_candidates(Some(lead), &args.candidate).await?;
        Ok(EffectivenessReport::Ranked(ranked))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;
    use pulse_core::enums::{FollowUpOutcome, FollowUpPriority};
    use serde_json::json;

    use super::{EffectivenessReport, build};
    use crate::cli::root_commands::EffectivenessArgs;

    fn lead_file(dir: &tempfile::TempDir, status: &str) -> std::path::PathBuf {
        let path = dir.path().join("lead.json");
        let lead = json!({
            "id": "ld-9",
            "status": status,
            "created_at": "2024-06-01T09:00:00Z",
            "interactions": [
                {"id": "i-1", "type": "call", "date": "2024-06-02T09:00:00Z"}
            ]
        });
        std::fs::write(&path, lead.to_string()).expect("fixture should write");
        path
    }

    #[tokio::test]
    async fn single_report_for_fixed_priority() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let args = EffectivenessArgs {
            lead: lead_file(&dir, "converted"),
            at: None,
            candidate: vec![],
            priority: Some(FollowUpPriority::Critical),
        };

        let EffectivenessReport::Single(report) = build(&args).await.expect("should score") else {
            panic!("expected a single report");
        };
        assert_eq!(report.outcome, FollowUpOutcome::Successful);
        assert_eq!(report.original_priority, FollowUpPriority::Critical);
        assert_eq!(report.factors.len(), 3);
    }

    #[tokio::test]
    async fn candidates_are_ranked() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let now = Utc::now();
        let args = EffectivenessArgs {
            lead: lead_file(&dir, "new"),
            at: None,
            candidate: vec![now + Duration::hours(30), now + Duration::minutes(5)],
            priority: None,
        };

        let EffectivenessReport::Ranked(reports) = build(&args).await.expect("should score") else {
            panic!("expected ranked reports");
        };
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].scheduled_time, args.candidate[1]);
        // no analysis on file falls back to medium
        assert_eq!(reports[0].original_priority, FollowUpPriority::Medium);
    }
}
