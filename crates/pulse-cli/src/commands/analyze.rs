use pulse_analysis::{AnalysisOutcome, AnalysisService, RecordedResponse};
use pulse_config::PulseConfig;
use pulse_core::entities::Lead;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::commands::shared::{read_json, read_text};
use crate::output::output;

/// Handle `pulse analyze`.
pub async fn handle(
    args: &AnalyzeArgs,
    config: &PulseConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(&build(args, config).await?, flags.format)
}

pub async fn build(args: &AnalyzeArgs, config: &PulseConfig) -> anyhow::Result<AnalysisOutcome> {
    let lead: Lead = read_json(&args.lead, "lead")?;
    let transcript = read_text(&args.transcript, "transcript")?;
    let response = read_text(&args.response, "model response")?;

    let service = AnalysisService::from_config(RecordedResponse::new(response), config);
    Ok(service.analyze_transcript(&lead, &transcript).await?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulse_config::PulseConfig;
    use pulse_core::enums::FollowUpPriority;

    use super::build;
    use crate::cli::root_commands::AnalyzeArgs;

    #[tokio::test]
    async fn replays_recorded_labeled_response() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let lead = dir.path().join("lead.json");
        let transcript = dir.path().join("call.txt");
        let response = dir.path().join("response.txt");
        std::fs::write(
            &lead,
            r#"{"id": "ld-3", "status": "new", "created_at": "2024-06-01T09:00:00Z"}"#,
        )
        .expect("fixture should write");
        std::fs::write(&transcript, "Agent: Hi! Customer: Tell me about pricing.")
            .expect("fixture should write");
        let recorded = "Sentiment Score: 0.75\nKey Points:\n- Asked about price\n\n\
                        Customer Satisfaction: satisfied\n";
        std::fs::write(&response, recorded).expect("fixture should write");

        let args = AnalyzeArgs {
            lead,
            transcript,
            response,
        };
        let outcome = build(&args, &PulseConfig::default())
            .await
            .expect("analysis should succeed");

        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.analysis.lead_id, "ld-3");
        assert_eq!(outcome.recommendation.priority, FollowUpPriority::Low);
        assert_eq!(
            outcome.recommendation.suggested_talking_points,
            vec!["Discuss pricing options — Asked about price".to_string()]
        );
    }

    #[tokio::test]
    async fn empty_transcript_fails_fast() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let lead = dir.path().join("lead.json");
        let transcript = dir.path().join("call.txt");
        let response = dir.path().join("response.txt");
        std::fs::write(
            &lead,
            r#"{"id": "ld-3", "status": "new", "created_at": "2024-06-01T09:00:00Z"}"#,
        )
        .expect("fixture should write");
        std::fs::write(&transcript, "").expect("fixture should write");
        std::fs::write(&response, "Sentiment Score: 0.2").expect("fixture should write");

        let args = AnalyzeArgs {
            lead,
            transcript,
            response,
        };
        let err = build(&args, &PulseConfig::default())
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("Invalid input"));
    }
}
