use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use pulse_core::enums::FollowUpPriority;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Recommend a follow-up for a lead from a call analysis.
    Recommend(RecommendArgs),
    /// Score how effective a follow-up at a given time would be.
    Effectiveness(EffectivenessArgs),
    /// Analyze a transcript by replaying a recorded model response.
    Analyze(AnalyzeArgs),
    /// Print the resolved configuration.
    Config,
}

/// Arguments for `pulse recommend`.
#[derive(Clone, Debug, Args)]
pub struct RecommendArgs {
    /// Lead JSON file
    #[arg(long)]
    pub lead: PathBuf,

    /// Call analysis JSON file (defaults to the lead's latest analysis)
    #[arg(long)]
    pub analysis: Option<PathBuf>,

    /// Read the analysis file as a legacy row with sentiment in [0, 1]
    #[arg(long, requires = "analysis")]
    pub unit_scale: bool,
}

/// Arguments for `pulse effectiveness`.
#[derive(Clone, Debug, Args)]
pub struct EffectivenessArgs {
    /// Lead JSON file
    #[arg(long)]
    pub lead: PathBuf,

    /// Proposed follow-up time, RFC 3339 (defaults to now)
    #[arg(long, conflicts_with = "candidate")]
    pub at: Option<DateTime<Utc>>,

    /// Candidate follow-up time to rank, RFC 3339 (repeatable)
    #[arg(long)]
    pub candidate: Vec<DateTime<Utc>>,

    /// Use this priority instead of deriving it from the latest analysis
    #[arg(long)]
    pub priority: Option<FollowUpPriority>,
}

/// Arguments for `pulse analyze`.
#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Lead JSON file
    #[arg(long)]
    pub lead: PathBuf,

    /// Call transcript text file
    #[arg(long)]
    pub transcript: PathBuf,

    /// Recorded model response (JSON object or labeled text)
    #[arg(long)]
    pub response: PathBuf,
}
