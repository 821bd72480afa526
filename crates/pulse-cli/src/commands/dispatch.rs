use pulse_config::PulseConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &PulseConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Recommend(args) => commands::recommend::handle(&args, config, flags),
        Commands::Effectiveness(args) => commands::effectiveness::handle(&args, flags).await,
        Commands::Analyze(args) => commands::analyze::handle(&args, config, flags).await,
        Commands::Config => commands::config::handle(config, flags),
    }
}
