use pulse_config::PulseConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `pulse config`.
pub fn handle(config: &PulseConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(config, flags.format)
}
