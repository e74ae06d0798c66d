//! `handbook resolve` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Emit compact single-line JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// Writes the resolved configuration as JSON to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or stdout is closed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let compact = self.compact;
        let config = self.config.load()?;

        let json = if compact {
            serde_json::to_string(&config.site)?
        } else {
            serde_json::to_string_pretty(&config.site)?
        };

        Output::new().data(&json)?;
        Ok(())
    }
}
