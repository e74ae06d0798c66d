//! `handbook check` command implementation.

use clap::Args;

use super::{ConfigArgs, describe_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Treat sidebar navigation warnings as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, or has sidebar
    /// warnings in strict mode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let strict = self.strict;
        let config = self.config.load()?;
        let site = &config.site;

        output.info(&format!("Configuration: {}", describe_source(&config)));
        output.info(&format!("Site: {}", site.site));
        output.info(&format!(
            "Integrations: {}",
            site.integration_names().join(", ")
        ));

        let warnings = match site.theme() {
            Some(theme) => {
                output.info(&format!("Theme: {}", theme.title));
                output.info(&format!("Theme plugins: {}", theme.plugin_names().join(", ")));
                output.info(&format!(
                    "Sidebar: {} groups, {} entries",
                    theme.sidebar.len(),
                    theme.slugs().count()
                ));
                theme.sidebar_warnings()
            }
            None => {
                output.info("Theme: none");
                Vec::new()
            }
        };

        for warning in &warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        if strict && !warnings.is_empty() {
            return Err(CliError::Validation(format!(
                "{} sidebar warning(s) (--strict)",
                warnings.len()
            )));
        }

        output.success("Configuration is valid");
        Ok(())
    }
}
