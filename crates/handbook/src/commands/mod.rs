//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;
pub(crate) mod sidebar;

use std::path::PathBuf;

use clap::Args;
use handbook_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use sidebar::SidebarArgs;

/// Configuration source arguments shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover handbook.toml, else built-in).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site origin URL (overrides config).
    #[arg(long, env = "HANDBOOK_SITE")]
    site: Option<String>,
}

impl ConfigArgs {
    /// Load and resolve the configuration.
    pub(crate) fn load(self) -> Result<Config, CliError> {
        tracing::debug!(
            config = ?self.config,
            site_override = self.site.is_some(),
            "Loading configuration from CLI arguments"
        );
        let cli_settings = CliSettings { site: self.site };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Human-readable name of where the configuration came from.
pub(crate) fn describe_source(config: &Config) -> String {
    config.config_path.as_ref().map_or_else(
        || "built-in".to_owned(),
        |path| path.display().to_string(),
    )
}
