//! `handbook sidebar` command implementation.

use std::fmt;

use clap::Args;
use handbook_config::SiteConfig;

use super::{ConfigArgs, describe_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl SidebarArgs {
    /// Execute the sidebar command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or has no theme.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        let lines = sidebar_lines(&config.site).ok_or_else(|| {
            CliError::Validation(format!(
                "{}: no theme integration, nothing to navigate",
                describe_source(&config)
            ))
        })?;

        for line in lines {
            output.data(&line.to_string())?;
        }
        Ok(())
    }
}

/// One printed row of the navigation tree.
#[derive(Debug, PartialEq, Eq)]
enum SidebarLine {
    Group(String),
    Item { label: String, slug: String },
}

impl fmt::Display for SidebarLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(label) => f.write_str(label),
            Self::Item { label, slug } => write!(f, "  {label} (/{slug})"),
        }
    }
}

/// Flatten the sidebar into printable rows, `None` without a theme.
fn sidebar_lines(site: &SiteConfig) -> Option<Vec<SidebarLine>> {
    let theme = site.theme()?;
    let mut lines = Vec::new();
    for group in &theme.sidebar {
        lines.push(SidebarLine::Group(group.label.clone()));
        lines.extend(group.items.iter().map(|item| SidebarLine::Item {
            label: item.label.clone(),
            slug: item.slug.clone(),
        }));
    }
    Some(lines)
}
