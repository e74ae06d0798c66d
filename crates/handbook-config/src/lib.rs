//! Site configuration for the handbook.
//!
//! Resolves the declarative site configuration (origin URL, integrations,
//! documentation theme options and sidebar navigation) into an immutable,
//! validated [`SiteConfig`] for the external site builder.
//!
//! The handbook's own configuration is built in and resolved by
//! [`resolve_config`]. [`Config::load`] additionally reads a
//! `handbook.toml` file of the same shape, found explicitly or by
//! searching the current directory and its parents.
//!
//! ## Environment Variable Expansion
//!
//! URL values in configuration files support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Bare `$VAR` is left as written.
//!
//! Expanded fields:
//! - `site`
//! - `theme.social[].href`

mod expand;
mod model;
mod raw;
mod registry;
mod validate;

use std::path::{Path, PathBuf};

pub use model::{
    Integration, SidebarGroup, SidebarItem, SidebarWarning, SiteConfig, SocialLink, ThemeConfig,
};
pub use raw::{SidebarGroupRaw, SidebarItemRaw, SiteConfigRaw, SocialLinkRaw, ThemeConfigRaw};
pub use registry::{IntegrationKind, IntegrationRegistry, IntegrationScope, IntegrationSpec};

/// The handbook site configuration, embedded at compile time.
pub const BUILTIN_CONFIG: &str = include_str!("builtin.toml");

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "handbook.toml";

/// Resolve the built-in handbook configuration.
///
/// Performs no I/O and reads no environment variables, so repeated calls
/// return identical values.
///
/// # Errors
///
/// Returns an error only if the embedded configuration is invalid.
pub fn resolve_config() -> Result<SiteConfig, ConfigError> {
    SiteConfigRaw::from_toml(BUILTIN_CONFIG)?.resolve(&IntegrationRegistry::builtin())
}

/// CLI settings that override configuration values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site origin.
    pub site: Option<String>,
}

/// Loaded site configuration.
#[derive(Debug)]
pub struct Config {
    /// Resolved site configuration.
    pub site: SiteConfig,
    /// Path to the config file, `None` for the built-in configuration.
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Site origin is not an absolute http(s) URL.
    #[error("Invalid site origin \"{value}\": {reason}")]
    InvalidOrigin {
        /// The rejected origin.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Integration name is not known to the registry.
    #[error("Unknown integration \"{name}\" in {field}")]
    UnknownIntegration {
        /// Config field path (e.g., "`theme.plugins[2]`").
        field: String,
        /// The unknown name.
        name: String,
    },
    /// Integration is known but installed at the wrong level.
    #[error("{field}: \"{name}\" is a {scope} and belongs in {expected}", expected = .scope.field())]
    MisplacedIntegration {
        /// Config field path.
        field: String,
        /// Integration name.
        name: String,
        /// Level the integration belongs to.
        scope: IntegrationScope,
    },
    /// Sidebar group or item is structurally invalid.
    #[error("Malformed sidebar entry {field}: {message}")]
    MalformedSidebarEntry {
        /// Config field path (e.g., "`theme.sidebar[0].items[3].slug`").
        field: String,
        /// What is wrong with the entry.
        message: String,
    },
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "site").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `handbook.toml` in current directory and parents, and
    /// falls back to the built-in handbook configuration.
    ///
    /// CLI settings are applied before validation, so overridden values are
    /// validated like values from the file.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().ok();
        Self::load_from(config_path, cli_settings, cwd.as_deref())
    }

    /// Load configuration, discovering `handbook.toml` upwards from `start_dir`.
    fn load_from(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
        start_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let (mut raw, config_path) = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            (Self::load_raw(path)?, Some(path.to_path_buf()))
        } else if let Some(discovered) = start_dir.and_then(Self::discover_config_from) {
            (Self::load_raw(&discovered)?, Some(discovered))
        } else {
            (SiteConfigRaw::from_toml(BUILTIN_CONFIG)?, None)
        };

        match &config_path {
            Some(path) => tracing::info!(path = %path.display(), "Loading site configuration"),
            None => tracing::info!("Using built-in site configuration"),
        }

        if let Some(settings) = cli_settings {
            Self::apply_cli_settings(&mut raw, settings);
        }

        let site = raw.resolve(&IntegrationRegistry::builtin())?;
        Ok(Self { site, config_path })
    }

    /// Apply CLI settings to the raw configuration.
    fn apply_cli_settings(raw: &mut SiteConfigRaw, settings: &CliSettings) {
        if let Some(site) = &settings.site {
            raw.site.clone_from(site);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Read a config file and expand environment variables.
    fn load_raw(path: &Path) -> Result<SiteConfigRaw, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut raw = SiteConfigRaw::from_toml(&content)?;
        raw.expand_env_vars()?;
        Ok(raw)
    }
}
