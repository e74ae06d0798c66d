//! Known integrations.
//!
//! The registry stands for the set of plugins actually installed alongside
//! the site builder. A configuration may only name integrations that the
//! registry knows, at the level where they can run.

use std::collections::HashMap;
use std::fmt;

/// Where an integration is installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntegrationScope {
    /// Site builder integration, listed in `integrations`.
    Site,
    /// Theme plugin, listed in `theme.plugins`.
    Theme,
}

impl IntegrationScope {
    /// Config field that lists integrations of this scope.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::Site => "integrations",
            Self::Theme => "theme.plugins",
        }
    }
}

impl fmt::Display for IntegrationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site => f.write_str("site integration"),
            Self::Theme => f.write_str("theme plugin"),
        }
    }
}

/// What an integration accepts as configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegrationKind {
    /// Documentation theme configured by the `[theme]` table.
    Theme,
    /// Invoked with defaults.
    Simple,
}

/// Registered integration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegrationSpec {
    /// Integration name as written in configuration.
    pub name: String,
    /// Level the integration runs at.
    pub scope: IntegrationScope,
    /// Accepted configuration.
    pub kind: IntegrationKind,
}

/// Set of integrations available to a configuration.
#[derive(Clone, Debug, Default)]
pub struct IntegrationRegistry {
    specs: HashMap<String, IntegrationSpec>,
}

impl IntegrationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of the plugins installed for the handbook site.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with("starlight", IntegrationScope::Site, IntegrationKind::Theme)
            .with(
                "astro-robots-txt",
                IntegrationScope::Site,
                IntegrationKind::Simple,
            )
            .with(
                "starlight-theme-rapide",
                IntegrationScope::Theme,
                IntegrationKind::Simple,
            )
            .with(
                "starlight-links-validator",
                IntegrationScope::Theme,
                IntegrationKind::Simple,
            )
            .with(
                "starlight-image-zoom",
                IntegrationScope::Theme,
                IntegrationKind::Simple,
            )
            .with(
                "starlight-llms-txt",
                IntegrationScope::Theme,
                IntegrationKind::Simple,
            )
    }

    /// Register an integration, replacing any previous entry with the same name.
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        scope: IntegrationScope,
        kind: IntegrationKind,
    ) -> Self {
        let name = name.into();
        self.specs
            .insert(name.clone(), IntegrationSpec { name, scope, kind });
        self
    }

    /// Look up an integration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IntegrationSpec> {
        self.specs.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = IntegrationRegistry::builtin();

        let theme = registry.get("starlight").unwrap();
        assert_eq!(theme.scope, IntegrationScope::Site);
        assert_eq!(theme.kind, IntegrationKind::Theme);

        let robots = registry.get("astro-robots-txt").unwrap();
        assert_eq!(robots.scope, IntegrationScope::Site);
        assert_eq!(robots.kind, IntegrationKind::Simple);

        for plugin in [
            "starlight-theme-rapide",
            "starlight-links-validator",
            "starlight-image-zoom",
            "starlight-llms-txt",
        ] {
            assert_eq!(
                registry.get(plugin).map(|s| s.scope),
                Some(IntegrationScope::Theme),
                "{plugin}"
            );
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(IntegrationRegistry::builtin().get("sitemap").is_none());
        assert!(IntegrationRegistry::new().get("starlight").is_none());
    }

    #[test]
    fn test_with_replaces_existing() {
        let registry = IntegrationRegistry::new()
            .with("x", IntegrationScope::Site, IntegrationKind::Simple)
            .with("x", IntegrationScope::Theme, IntegrationKind::Simple);

        assert_eq!(registry.get("x").unwrap().scope, IntegrationScope::Theme);
    }

    #[test]
    fn test_scope_field() {
        assert_eq!(IntegrationScope::Site.field(), "integrations");
        assert_eq!(IntegrationScope::Theme.field(), "theme.plugins");
    }
}
