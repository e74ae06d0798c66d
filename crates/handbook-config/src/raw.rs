//! Configuration as written in `handbook.toml`.
//!
//! Raw structs mirror the file one-to-one and reject unknown keys. They are
//! turned into the resolved model by [`SiteConfigRaw::resolve`], which checks
//! every field against the [`IntegrationRegistry`].

use serde::Deserialize;

use crate::expand;
use crate::model::{Integration, SidebarGroup, SidebarItem, SiteConfig, SocialLink, ThemeConfig};
use crate::registry::{IntegrationKind, IntegrationRegistry, IntegrationScope, IntegrationSpec};
use crate::validate::{check_slug, parse_http_url, parse_origin, require_non_empty};
use crate::ConfigError;

/// Site configuration as parsed from TOML.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfigRaw {
    /// Site origin URL.
    pub site: String,
    /// Site integration names, in execution order.
    #[serde(default)]
    pub integrations: Vec<String>,
    /// Options for the theme integration listed in `integrations`.
    pub theme: Option<ThemeConfigRaw>,
}

/// Theme options as parsed from TOML.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfigRaw {
    /// Site title.
    pub title: String,
    /// Social links.
    #[serde(default)]
    pub social: Vec<SocialLinkRaw>,
    /// Sidebar groups.
    #[serde(default)]
    pub sidebar: Vec<SidebarGroupRaw>,
    /// Theme plugin names, in execution order.
    #[serde(default)]
    pub plugins: Vec<String>,
}

/// Social link as parsed from TOML.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLinkRaw {
    /// Icon identifier.
    pub icon: String,
    /// Accessible label.
    pub label: String,
    /// Link target, an absolute URL.
    pub href: String,
}

/// Sidebar group as parsed from TOML.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarGroupRaw {
    /// Group heading.
    pub label: String,
    /// Entries, in navigation order.
    pub items: Vec<SidebarItemRaw>,
}

/// Sidebar entry as parsed from TOML.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarItemRaw {
    /// Link text.
    pub label: String,
    /// Relative content path.
    pub slug: String,
}

impl SiteConfigRaw {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML, missing fields or
    /// unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate and resolve against the given registry.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is partially resolved.
    pub fn resolve(&self, registry: &IntegrationRegistry) -> Result<SiteConfig, ConfigError> {
        let site = parse_origin(&self.site)?;

        let mut theme_field: Option<String> = None;
        let mut integrations = Vec::with_capacity(self.integrations.len());
        for (index, name) in self.integrations.iter().enumerate() {
            let field = format!("integrations[{index}]");
            let spec = lookup(registry, name, IntegrationScope::Site, &field)?;
            match spec.kind {
                IntegrationKind::Theme => {
                    if let Some(first) = &theme_field {
                        return Err(ConfigError::Validation(format!(
                            "{field}: only one theme integration is allowed ({first} already installs one)"
                        )));
                    }
                    let raw = self.theme.as_ref().ok_or_else(|| {
                        ConfigError::Validation(format!(
                            "{field}: theme integration \"{name}\" requires a [theme] section"
                        ))
                    })?;
                    let config = raw.resolve(registry)?;
                    theme_field = Some(field);
                    integrations.push(Integration::Theme {
                        name: name.clone(),
                        config,
                    });
                }
                IntegrationKind::Simple => integrations.push(Integration::simple(name.as_str())),
            }
        }

        if self.theme.is_some() && theme_field.is_none() {
            return Err(ConfigError::Validation(
                "[theme] section requires a theme integration in integrations".to_owned(),
            ));
        }

        let config = SiteConfig { site, integrations };
        if let Some(theme) = config.theme() {
            for warning in theme.sidebar_warnings() {
                tracing::warn!(%warning, "Ambiguous sidebar navigation");
            }
        }
        tracing::debug!(
            site = %config.site,
            integrations = config.integrations.len(),
            "Resolved site configuration"
        );

        Ok(config)
    }

    /// Expand environment variable references in URL fields.
    pub(crate) fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site = expand::expand_env(&self.site, "site")?;
        if let Some(theme) = &mut self.theme {
            for (index, link) in theme.social.iter_mut().enumerate() {
                link.href = expand::expand_env(&link.href, &format!("theme.social[{index}].href"))?;
            }
        }
        Ok(())
    }
}

impl ThemeConfigRaw {
    fn resolve(&self, registry: &IntegrationRegistry) -> Result<ThemeConfig, ConfigError> {
        require_non_empty(&self.title, "theme.title")?;

        let social = self
            .social
            .iter()
            .enumerate()
            .map(|(index, link)| link.resolve(index))
            .collect::<Result<Vec<_>, _>>()?;

        let sidebar = self
            .sidebar
            .iter()
            .enumerate()
            .map(|(index, group)| group.resolve(index))
            .collect::<Result<Vec<_>, _>>()?;

        let plugins = self
            .plugins
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let field = format!("theme.plugins[{index}]");
                lookup(registry, name, IntegrationScope::Theme, &field)
                    .map(|_| Integration::simple(name.as_str()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ThemeConfig {
            title: self.title.clone(),
            social,
            sidebar,
            plugins,
        })
    }
}

impl SocialLinkRaw {
    fn resolve(&self, index: usize) -> Result<SocialLink, ConfigError> {
        let field = format!("theme.social[{index}]");
        require_non_empty(&self.icon, &format!("{field}.icon"))?;
        require_non_empty(&self.label, &format!("{field}.label"))?;
        let href = parse_http_url(&self.href)
            .map_err(|reason| ConfigError::Validation(format!("{field}.href: {reason}")))?;
        Ok(SocialLink {
            icon: self.icon.clone(),
            label: self.label.clone(),
            href,
        })
    }
}

impl SidebarGroupRaw {
    fn resolve(&self, index: usize) -> Result<SidebarGroup, ConfigError> {
        let field = format!("theme.sidebar[{index}]");
        if self.label.trim().is_empty() {
            return Err(ConfigError::MalformedSidebarEntry {
                field: format!("{field}.label"),
                message: "label cannot be empty".to_owned(),
            });
        }

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| item.resolve(&format!("{field}.items[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SidebarGroup {
            label: self.label.clone(),
            items,
        })
    }
}

impl SidebarItemRaw {
    fn resolve(&self, field: &str) -> Result<SidebarItem, ConfigError> {
        if self.label.trim().is_empty() {
            return Err(ConfigError::MalformedSidebarEntry {
                field: format!("{field}.label"),
                message: "label cannot be empty".to_owned(),
            });
        }
        check_slug(&self.slug).map_err(|message| ConfigError::MalformedSidebarEntry {
            field: format!("{field}.slug"),
            message: format!("{message}: \"{}\"", self.slug),
        })?;

        Ok(SidebarItem {
            label: self.label.clone(),
            slug: self.slug.clone(),
        })
    }
}

/// Find an integration that may be installed at `scope`.
fn lookup<'a>(
    registry: &'a IntegrationRegistry,
    name: &str,
    scope: IntegrationScope,
    field: &str,
) -> Result<&'a IntegrationSpec, ConfigError> {
    let spec = registry
        .get(name)
        .ok_or_else(|| ConfigError::UnknownIntegration {
            field: field.to_owned(),
            name: name.to_owned(),
        })?;
    if spec.scope != scope {
        return Err(ConfigError::MisplacedIntegration {
            field: field.to_owned(),
            name: name.to_owned(),
            scope: spec.scope,
        });
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"
site = "https://docs.example.com"
integrations = ["starlight", "astro-robots-txt"]

[theme]
title = "Example Docs"
plugins = ["starlight-image-zoom"]

[[theme.social]]
icon = "github"
label = "GitHub"
href = "https://github.com/example"

[[theme.sidebar]]
label = "Guides"
items = [
    { label = "Overview", slug = "guides" },
    { label = "Setup", slug = "guides/setup" },
]
"#;

    fn parse(toml: &str) -> SiteConfigRaw {
        SiteConfigRaw::from_toml(toml).unwrap()
    }

    fn resolve(toml: &str) -> Result<SiteConfig, ConfigError> {
        parse(toml).resolve(&IntegrationRegistry::builtin())
    }

    #[test]
    fn test_resolve_minimal() {
        let config = resolve(MINIMAL).unwrap();

        assert_eq!(config.site.as_str(), "https://docs.example.com/");
        assert_eq!(
            config.integration_names(),
            vec!["starlight", "astro-robots-txt"]
        );
        let theme = config.theme().unwrap();
        assert_eq!(theme.title, "Example Docs");
        assert_eq!(theme.plugin_names(), vec!["starlight-image-zoom"]);
        assert_eq!(theme.social[0].href.as_str(), "https://github.com/example");
        assert_eq!(
            theme.slugs().collect::<Vec<_>>(),
            vec!["guides", "guides/setup"]
        );
    }

    #[test]
    fn test_theme_attached_in_place() {
        let toml = MINIMAL.replace(
            r#"integrations = ["starlight", "astro-robots-txt"]"#,
            r#"integrations = ["astro-robots-txt", "starlight"]"#,
        );
        let config = resolve(&toml).unwrap();

        assert!(matches!(config.integrations[0], Integration::Simple { .. }));
        assert!(matches!(config.integrations[1], Integration::Theme { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml = MINIMAL.replace("[theme]", "[theme]\nlogo = \"logo.svg\"");
        let err = SiteConfigRaw::from_toml(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
        assert!(err.to_string().contains("logo"));
    }

    #[test]
    fn test_missing_site_rejected() {
        let err = SiteConfigRaw::from_toml("integrations = []").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_origin() {
        let err = resolve(&MINIMAL.replace("https://docs.example.com", "not a url")).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidOrigin { .. }),
            "Expected ConfigError::InvalidOrigin, got {err:?}"
        );
    }

    #[test]
    fn test_origin_must_be_http() {
        let err =
            resolve(&MINIMAL.replace("https://docs.example.com", "ftp://docs.example.com"))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin { .. }));
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_unknown_site_integration() {
        let toml = MINIMAL.replace(r#""astro-robots-txt""#, r#""astro-sitemap""#);
        let err = resolve(&toml).unwrap_err();

        match err {
            ConfigError::UnknownIntegration { field, name } => {
                assert_eq!(field, "integrations[1]");
                assert_eq!(name, "astro-sitemap");
            }
            other => panic!("Expected ConfigError::UnknownIntegration, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_theme_plugin() {
        let toml = MINIMAL.replace(r#""starlight-image-zoom""#, r#""starlight-blog""#);
        let err = resolve(&toml).unwrap_err();

        assert!(matches!(
            &err,
            ConfigError::UnknownIntegration { field, .. } if field == "theme.plugins[0]"
        ));
        assert!(err.to_string().contains("starlight-blog"));
    }

    #[test]
    fn test_empty_registry_knows_nothing() {
        let err = parse(MINIMAL)
            .resolve(&IntegrationRegistry::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownIntegration { .. }));
    }

    #[test]
    fn test_theme_plugin_at_site_level() {
        let toml = MINIMAL.replace(
            r#""astro-robots-txt"]"#,
            r#""starlight-llms-txt"]"#,
        );
        let err = resolve(&toml).unwrap_err();

        assert!(
            matches!(
                &err,
                ConfigError::MisplacedIntegration { scope: IntegrationScope::Theme, .. }
            ),
            "got {err:?}"
        );
        assert_eq!(
            err.to_string(),
            "integrations[1]: \"starlight-llms-txt\" is a theme plugin and belongs in theme.plugins"
        );
    }

    #[test]
    fn test_site_integration_as_theme_plugin() {
        let toml = MINIMAL.replace(r#""starlight-image-zoom""#, r#""astro-robots-txt""#);
        let err = resolve(&toml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MisplacedIntegration {
                scope: IntegrationScope::Site,
                ..
            }
        ));
    }

    #[test]
    fn test_theme_integration_requires_theme_section() {
        let toml = r#"
site = "https://docs.example.com"
integrations = ["starlight"]
"#;
        let err = resolve(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[theme]"));
    }

    #[test]
    fn test_theme_section_requires_theme_integration() {
        let toml = MINIMAL.replace(
            r#"integrations = ["starlight", "astro-robots-txt"]"#,
            r#"integrations = ["astro-robots-txt"]"#,
        );
        let err = resolve(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("theme integration"));
    }

    #[test]
    fn test_single_theme_integration() {
        let toml = MINIMAL.replace(
            r#"integrations = ["starlight", "astro-robots-txt"]"#,
            r#"integrations = ["starlight", "starlight"]"#,
        );
        let err = resolve(&toml).unwrap_err();
        assert!(err.to_string().contains("only one theme integration"));
    }

    #[test]
    fn test_no_theme_is_valid() {
        let toml = r#"
site = "https://docs.example.com"
integrations = ["astro-robots-txt"]
"#;
        let config = resolve(toml).unwrap();
        assert!(config.theme().is_none());
    }

    #[test]
    fn test_empty_title() {
        let err = resolve(&MINIMAL.replace(r#"title = "Example Docs""#, r#"title = """#))
            .unwrap_err();
        assert!(err.to_string().contains("theme.title"));
    }

    #[test]
    fn test_social_href_must_be_url() {
        let toml = MINIMAL.replace("https://github.com/example", "github.com/example");
        let err = resolve(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("theme.social[0].href"));
    }

    #[test]
    fn test_social_icon_required() {
        let err = resolve(&MINIMAL.replace(r#"icon = "github""#, r#"icon = """#)).unwrap_err();
        assert!(err.to_string().contains("theme.social[0].icon"));
    }

    #[test]
    fn test_leading_slash_slug() {
        let toml = MINIMAL.replace(r#"slug = "guides/setup""#, r#"slug = "/guides/setup""#);
        let err = resolve(&toml).unwrap_err();

        match err {
            ConfigError::MalformedSidebarEntry { field, message } => {
                assert_eq!(field, "theme.sidebar[0].items[1].slug");
                assert!(message.contains("/guides/setup"));
            }
            other => panic!("Expected ConfigError::MalformedSidebarEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_slug() {
        let toml = MINIMAL.replace(r#"slug = "guides""#, r#"slug = """#);
        let err = resolve(&toml).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::MalformedSidebarEntry { field, .. } if field == "theme.sidebar[0].items[0].slug"
        ));
    }

    #[test]
    fn test_empty_group_label() {
        let toml = MINIMAL.replace(r#"label = "Guides""#, r#"label = """#);
        let err = resolve(&toml).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::MalformedSidebarEntry { field, .. } if field == "theme.sidebar[0].label"
        ));
    }

    #[test]
    fn test_duplicate_slug_is_not_an_error() {
        let toml = MINIMAL.replace(r#"slug = "guides/setup""#, r#"slug = "guides""#);
        let config = resolve(&toml).unwrap();
        assert_eq!(config.theme().unwrap().sidebar_warnings().len(), 1);
    }

    #[test]
    fn test_expand_env_vars_site() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_HANDBOOK_SITE", "https://preview.example.com");
        }

        let mut raw = parse(&MINIMAL.replace("https://docs.example.com", "${TEST_HANDBOOK_SITE}"));
        raw.expand_env_vars().unwrap();
        assert_eq!(raw.site, "https://preview.example.com");

        unsafe {
            std::env::remove_var("TEST_HANDBOOK_SITE");
        }
    }

    #[test]
    fn test_expand_env_vars_social_href_missing() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_HANDBOOK_ORG");
        }

        let mut raw = parse(&MINIMAL.replace(
            "https://github.com/example",
            "https://github.com/${MISSING_HANDBOOK_ORG}",
        ));
        let err = raw.expand_env_vars().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("theme.social[0].href"));
    }
}
