//! Resolved site configuration.
//!
//! These types are produced by [`SiteConfigRaw::resolve`](crate::SiteConfigRaw::resolve)
//! and are never mutated afterwards. They serialize to JSON, which is the
//! hand-off format for the external site builder.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use url::Url;

/// Fully resolved and validated site configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    /// Absolute origin URL of the deployed site.
    pub site: Url,
    /// Site builder integrations, in execution order.
    pub integrations: Vec<Integration>,
}

impl SiteConfig {
    /// Configuration of the documentation theme, if one is installed.
    #[must_use]
    pub fn theme(&self) -> Option<&ThemeConfig> {
        self.integrations.iter().find_map(|integration| match integration {
            Integration::Theme { config, .. } => Some(config),
            Integration::Simple { .. } => None,
        })
    }

    /// Find a site-level integration by name.
    #[must_use]
    pub fn integration(&self, name: &str) -> Option<&Integration> {
        self.integrations.iter().find(|i| i.name() == name)
    }

    /// Names of the site-level integrations, in order.
    #[must_use]
    pub fn integration_names(&self) -> Vec<&str> {
        self.integrations.iter().map(Integration::name).collect()
    }
}

/// A named plugin unit contributing capability to the site builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Integration {
    /// Documentation theme, configured by nested options.
    Theme {
        /// Integration name.
        name: String,
        /// Theme options.
        config: ThemeConfig,
    },
    /// Integration invoked with its defaults.
    Simple {
        /// Integration name.
        name: String,
    },
}

impl Integration {
    /// Create an integration without options.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple { name: name.into() }
    }

    /// Integration name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Theme { name, .. } | Self::Simple { name } => name,
        }
    }
}

/// Documentation theme options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    /// Site title shown in the page chrome.
    pub title: String,
    /// Social links shown in the header.
    pub social: Vec<SocialLink>,
    /// Sidebar navigation groups.
    pub sidebar: Vec<SidebarGroup>,
    /// Theme plugins, in execution order.
    pub plugins: Vec<Integration>,
}

impl ThemeConfig {
    /// Names of the theme plugins, in order.
    #[must_use]
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(Integration::name).collect()
    }

    /// Every sidebar slug, in navigation order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.sidebar
            .iter()
            .flat_map(|group| group.items.iter().map(|item| item.slug.as_str()))
    }

    /// Navigation ambiguities in the sidebar.
    ///
    /// Reports duplicate group labels, duplicate item labels within a group
    /// and slugs that appear more than once anywhere in the sidebar.
    #[must_use]
    pub fn sidebar_warnings(&self) -> Vec<SidebarWarning> {
        let mut warnings = Vec::new();

        let mut group_labels: HashMap<&str, usize> = HashMap::new();
        for (index, group) in self.sidebar.iter().enumerate() {
            if let Some(&first) = group_labels.get(group.label.as_str()) {
                warnings.push(SidebarWarning::DuplicateLabel {
                    field: format!("theme.sidebar[{index}].label"),
                    label: group.label.clone(),
                    first: format!("theme.sidebar[{first}].label"),
                });
            } else {
                group_labels.insert(&group.label, index);
            }
        }

        let mut slugs: HashMap<&str, String> = HashMap::new();
        for (g, group) in self.sidebar.iter().enumerate() {
            let mut item_labels: HashMap<&str, usize> = HashMap::new();
            for (i, item) in group.items.iter().enumerate() {
                if let Some(&first) = item_labels.get(item.label.as_str()) {
                    warnings.push(SidebarWarning::DuplicateLabel {
                        field: format!("theme.sidebar[{g}].items[{i}].label"),
                        label: item.label.clone(),
                        first: format!("theme.sidebar[{g}].items[{first}].label"),
                    });
                } else {
                    item_labels.insert(&item.label, i);
                }

                let field = format!("theme.sidebar[{g}].items[{i}].slug");
                if let Some(first) = slugs.get(item.slug.as_str()) {
                    warnings.push(SidebarWarning::DuplicateSlug {
                        field,
                        slug: item.slug.clone(),
                        first: first.clone(),
                    });
                } else {
                    slugs.insert(&item.slug, field);
                }
            }
        }

        warnings
    }
}

/// Link to an external profile shown in the header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    /// Icon identifier understood by the theme (e.g. `github`).
    pub icon: String,
    /// Accessible label.
    pub label: String,
    /// Link target.
    pub href: Url,
}

/// Labelled group of sidebar entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    /// Group heading.
    pub label: String,
    /// Entries, in navigation order.
    pub items: Vec<SidebarItem>,
}

impl SidebarGroup {
    /// Find an entry by label.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&SidebarItem> {
        self.items.iter().find(|item| item.label == label)
    }
}

/// Sidebar link to a content document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Link text.
    pub label: String,
    /// Content path relative to the content collection root.
    pub slug: String,
}

/// Navigation ambiguity that does not prevent resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarWarning {
    /// A label repeats within the same parent list.
    DuplicateLabel {
        /// Field of the repeated label.
        field: String,
        /// The label text.
        label: String,
        /// Field of the first occurrence.
        first: String,
    },
    /// A slug is linked from more than one sidebar entry.
    DuplicateSlug {
        /// Field of the repeated slug.
        field: String,
        /// The slug.
        slug: String,
        /// Field of the first occurrence.
        first: String,
    },
}

impl fmt::Display for SidebarWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLabel {
                field,
                label,
                first,
            } => write!(f, "{field}: label \"{label}\" already used at {first}"),
            Self::DuplicateSlug { field, slug, first } => {
                write!(f, "{field}: slug \"{slug}\" already linked from {first}")
            }
        }
    }
}
