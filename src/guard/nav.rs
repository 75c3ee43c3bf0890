//! Permission-aware navigation
//!
//! Sidebar entries carry a [`Requirement`]; each link is rendered through a
//! [`Guarded`] wrapper, so an entry the session may not use is simply absent.
//!
//! ```toml
//! [[item]]
//! href = "/dashboard/upload"
//! label = "Upload Evidence"
//! [item.requires]
//! permission = "upload_evidence"
//!
//! [[item]]
//! href = "/dashboard/admin"
//! label = "Administration"
//! [item.requires]
//! role = ["administrator"]
//! ```
//!
//! An item without a `requires` table is visible to everyone. Unknown keys
//! are rejected.

use super::{Component, GuardExt, Guarded, Requirement};
use crate::error::ConfigError;
use crate::identity::SessionState;
use serde::{Deserialize, Serialize};

/// A rendered navigation link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub active: bool,
}

impl Component for NavLink {
    type Output = Option<NavLink>;

    fn render(&self, _session: &SessionState) -> Option<NavLink> {
        Some(self.clone())
    }
}

/// A sidebar entry and what it takes to see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub href: String,
    pub label: String,

    #[serde(default, rename = "requires", skip_serializing_if = "Requirement::is_empty")]
    pub requirement: Requirement,
}

impl NavItem {
    pub fn new(href: impl Into<String>, label: impl Into<String>, requirement: Requirement) -> Self {
        NavItem {
            href: href.into(),
            label: label.into(),
            requirement,
        }
    }

    /// Gated link, marked active when it matches `current_path`
    pub fn link(&self, current_path: &str) -> Guarded<NavLink> {
        NavLink {
            href: self.href.clone(),
            label: self.label.clone(),
            active: self.href == current_path,
        }
        .guarded(self.requirement.clone())
    }
}

/// Ordered sidebar navigation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sidebar {
    #[serde(default, rename = "item")]
    pub items: Vec<NavItem>,
}

impl Sidebar {
    pub fn new(items: Vec<NavItem>) -> Self {
        Sidebar { items }
    }

    /// Parse a `[[item]]` TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// Links the session may see, in declaration order
    ///
    /// Empty while the session is loading.
    pub fn links(&self, session: &SessionState, current_path: &str) -> Vec<NavLink> {
        self.items
            .iter()
            .filter_map(|item| item.link(current_path).render(session))
            .collect()
    }

    /// Items the session may see, in declaration order
    pub fn visible(&self, session: &SessionState) -> Vec<&NavItem> {
        self.items
            .iter()
            .filter(|item| item.requirement.decide(session).is_granted())
            .collect()
    }
}
