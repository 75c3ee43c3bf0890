//! Guard configuration
//!
//! Loaded from TOML. Every field has a default matching the dashboard's
//! routes, so an empty document is a valid configuration.
//!
//! ```toml
//! session_key = "user"
//! login = "/login"
//! landing = "/dashboard"
//!
//! [dashboards]
//! administrator = "/dashboard/admin"
//! auditor = "/dashboard/auditor"
//! ```

use crate::error::ConfigError;
use crate::identity::DEFAULT_SESSION_KEY;
use crate::policy::Role;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Locations the route guard redirects to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectTargets {
    /// Entry point for unauthenticated sessions
    pub login: String,
    /// Default authenticated landing location
    pub landing: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        RedirectTargets {
            login: "/login".to_string(),
            landing: "/dashboard".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Store key holding the session record
    pub session_key: String,

    #[serde(flatten)]
    pub targets: RedirectTargets,

    /// Per-role dashboard overrides
    pub dashboards: BTreeMap<Role, String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            session_key: DEFAULT_SESSION_KEY.to_string(),
            targets: RedirectTargets::default(),
            dashboards: BTreeMap::new(),
        }
    }
}

/// Same-origin absolute paths only; `//host` is external
const LOCATION_PATTERN: &str = r"^/([A-Za-z0-9._~-][A-Za-z0-9._~/-]*)?$";

static LOCATION: OnceLock<Option<Regex>> = OnceLock::new();

/// Check a redirect location
///
/// Fails closed: if the pattern could not be compiled, nothing is valid.
pub fn is_valid_location(value: &str) -> bool {
    LOCATION
        .get_or_init(|| Regex::new(LOCATION_PATTERN).ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// Validate a location, naming the field it came from
pub(crate) fn check_location(field: impl Into<String>, value: &str) -> Result<(), ConfigError> {
    if is_valid_location(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLocation {
            field: field.into(),
            value: value.to_string(),
        })
    }
}

impl AuthConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: AuthConfig = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate all fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_key.trim().is_empty() {
            return Err(ConfigError::EmptySessionKey);
        }

        let locations = [
            ("login".to_string(), &self.targets.login),
            ("landing".to_string(), &self.targets.landing),
        ]
        .into_iter()
        .chain(
            self.dashboards
                .iter()
                .map(|(role, location)| (format!("dashboards.{role}"), location)),
        );

        for (field, value) in locations {
            check_location(field, value)?;
        }

        Ok(())
    }

    /// Dashboard location for a role, falling back to the built-in route
    pub fn dashboard_for(&self, role: Role) -> &str {
        self.dashboards
            .get(&role)
            .map(String::as_str)
            .unwrap_or_else(|| default_dashboard(role))
    }
}

/// Built-in dashboard route for each role
pub fn default_dashboard(role: Role) -> &'static str {
    match role {
        Role::Administrator => "/dashboard/admin",
        Role::ForensicInvestigator => "/dashboard/investigator",
        Role::CaseManager => "/dashboard/case-manager",
        Role::EvidenceReviewer => "/dashboard/evidence-reviewer",
        Role::Auditor => "/dashboard/auditor",
    }
}
