//! Guard composition
//!
//! Three guard shapes built on the same [`Requirement::decide`]:
//! - [`RouteGuard`]: blocks a whole view and redirects once
//! - [`RenderGuard`]: renders a child or a fallback
//! - [`Guarded`]: wraps any [`Component`] in a render guard
//!
//! None of them evaluate permissions themselves; every decision goes through
//! the evaluator, and a missing or invalid identity always denies.

pub mod nav;
mod render;
mod route;
mod wrap;

pub use render::RenderGuard;
pub use route::{MountToken, Navigator, RouteGuard, RoutePhase, RouteView};
pub use wrap::{with_permission, GuardExt, Guarded};

use crate::config::{check_location, RedirectTargets};
use crate::error::ConfigError;
use crate::evaluator::{has_any_role, has_permission};
use crate::identity::SessionState;
use crate::policy::{Permission, Role};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Outcome of checking a requirement against a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Session still loading; nothing may be shown yet
    Pending,
    Granted,
    Denied,
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }
}

/// What a guarded region needs
///
/// Granted if the permission is held OR any listed role is held. A
/// requirement with neither is always visible once loading completes.
///
/// When deserialized, unknown keys and an empty `role` list are rejected so
/// a mistyped requirement never reads as "no requirement".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Requirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<Permission>,

    /// Accepts a single role name or a non-empty list
    #[serde(
        default,
        rename = "role",
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub roles: Vec<Role>,
}

impl Requirement {
    /// No requirement: visible to everyone, even unauthenticated sessions
    pub fn none() -> Self {
        Self::default()
    }

    pub fn permission(permission: Permission) -> Self {
        Requirement {
            permission: Some(permission),
            roles: Vec::new(),
        }
    }

    pub fn role(role: Role) -> Self {
        Self::any_role([role])
    }

    pub fn any_role(roles: impl IntoIterator<Item = Role>) -> Self {
        Requirement {
            permission: None,
            roles: roles.into_iter().collect(),
        }
    }

    /// Also grant when this role is held
    pub fn or_role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Check if neither a permission nor a role was supplied
    pub fn is_empty(&self) -> bool {
        self.permission.is_none() && self.roles.is_empty()
    }

    /// Decide against a session
    ///
    /// # Examples
    ///
    /// ```
    /// use evidence_guard::guard::{Decision, Requirement};
    /// use evidence_guard::identity::{Identity, SessionState};
    /// use evidence_guard::policy::{Permission, Role};
    ///
    /// let upload = Requirement::permission(Permission::UploadEvidence);
    /// let reviewer = SessionState::resolved(Identity::new(Role::EvidenceReviewer));
    ///
    /// assert_eq!(upload.decide(&SessionState::Loading), Decision::Pending);
    /// assert_eq!(upload.decide(&reviewer), Decision::Denied);
    /// assert_eq!(Requirement::none().decide(&SessionState::Unauthenticated), Decision::Granted);
    /// ```
    pub fn decide(&self, session: &SessionState) -> Decision {
        if session.is_loading() {
            return Decision::Pending;
        }

        if self.is_empty() {
            return Decision::Granted;
        }

        let by_permission = self
            .permission
            .is_some_and(|permission| has_permission(session, permission));

        if by_permission || has_any_role(session, &self.roles) {
            Decision::Granted
        } else {
            Decision::Denied
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Role),
        Many(Vec<Role>),
    }

    match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(role) => Ok(vec![role]),
        OneOrMany::Many(roles) if roles.is_empty() => {
            Err(D::Error::invalid_length(0, &"at least one role"))
        }
        OneOrMany::Many(roles) => Ok(roles),
    }
}

/// A unit of UI that renders against the current session
///
/// Closures taking `&SessionState` are components.
pub trait Component {
    type Output;

    fn render(&self, session: &SessionState) -> Self::Output;
}

impl<F, O> Component for F
where
    F: Fn(&SessionState) -> O,
{
    type Output = O;

    fn render(&self, session: &SessionState) -> O {
        self(session)
    }
}

/// Per-guard options as written in page configuration
///
/// The `[requires]` table holds the [`Requirement`]. `fallback` is shown
/// when denied and `redirect_to` overrides where an unauthenticated route
/// redirects.
///
/// ```toml
/// fallback = "Access denied"
/// redirect_to = "/signin"
///
/// [requires]
/// permission = "user_management"
/// role = ["administrator"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardOptions<F> {
    #[serde(default, rename = "requires")]
    pub requirement: Requirement,

    #[serde(default)]
    pub fallback: Option<F>,

    #[serde(default)]
    pub redirect_to: Option<String>,
}

impl<F> Default for GuardOptions<F> {
    fn default() -> Self {
        GuardOptions {
            requirement: Requirement::default(),
            fallback: None,
            redirect_to: None,
        }
    }
}

impl<F> GuardOptions<F> {
    /// Render guard from these options
    pub fn render_guard(self) -> RenderGuard<F> {
        let guard = RenderGuard::new(self.requirement);
        match self.fallback {
            Some(fallback) => guard.with_fallback(fallback),
            None => guard,
        }
    }

    /// Route guard from these options
    ///
    /// Routes gate on roles only; a permission in the options is ignored.
    /// Fails if `redirect_to` is not a same-origin absolute path.
    pub fn route_guard(self, targets: RedirectTargets) -> Result<RouteGuard, ConfigError> {
        let guard = RouteGuard::new(targets).require_roles(self.requirement.roles);
        match self.redirect_to {
            Some(target) => {
                check_location("redirect_to", &target)?;
                Ok(guard.redirect_to(target))
            }
            None => Ok(guard),
        }
    }
}
