//! Render-or-fallback guard

use super::{Decision, Requirement};
use crate::identity::SessionState;

/// Renders a child only when its requirement is granted
///
/// Denied renders the fallback, or nothing (`O::default()`) without one.
/// While the session is loading nothing is rendered, so privileged content
/// never flashes before resolution completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderGuard<O> {
    requirement: Requirement,
    fallback: Option<O>,
}

impl<O> RenderGuard<O> {
    pub fn new(requirement: Requirement) -> Self {
        RenderGuard {
            requirement,
            fallback: None,
        }
    }

    /// Content to show when denied
    pub fn with_fallback(mut self, fallback: O) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn fallback(&self) -> Option<&O> {
        self.fallback.as_ref()
    }

    pub fn decide(&self, session: &SessionState) -> Decision {
        self.requirement.decide(session)
    }

    /// Check if the child would be rendered
    pub fn is_visible(&self, session: &SessionState) -> bool {
        self.decide(session).is_granted()
    }
}

impl<O: Clone + Default> RenderGuard<O> {
    /// Render the child, the fallback, or nothing
    ///
    /// `child` is only invoked when granted.
    ///
    /// # Examples
    ///
    /// ```
    /// use evidence_guard::guard::{RenderGuard, Requirement};
    /// use evidence_guard::identity::{Identity, SessionState};
    /// use evidence_guard::policy::{Permission, Role};
    ///
    /// let guard = RenderGuard::new(Requirement::permission(Permission::UserManagement))
    ///     .with_fallback("restricted".to_string());
    ///
    /// let admin = SessionState::resolved(Identity::new(Role::Administrator));
    /// let auditor = SessionState::resolved(Identity::new(Role::Auditor));
    ///
    /// assert_eq!(guard.render(&admin, || "users".to_string()), "users");
    /// assert_eq!(guard.render(&auditor, || "users".to_string()), "restricted");
    /// assert_eq!(guard.render(&SessionState::Loading, || "users".to_string()), "");
    /// ```
    pub fn render(&self, session: &SessionState, child: impl FnOnce() -> O) -> O {
        match self.decide(session) {
            Decision::Granted => child(),
            Decision::Denied => self.fallback.clone().unwrap_or_default(),
            Decision::Pending => O::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use crate::policy::{Permission, Role};
    use std::cell::Cell;

    fn session(role: Role) -> SessionState {
        SessionState::resolved(Identity::new(role))
    }

    #[test]
    fn test_no_flash_while_loading() {
        let called = Cell::new(false);
        let guard: RenderGuard<Option<&str>> =
            RenderGuard::new(Requirement::role(Role::Administrator)).with_fallback(Some("denied"));

        let out = guard.render(&SessionState::Loading, || {
            called.set(true);
            Some("secret")
        });

        // Neither the child nor the fallback while loading
        assert_eq!(out, None);
        assert!(!called.get());
    }

    #[test]
    fn test_default_fallback_is_nothing() {
        let guard: RenderGuard<Vec<&str>> =
            RenderGuard::new(Requirement::permission(Permission::UploadEvidence));

        assert!(guard
            .render(&session(Role::EvidenceReviewer), || vec!["upload"])
            .is_empty());
        assert_eq!(
            guard.render(&session(Role::ForensicInvestigator), || vec!["upload"]),
            vec!["upload"]
        );
    }

    #[test]
    fn test_unauthenticated_renders_fallback() {
        let guard = RenderGuard::new(Requirement::role(Role::Administrator))
            .with_fallback("login to continue".to_string());

        assert_eq!(
            guard.render(&SessionState::Unauthenticated, || "admin".to_string()),
            "login to continue"
        );
        assert!(!guard.is_visible(&SessionState::Unauthenticated));
    }

    #[test]
    fn test_no_requirement_is_always_visible_after_loading() {
        let guard: RenderGuard<String> = RenderGuard::new(Requirement::none());

        assert!(guard.is_visible(&SessionState::Unauthenticated));
        assert!(guard.is_visible(&session(Role::Auditor)));
        assert!(!guard.is_visible(&SessionState::Loading));
    }
}
