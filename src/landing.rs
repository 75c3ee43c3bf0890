//! Role-based landing pages
//!
//! Where `/dashboard` sends a session once it is known.

use crate::config::AuthConfig;
use crate::guard::Navigator;
use crate::identity::SessionState;
use crate::policy::Role;
use tracing::debug;

/// Maps a session to the page it should land on
#[derive(Debug, Clone)]
pub struct LandingRouter {
    config: AuthConfig,
}

impl LandingRouter {
    pub fn from_config(config: &AuthConfig) -> Self {
        LandingRouter {
            config: config.clone(),
        }
    }

    /// Dashboard for a role
    pub fn dashboard(&self, role: Role) -> &str {
        self.config.dashboard_for(role)
    }

    /// Destination for a session; `None` while loading
    ///
    /// # Examples
    ///
    /// ```
    /// use evidence_guard::config::AuthConfig;
    /// use evidence_guard::identity::IdentityResolver;
    /// use evidence_guard::landing::LandingRouter;
    ///
    /// let router = LandingRouter::from_config(&AuthConfig::default());
    /// let state = IdentityResolver::default().resolve_raw(Some(r#"{"role":"investigator"}"#));
    ///
    /// assert_eq!(router.destination(&state), Some("/dashboard/investigator"));
    /// ```
    pub fn destination(&self, session: &SessionState) -> Option<&str> {
        match session {
            SessionState::Loading => None,
            SessionState::Unauthenticated => Some(self.config.targets.login.as_str()),
            SessionState::Resolved(identity) => Some(self.dashboard(identity.role())),
        }
    }

    /// Navigate to the destination, if one is known yet
    pub fn route<N: Navigator + ?Sized>(&self, session: &SessionState, navigator: &mut N) -> bool {
        match self.destination(session) {
            Some(target) => {
                debug!("Landing session at {}", target);
                navigator.navigate(target);
                true
            }
            None => false,
        }
    }
}

impl Default for LandingRouter {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;

    #[test]
    fn test_each_role_has_a_dashboard() {
        let router = LandingRouter::default();
        let expected = [
            (Role::Administrator, "/dashboard/admin"),
            (Role::ForensicInvestigator, "/dashboard/investigator"),
            (Role::CaseManager, "/dashboard/case-manager"),
            (Role::EvidenceReviewer, "/dashboard/evidence-reviewer"),
            (Role::Auditor, "/dashboard/auditor"),
        ];

        for (role, path) in expected {
            let session = SessionState::resolved(Identity::new(role));
            assert_eq!(router.destination(&session), Some(path));
        }
    }

    #[test]
    fn test_unauthenticated_goes_to_login() {
        let router = LandingRouter::default();
        assert_eq!(
            router.destination(&SessionState::Unauthenticated),
            Some("/login")
        );
    }

    #[test]
    fn test_loading_does_not_navigate() {
        let router = LandingRouter::default();
        let mut nav: Vec<String> = Vec::new();

        assert!(!router.route(&SessionState::Loading, &mut nav));
        assert!(nav.is_empty());
    }

    #[test]
    fn test_configured_dashboard() {
        let config = AuthConfig::from_toml_str(
            r#"
            [dashboards]
            auditor = "/oversight"
            "#,
        )
        .unwrap();
        let router = LandingRouter::from_config(&config);
        let mut nav: Vec<String> = Vec::new();

        let session = SessionState::resolved(Identity::new(Role::Auditor));
        assert!(router.route(&session, &mut nav));
        assert_eq!(nav, vec!["/oversight"]);
    }
}
