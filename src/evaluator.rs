//! Authorization decisions
//!
//! Pure functions over a [`SessionState`]. Anything short of a resolved
//! identity holds no permissions and no roles.

use crate::identity::SessionState;
use crate::policy::{permissions_for, Permission, PermissionSet, Role};

/// Check if the session holds a permission
///
/// # Examples
///
/// ```
/// use evidence_guard::evaluator::has_permission;
/// use evidence_guard::identity::{Identity, SessionState};
/// use evidence_guard::policy::{Permission, Role};
///
/// let admin = SessionState::resolved(Identity::new(Role::Administrator));
/// assert!(has_permission(&admin, Permission::UserManagement));
/// assert!(!has_permission(&SessionState::Loading, Permission::ViewEvidence));
/// ```
pub fn has_permission(state: &SessionState, permission: Permission) -> bool {
    match state {
        SessionState::Resolved(identity) => permissions_for(identity.role()).contains(permission),
        SessionState::Loading | SessionState::Unauthenticated => false,
    }
}

/// Check if the session holds a role
///
/// The stored role was normalized during resolution, so an identity stored
/// under a legacy spelling matches its canonical role.
pub fn has_role(state: &SessionState, role: Role) -> bool {
    match state {
        SessionState::Resolved(identity) => identity.role() == role,
        SessionState::Loading | SessionState::Unauthenticated => false,
    }
}

/// Check if the session holds any of the roles (false for an empty list)
pub fn has_any_role(state: &SessionState, roles: &[Role]) -> bool {
    roles.iter().any(|role| has_role(state, *role))
}

/// Every permission the session holds
pub fn permissions(state: &SessionState) -> PermissionSet {
    match state {
        SessionState::Resolved(identity) => permissions_for(identity.role()),
        SessionState::Loading | SessionState::Unauthenticated => PermissionSet::empty(),
    }
}

impl SessionState {
    /// See [`has_permission`]
    pub fn has_permission(&self, permission: Permission) -> bool {
        has_permission(self, permission)
    }

    /// See [`has_role`]
    pub fn has_role(&self, role: Role) -> bool {
        has_role(self, role)
    }

    /// See [`has_any_role`]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        has_any_role(self, roles)
    }

    /// See [`permissions`]
    pub fn permissions(&self) -> PermissionSet {
        permissions(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Identity, IdentityResolver};

    fn session(role: Role) -> SessionState {
        SessionState::resolved(Identity::new(role))
    }

    #[test]
    fn test_unsettled_states_deny_everything() {
        for state in [SessionState::Loading, SessionState::Unauthenticated] {
            for permission in Permission::ALL {
                assert!(!has_permission(&state, permission));
            }
            for role in Role::ALL {
                assert!(!has_role(&state, role));
            }
            assert!(!has_any_role(&state, &Role::ALL));
            assert!(permissions(&state).is_empty());
        }
    }

    #[test]
    fn test_matrix_fidelity() {
        for role in Role::ALL {
            let state = session(role);
            for permission in Permission::ALL {
                assert_eq!(
                    has_permission(&state, permission),
                    permissions_for(role).contains(permission),
                    "{role} / {permission}"
                );
            }
        }
    }

    #[test]
    fn test_admin_user_management() {
        assert!(has_permission(
            &session(Role::Administrator),
            Permission::UserManagement
        ));
    }

    #[test]
    fn test_reviewer_cannot_upload() {
        assert!(!has_permission(
            &session(Role::EvidenceReviewer),
            Permission::UploadEvidence
        ));
    }

    #[test]
    fn test_has_role_exact() {
        let state = session(Role::CaseManager);
        assert!(has_role(&state, Role::CaseManager));
        assert!(!has_role(&state, Role::Administrator));
    }

    #[test]
    fn test_has_role_with_legacy_alias() {
        let state = IdentityResolver::default()
            .resolve_raw(Some(r#"{"name":"Sam","role":"investigator"}"#));

        assert!(has_role(&state, Role::ForensicInvestigator));
        assert!(!has_role(&state, Role::CaseManager));
        assert_eq!(permissions(&state), permissions_for(Role::ForensicInvestigator));
    }

    #[test]
    fn test_has_any_role() {
        let state = session(Role::Auditor);
        assert!(has_any_role(&state, &[Role::Administrator, Role::Auditor]));
        assert!(!has_any_role(&state, &[Role::Administrator]));
        assert!(!has_any_role(&state, &[]));
    }

    #[test]
    fn test_decisions_are_stable() {
        let state = session(Role::ForensicInvestigator);
        let before = state.clone();

        for _ in 0..3 {
            assert!(state.has_permission(Permission::HashEvidence));
            assert!(!state.has_permission(Permission::ManageCases));
        }
        assert_eq!(state, before);
    }
}
