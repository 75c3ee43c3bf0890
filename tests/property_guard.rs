//! Property-based tests for evaluator and guard invariants
//!
//! Uses proptest to check fail-closed behavior, matrix fidelity, alias
//! equivalence, and guard composition across arbitrary sessions.

use evidence_guard::guard::{GuardExt, RenderGuard, Requirement};
use evidence_guard::identity::{Identity, IdentityResolver, SessionState};
use evidence_guard::policy::{permissions_for, permissions_for_name, ROLE_ALIASES};
use evidence_guard::{has_permission, has_role, Component, Permission, Role};
use proptest::prelude::*;

fn any_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn any_permission() -> impl Strategy<Value = Permission> {
    prop::sample::select(Permission::ALL.to_vec())
}

fn any_session() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Loading),
        Just(SessionState::Unauthenticated),
        any_role().prop_map(|role| SessionState::resolved(Identity::new(role))),
    ]
}

fn any_requirement() -> impl Strategy<Value = Requirement> {
    (
        prop::option::of(any_permission()),
        prop::collection::vec(any_role(), 0..3),
    )
        .prop_map(|(permission, roles)| Requirement { permission, roles })
}

proptest! {
    #[test]
    fn prop_unsettled_states_fail_closed(
        permission in any_permission(),
        role in any_role(),
    ) {
        for state in [SessionState::Loading, SessionState::Unauthenticated] {
            prop_assert!(!has_permission(&state, permission));
            prop_assert!(!has_role(&state, role));
        }
    }

    #[test]
    fn prop_matrix_fidelity(role in any_role(), permission in any_permission()) {
        let state = SessionState::resolved(Identity::new(role));
        prop_assert_eq!(
            has_permission(&state, permission),
            permissions_for(role).contains(permission)
        );
    }

    #[test]
    fn prop_unknown_role_names_have_no_permissions(name in "[a-z_]{0,24}") {
        prop_assume!(Role::normalize(&name).is_none());
        prop_assert!(permissions_for_name(&name).is_empty());

        let record = format!(r#"{{"name":"x","role":"{}"}}"#, name);
        let state = IdentityResolver::default().resolve_raw(Some(&record));
        prop_assert_eq!(state, SessionState::Unauthenticated);
    }

    #[test]
    fn prop_arbitrary_blobs_never_grant_unknown_roles(blob in ".{0,64}") {
        let state = IdentityResolver::default().resolve_raw(Some(&blob));
        if let Some(identity) = state.identity() {
            prop_assert!(Role::ALL.contains(&identity.role()));
        }
    }

    #[test]
    fn prop_alias_equivalence(permission in any_permission(), role in any_role()) {
        let resolver = IdentityResolver::default();

        for (alias, canonical) in ROLE_ALIASES {
            let via_alias = resolver.resolve_raw(Some(&format!(r#"{{"role":"{}"}}"#, alias)));
            let direct = resolver.resolve_raw(Some(&format!(r#"{{"role":"{}"}}"#, canonical)));

            prop_assert_eq!(
                has_permission(&via_alias, permission),
                has_permission(&direct, permission)
            );
            prop_assert_eq!(has_role(&via_alias, role), has_role(&direct, role));
        }
    }

    #[test]
    fn prop_wrapping_is_idempotent(
        requirement in any_requirement(),
        session in any_session(),
        with_fallback in any::<bool>(),
    ) {
        let content = |s: &SessionState| match s.identity() {
            Some(identity) => format!("panel:{}", identity.role()),
            None => "panel".to_string(),
        };

        let mut once = content.guarded(requirement.clone());
        let mut inner = content.guarded(requirement.clone());
        if with_fallback {
            once = once.with_fallback("denied".to_string());
            inner = inner.with_fallback("denied".to_string());
        }
        let mut twice = inner.guarded(requirement);
        if with_fallback {
            twice = twice.with_fallback("denied".to_string());
        }

        prop_assert_eq!(once.render(&session), twice.render(&session));
    }

    #[test]
    fn prop_no_flash_while_loading(requirement in any_requirement()) {
        let guard = RenderGuard::new(requirement).with_fallback("fallback".to_string());
        let mut rendered = false;

        let out = guard.render(&SessionState::Loading, || {
            rendered = true;
            "protected".to_string()
        });

        prop_assert!(!rendered);
        prop_assert_eq!(out, "");
    }

    #[test]
    fn prop_decisions_are_deterministic(
        requirement in any_requirement(),
        session in any_session(),
    ) {
        let first = requirement.decide(&session);
        for _ in 0..3 {
            prop_assert_eq!(requirement.decide(&session), first);
        }
    }
}
