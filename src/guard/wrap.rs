//! Wrapping guard
//!
//! Packages a [`RenderGuard`] around any [`Component`] so leaf controls
//! (buttons, links, panels) are gated without repeating the render logic.

use super::{Component, RenderGuard, Requirement};
use crate::identity::SessionState;
use crate::policy::{Permission, Role};

/// A component gated by a requirement
///
/// Wrapping twice with the same requirement renders exactly like wrapping once.
pub struct Guarded<C: Component> {
    guard: RenderGuard<C::Output>,
    inner: C,
}

impl<C: Component> Guarded<C> {
    pub fn new(requirement: Requirement, inner: C) -> Self {
        Guarded {
            guard: RenderGuard::new(requirement),
            inner,
        }
    }

    /// Content to show when denied
    pub fn with_fallback(mut self, fallback: C::Output) -> Self {
        self.guard = self.guard.with_fallback(fallback);
        self
    }

    pub fn requirement(&self) -> &Requirement {
        self.guard.requirement()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> Component for Guarded<C>
where
    C: Component,
    C::Output: Clone + Default,
{
    type Output = C::Output;

    fn render(&self, session: &SessionState) -> C::Output {
        self.guard.render(session, || self.inner.render(session))
    }
}

/// `.guarded(requirement)` for every component
pub trait GuardExt: Component + Sized {
    fn guarded(self, requirement: Requirement) -> Guarded<Self> {
        Guarded::new(requirement, self)
    }
}

impl<C: Component> GuardExt for C {}

/// Gate a component on an optional permission and/or role
///
/// With neither supplied the component is always rendered once loading
/// completes.
pub fn with_permission<C: Component>(
    component: C,
    permission: Option<Permission>,
    role: Option<Role>,
) -> Guarded<C> {
    let requirement = Requirement {
        permission,
        roles: role.into_iter().collect(),
    };
    Guarded::new(requirement, component)
}
