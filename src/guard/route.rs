//! Blocking/redirecting route guard
//!
//! State machine for one mount:
//!
//! ```text
//! Loading ─┬─ resolved & authorized ──> Authorized   (render content)
//!          ├─ resolved & unauthorized ─> Redirected   (landing)
//!          └─ unauthenticated ─────────> Redirected   (login)
//! ```
//!
//! Both settled phases are terminal for the mount: no re-check loop, and at
//! most one navigation. Re-evaluation requires a fresh mount.

use crate::config::{AuthConfig, RedirectTargets};
use crate::evaluator::has_any_role;
use crate::identity::{IdentityResolver, IdentityStore, SessionState};
use crate::policy::Role;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Host navigation (the router)
pub trait Navigator {
    fn navigate(&mut self, target: &str);
}

impl Navigator for Vec<String> {
    fn navigate(&mut self, target: &str) {
        self.push(target.to_string());
    }
}

/// Liveness of the view hosting a guard
///
/// Clones share the flag, so a token handed to an outstanding resolve sees
/// the unmount.
#[derive(Debug, Clone)]
pub struct MountToken(Arc<AtomicBool>);

impl MountToken {
    pub fn new() -> Self {
        MountToken(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for MountToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a route guard is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePhase {
    Loading,
    Authorized,
    Redirected(String),
}

/// What the guarded view should display
#[derive(Debug, PartialEq, Eq)]
pub enum RouteView<'a, T> {
    /// Neutral waiting placeholder
    Placeholder,
    Content(&'a T),
    /// Redirect issued; nothing to show
    Blank,
}

/// Guards an entire view
#[derive(Debug)]
pub struct RouteGuard {
    roles: Vec<Role>,
    redirect_to: Option<String>,
    targets: RedirectTargets,
    phase: RoutePhase,
    mount: MountToken,
}

impl RouteGuard {
    pub fn new(targets: RedirectTargets) -> Self {
        RouteGuard {
            roles: Vec::new(),
            redirect_to: None,
            targets,
            phase: RoutePhase::Loading,
            mount: MountToken::new(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.targets.clone())
    }

    /// Only sessions holding one of these roles may see the view
    ///
    /// An empty list admits every authenticated session.
    pub fn require_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    /// Override where unauthenticated sessions are sent
    ///
    /// The target is trusted as given; locations read from configuration go
    /// through [`GuardOptions::route_guard`](super::GuardOptions::route_guard),
    /// which validates them.
    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect_to = Some(target.into());
        self
    }

    pub fn required_roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn phase(&self) -> &RoutePhase {
        &self.phase
    }

    /// Token for work that may outlive the view
    pub fn mount_token(&self) -> MountToken {
        self.mount.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    /// Tear down the view; later settles are discarded
    pub fn unmount(&self) {
        self.mount.unmount();
    }

    /// Start a fresh mount, back in `Loading`
    pub fn remount(&mut self) {
        self.mount = MountToken::new();
        self.phase = RoutePhase::Loading;
    }

    /// Apply a session state, navigating at most once per mount
    pub fn settle<N: Navigator + ?Sized>(
        &mut self,
        session: &SessionState,
        navigator: &mut N,
    ) -> &RoutePhase {
        if !self.mount.is_mounted() {
            debug!("Route guard unmounted, discarding session update");
            return &self.phase;
        }

        if self.phase != RoutePhase::Loading {
            return &self.phase;
        }

        let target = match session {
            SessionState::Loading => return &self.phase,
            SessionState::Unauthenticated => self
                .redirect_to
                .clone()
                .unwrap_or_else(|| self.targets.login.clone()),
            SessionState::Resolved(_) => {
                if self.roles.is_empty() || has_any_role(session, &self.roles) {
                    debug!("Route authorized");
                    self.phase = RoutePhase::Authorized;
                    return &self.phase;
                }
                self.targets.landing.clone()
            }
        };

        debug!("Route guard redirecting to {}", target);
        navigator.navigate(&target);
        self.phase = RoutePhase::Redirected(target);
        &self.phase
    }

    /// Resolve from a store and settle in one step
    pub fn mount_with<S, N>(
        &mut self,
        resolver: &IdentityResolver,
        store: &S,
        navigator: &mut N,
    ) -> &RoutePhase
    where
        S: IdentityStore + ?Sized,
        N: Navigator + ?Sized,
    {
        let session = resolver.resolve(store);
        self.settle(&session, navigator)
    }

    /// Resolve from an async store and settle
    ///
    /// If the view unmounts (through a [`MountToken`]) while the read is
    /// outstanding, the result is discarded.
    #[cfg(feature = "async")]
    pub async fn mount_with_async<S, N>(
        &mut self,
        resolver: &IdentityResolver,
        store: &S,
        navigator: &mut N,
    ) -> &RoutePhase
    where
        S: crate::identity::AsyncIdentityStore + ?Sized,
        N: Navigator + ?Sized,
    {
        let session = resolver.resolve_async(store).await;
        self.settle(&session, navigator)
    }

    /// What to display for the current phase
    pub fn view<'a, T>(&self, content: &'a T) -> RouteView<'a, T> {
        match self.phase {
            RoutePhase::Loading => RouteView::Placeholder,
            RoutePhase::Authorized => RouteView::Content(content),
            RoutePhase::Redirected(_) => RouteView::Blank,
        }
    }
}
