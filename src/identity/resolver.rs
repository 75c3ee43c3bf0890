//! Session lifecycle and identity resolution

use super::{IdentityStore, SessionRecord};
use crate::error::{IdentityError, Result as GuardResult};
use crate::policy::Role;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key the dashboard stores its session record under
pub const DEFAULT_SESSION_KEY: &str = "user";

/// Resolved, normalized view of who is using the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    role: Role,
    stored_role: String,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Wallet address for wallet logins
    pub address: Option<String>,
    pub organization: Option<String>,
}

impl Identity {
    /// Identity with a role and no display attributes
    pub fn new(role: Role) -> Self {
        Identity {
            role,
            stored_role: role.as_str().to_string(),
            name: None,
            email: None,
            address: None,
            organization: None,
        }
    }

    /// Validate a stored record, normalizing legacy role spellings
    pub fn from_record(record: SessionRecord) -> Result<Self, IdentityError> {
        let role = Role::normalize(&record.role)
            .ok_or_else(|| IdentityError::UnknownRole(record.role.clone()))?;

        Ok(Identity {
            role,
            stored_role: record.role,
            name: record.name,
            email: record.email,
            address: record.address,
            organization: record.organization,
        })
    }

    /// Canonical role
    pub fn role(&self) -> Role {
        self.role
    }

    /// Role spelling found in storage (may be a legacy alias)
    pub fn stored_role(&self) -> &str {
        &self.stored_role
    }

    /// Best display label: name, then email, then wallet address
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .or(self.address.as_deref())
    }
}

/// Session lifecycle for one page load
///
/// Starts as `Loading` and settles exactly once. The resolved identity is an
/// immutable snapshot shared by every guard that reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Loading,
    Resolved(Arc<Identity>),
    Unauthenticated,
}

impl SessionState {
    /// Shorthand for a resolved state
    pub fn resolved(identity: Identity) -> Self {
        SessionState::Resolved(Arc::new(identity))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionState::Resolved(_))
    }

    /// The resolved identity, if any
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Resolved(identity) => Some(identity),
            _ => None,
        }
    }
}

impl From<Result<Identity, IdentityError>> for SessionState {
    fn from(result: Result<Identity, IdentityError>) -> Self {
        match result {
            Ok(identity) => SessionState::resolved(identity),
            Err(_) => SessionState::Unauthenticated,
        }
    }
}

/// Reads and validates the session record
///
/// Never writes back to the store.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    session_key: String,
}

impl IdentityResolver {
    pub fn new(session_key: impl Into<String>) -> Self {
        IdentityResolver {
            session_key: session_key.into(),
        }
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// Resolve a raw stored value into a lifecycle state
    ///
    /// # Examples
    ///
    /// ```
    /// use evidence_guard::identity::{IdentityResolver, SessionState};
    /// use evidence_guard::policy::Role;
    ///
    /// let resolver = IdentityResolver::default();
    ///
    /// let state = resolver.resolve_raw(Some(r#"{"name":"Sam","role":"investigator"}"#));
    /// assert_eq!(state.identity().map(|i| i.role()), Some(Role::ForensicInvestigator));
    ///
    /// assert_eq!(resolver.resolve_raw(None), SessionState::Unauthenticated);
    /// assert_eq!(resolver.resolve_raw(Some("{oops")), SessionState::Unauthenticated);
    /// ```
    pub fn resolve_raw(&self, raw: Option<&str>) -> SessionState {
        self.try_resolve_raw(raw).into()
    }

    /// Like [`resolve_raw`](Self::resolve_raw), keeping the failure reason
    pub fn try_resolve_raw(&self, raw: Option<&str>) -> Result<Identity, IdentityError> {
        let result = raw
            .ok_or(IdentityError::MissingIdentity)
            .and_then(SessionRecord::from_json)
            .and_then(Identity::from_record);

        match &result {
            Ok(identity) => debug!(
                "Resolved session '{}' as {} (stored as '{}')",
                self.session_key, identity.role, identity.stored_role
            ),
            Err(IdentityError::MissingIdentity) => {
                debug!("No session stored under '{}'", self.session_key)
            }
            Err(e) => warn!("Discarding session '{}': {}", self.session_key, e),
        }

        result
    }

    /// Read from a store and resolve
    ///
    /// A store read failure is treated as an absent record.
    pub fn resolve<S: IdentityStore + ?Sized>(&self, store: &S) -> SessionState {
        let raw = self.read_or_absent(store.read(&self.session_key));
        self.resolve_raw(raw.as_deref())
    }

    /// Read from a store, keeping the failure reason
    ///
    /// Unlike [`resolve`](Self::resolve), a store read failure is reported as
    /// [`GuardError::Store`](crate::error::GuardError::Store) rather than as a
    /// missing record.
    pub fn try_resolve<S: IdentityStore + ?Sized>(&self, store: &S) -> GuardResult<Identity> {
        let raw = store.read(&self.session_key)?;
        Ok(self.try_resolve_raw(raw.as_deref())?)
    }

    /// Resolve from an async store
    ///
    /// The only suspension point of the lifecycle is the store read.
    #[cfg(feature = "async")]
    pub async fn resolve_async<S: super::AsyncIdentityStore + ?Sized>(
        &self,
        store: &S,
    ) -> SessionState {
        let raw = self.read_or_absent(store.read(&self.session_key).await);
        self.resolve_raw(raw.as_deref())
    }

    fn read_or_absent(
        &self,
        read: Result<Option<String>, crate::error::StoreError>,
    ) -> Option<String> {
        read.unwrap_or_else(|e| {
            warn!("Failed to read session '{}': {}", self.session_key, e);
            None
        })
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_KEY)
    }
}
