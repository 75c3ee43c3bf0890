//! Error types for identity resolution, stores, and configuration

use thiserror::Error;

/// Why a stored session could not become an [`Identity`](crate::identity::Identity)
///
/// Every variant collapses to [`SessionState::Unauthenticated`](crate::identity::SessionState)
/// when resolving; the distinction is only kept for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// No record stored under the session key
    #[error("No session record stored")]
    MissingIdentity,

    /// Record present but not a valid session record
    #[error("Malformed session record: {0}")]
    MalformedIdentity(String),

    /// Record parsed but its role is not canonical, even after alias normalization
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Identity store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store file is not a JSON object of string values")]
    InvalidLayout,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Session key cannot be empty")]
    EmptySessionKey,

    #[error("Invalid location for {field}: {value} (must be an absolute path like /dashboard)")]
    InvalidLocation { field: String, value: String },
}

/// Top-level error for the crate
#[derive(Error, Debug)]
pub enum GuardError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = GuardError> = std::result::Result<T, E>;
