//! Policy model for the evidence dashboard
//!
//! Provides the closed access-control vocabulary:
//! - Job-function [`Role`]s with a legacy alias table
//! - Fine-grained [`Permission`]s
//! - A total role → permission matrix ([`permissions_for`])

mod matrix;
mod permission;
mod role;

pub use matrix::{permissions_for, permissions_for_name, PermissionSet};
pub use permission::Permission;
pub use role::{Role, ROLE_ALIASES};

/// Error returned when parsing an unrecognized role or permission name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} name: {name}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}
