//! Wire shape of the stored session blob

use crate::error::IdentityError;
use serde::{Deserialize, Serialize};

/// Session record as written by the login and registration pages
///
/// Only `role` is required. Unknown extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email for password logins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Wallet address for wallet logins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Role as stored, possibly a legacy spelling
    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl SessionRecord {
    /// Parse a record from its stored text
    pub fn from_json(json: &str) -> Result<Self, IdentityError> {
        serde_json::from_str(json).map_err(|e| IdentityError::MalformedIdentity(e.to_string()))
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
