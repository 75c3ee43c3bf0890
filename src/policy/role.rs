//! Job-function roles and legacy role spellings

use super::UnknownName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Job function of the person using the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full system access
    Administrator,
    /// Collects and processes evidence
    ForensicInvestigator,
    /// Opens cases and assigns investigators
    CaseManager,
    /// Reviews and verifies evidence
    EvidenceReviewer,
    /// Read-only oversight of the audit trail and metrics
    Auditor,
}

/// Legacy role spellings and the canonical role they stand for
pub const ROLE_ALIASES: &[(&str, Role)] = &[("investigator", Role::ForensicInvestigator)];

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 5] = [
        Role::Administrator,
        Role::ForensicInvestigator,
        Role::CaseManager,
        Role::EvidenceReviewer,
        Role::Auditor,
    ];

    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::ForensicInvestigator => "forensic_investigator",
            Role::CaseManager => "case_manager",
            Role::EvidenceReviewer => "evidence_reviewer",
            Role::Auditor => "auditor",
        }
    }

    /// Resolve a stored role string to its canonical role
    ///
    /// Accepts canonical names and the legacy spellings in [`ROLE_ALIASES`].
    /// Anything else yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use evidence_guard::policy::Role;
    ///
    /// assert_eq!(Role::normalize("auditor"), Some(Role::Auditor));
    /// assert_eq!(Role::normalize("investigator"), Some(Role::ForensicInvestigator));
    /// assert_eq!(Role::normalize("superuser"), None);
    /// ```
    pub fn normalize(raw: &str) -> Option<Role> {
        if let Ok(role) = raw.parse() {
            return Some(role);
        }

        ROLE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == raw)
            .map(|(_, role)| *role)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownName;

    /// Parses canonical names only; use [`Role::normalize`] for stored data
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownName {
                kind: "role",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn test_from_str_rejects_alias() {
        // Aliases are only accepted through normalize
        assert!("investigator".parse::<Role>().is_err());
        assert_eq!(
            Role::normalize("investigator"),
            Some(Role::ForensicInvestigator)
        );
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        assert_eq!(Role::normalize("Administrator"), None);
        assert_eq!(Role::normalize(""), None);
    }

    #[test]
    fn test_aliases_never_shadow_canonical_names() {
        for (alias, _) in ROLE_ALIASES {
            assert!(alias.parse::<Role>().is_err());
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Role::CaseManager).unwrap();
        assert_eq!(json, "\"case_manager\"");

        let role: Role = serde_json::from_str("\"evidence_reviewer\"").unwrap();
        assert_eq!(role, Role::EvidenceReviewer);
    }
}
