//! Grantable capabilities

use super::UnknownName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single capability that a role may be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    UserManagement,
    SystemConfiguration,
    UploadEvidence,
    HashEvidence,
    WatermarkEvidence,
    ViewEvidence,
    DownloadEvidence,
    VerifyEvidence,
    CreateCases,
    ManageCases,
    LinkEvidenceToCases,
    ViewAuditTrail,
    ViewSystemMetrics,
    GenerateReports,
    AssignInvestigators,
}

impl Permission {
    /// Every permission, in declaration order
    pub const ALL: [Permission; 15] = [
        Permission::UserManagement,
        Permission::SystemConfiguration,
        Permission::UploadEvidence,
        Permission::HashEvidence,
        Permission::WatermarkEvidence,
        Permission::ViewEvidence,
        Permission::DownloadEvidence,
        Permission::VerifyEvidence,
        Permission::CreateCases,
        Permission::ManageCases,
        Permission::LinkEvidenceToCases,
        Permission::ViewAuditTrail,
        Permission::ViewSystemMetrics,
        Permission::GenerateReports,
        Permission::AssignInvestigators,
    ];

    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::UserManagement => "user_management",
            Permission::SystemConfiguration => "system_configuration",
            Permission::UploadEvidence => "upload_evidence",
            Permission::HashEvidence => "hash_evidence",
            Permission::WatermarkEvidence => "watermark_evidence",
            Permission::ViewEvidence => "view_evidence",
            Permission::DownloadEvidence => "download_evidence",
            Permission::VerifyEvidence => "verify_evidence",
            Permission::CreateCases => "create_cases",
            Permission::ManageCases => "manage_cases",
            Permission::LinkEvidenceToCases => "link_evidence_to_cases",
            Permission::ViewAuditTrail => "view_audit_trail",
            Permission::ViewSystemMetrics => "view_system_metrics",
            Permission::GenerateReports => "generate_reports",
            Permission::AssignInvestigators => "assign_investigators",
        }
    }

    /// Bit position inside a [`PermissionSet`](super::PermissionSet)
    pub(crate) fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownName {
                kind: "permission",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_roundtrip() {
        for permission in Permission::ALL {
            assert_eq!(permission.as_str().parse::<Permission>().unwrap(), permission);
        }
        assert!("delete_everything".parse::<Permission>().is_err());
    }

    #[test]
    fn test_bits_are_distinct() {
        let bits: HashSet<u16> = Permission::ALL.iter().map(|p| p.bit()).collect();
        assert_eq!(bits.len(), Permission::ALL.len());
    }

    #[test]
    fn test_serde_matches_as_str() {
        for permission in Permission::ALL {
            let json = serde_json::to_string(&permission).unwrap();
            assert_eq!(json, format!("\"{}\"", permission.as_str()));
        }
    }
}
