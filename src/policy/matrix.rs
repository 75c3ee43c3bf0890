//! Role → permission matrix
//!
//! The matrix is fixed at build time. Every role has exactly one row, enforced
//! by an exhaustive match, so lookup can never fail.

use super::{Permission, Role};
use serde::{Serialize, Serializer};
use std::fmt;

/// A set of permissions
///
/// Set semantics: no duplicates, order irrelevant. Iteration follows
/// [`Permission::ALL`] order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PermissionSet(u16);

impl PermissionSet {
    /// The empty set
    pub const fn empty() -> Self {
        PermissionSet(0)
    }

    /// Build a set from a slice (duplicates collapse)
    pub fn from_slice(permissions: &[Permission]) -> Self {
        permissions.iter().copied().collect()
    }

    /// Add a permission
    pub fn insert(&mut self, permission: Permission) {
        self.0 |= permission.bit();
    }

    /// Check membership
    pub fn contains(&self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    /// Number of permissions in the set
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate in declaration order
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = PermissionSet::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

use Permission::*;

const ADMINISTRATOR: &[Permission] = &Permission::ALL;

const FORENSIC_INVESTIGATOR: &[Permission] = &[
    UploadEvidence,
    HashEvidence,
    WatermarkEvidence,
    ViewEvidence,
    DownloadEvidence,
    VerifyEvidence,
    LinkEvidenceToCases,
    ViewAuditTrail,
    GenerateReports,
];

const CASE_MANAGER: &[Permission] = &[
    ViewEvidence,
    DownloadEvidence,
    VerifyEvidence,
    CreateCases,
    ManageCases,
    LinkEvidenceToCases,
    ViewAuditTrail,
    GenerateReports,
    AssignInvestigators,
];

const EVIDENCE_REVIEWER: &[Permission] = &[
    ViewEvidence,
    DownloadEvidence,
    VerifyEvidence,
    ViewAuditTrail,
    GenerateReports,
];

const AUDITOR: &[Permission] = &[
    ViewEvidence,
    VerifyEvidence,
    ViewAuditTrail,
    ViewSystemMetrics,
    GenerateReports,
];

/// Permissions granted to a role
///
/// # Examples
///
/// ```
/// use evidence_guard::policy::{permissions_for, Permission, Role};
///
/// assert!(permissions_for(Role::Administrator).contains(Permission::UserManagement));
/// assert!(!permissions_for(Role::EvidenceReviewer).contains(Permission::UploadEvidence));
/// ```
pub fn permissions_for(role: Role) -> PermissionSet {
    let row = match role {
        Role::Administrator => ADMINISTRATOR,
        Role::ForensicInvestigator => FORENSIC_INVESTIGATOR,
        Role::CaseManager => CASE_MANAGER,
        Role::EvidenceReviewer => EVIDENCE_REVIEWER,
        Role::Auditor => AUDITOR,
    };
    PermissionSet::from_slice(row)
}

/// Permissions granted to a stored role name
///
/// Legacy spellings are normalized first. An unrecognized name yields the
/// empty set rather than an error.
pub fn permissions_for_name(raw: &str) -> PermissionSet {
    Role::normalize(raw)
        .map(permissions_for)
        .unwrap_or_default()
}
