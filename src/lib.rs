//! # Evidence Guard - Role-Based Access Control for the Evidence Dashboard
//!
//! `evidence-guard` decides, for the person using the evidence-management
//! dashboard, which routes, regions, and actions are permitted:
//!
//! - **Closed vocabulary**: five job-function roles, fifteen permissions, and a
//!   total role → permission matrix
//! - **Fail-closed identity resolution**: missing, malformed, or unknown-role
//!   sessions all become `Unauthenticated`; legacy role spellings are normalized
//! - **Three guard shapes** on one evaluator: route guard, render guard, and
//!   wrapping guard
//!
//! ## Quick Start
//!
//! ```rust
//! use evidence_guard::guard::{RenderGuard, Requirement, RouteGuard, RoutePhase};
//! use evidence_guard::identity::{IdentityResolver, MemoryStore};
//! use evidence_guard::policy::{Permission, Role};
//! use evidence_guard::config::AuthConfig;
//!
//! let store = MemoryStore::new();
//! store.set("user", r#"{"name":"Sam","role":"investigator"}"#);
//!
//! let config = AuthConfig::default();
//! let session = IdentityResolver::new(&config.session_key).resolve(&store);
//!
//! // Route guard for the investigator dashboard
//! let mut route = RouteGuard::from_config(&config).require_roles([Role::ForensicInvestigator]);
//! let mut navigations: Vec<String> = Vec::new();
//! assert_eq!(route.settle(&session, &mut navigations), &RoutePhase::Authorized);
//!
//! // Render guard for the upload button
//! let upload = RenderGuard::new(Requirement::permission(Permission::UploadEvidence));
//! assert_eq!(upload.render(&session, || "Upload Evidence".to_string()), "Upload Evidence");
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod guard;
pub mod identity;
pub mod landing;
pub mod policy;

pub use crate::{
    config::{AuthConfig, RedirectTargets},
    error::{ConfigError, GuardError, IdentityError, Result, StoreError},
    evaluator::{has_any_role, has_permission, has_role},
    guard::{Component, Decision, GuardExt, Guarded, RenderGuard, Requirement, RouteGuard},
    identity::{Identity, IdentityResolver, IdentityStore, SessionState},
    landing::LandingRouter,
    policy::{permissions_for, Permission, PermissionSet, Role},
};
