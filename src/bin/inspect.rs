//! Evidence Guard session inspector
//!
//! Resolves the session stored in a JSON key-value file and reports what the
//! dashboard would allow it to do.

use anyhow::Context;
use clap::Parser;
use evidence_guard::guard::{Decision, Requirement};
use evidence_guard::identity::{IdentityResolver, JsonFileStore, SessionState};
use evidence_guard::{AuthConfig, LandingRouter, Permission, Role};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "evidence-guard-inspect")]
#[command(about = "Inspect the stored dashboard session and its permissions")]
struct Args {
    /// Path to the JSON key-value store file
    #[arg(short = 's', long)]
    store: PathBuf,

    /// Path to a TOML guard configuration
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Check a required permission
    #[arg(short = 'p', long)]
    permission: Option<Permission>,

    /// Check a required role (repeatable; any grants)
    #[arg(short = 'r', long = "role")]
    roles: Vec<Role>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct Report {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stored_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    permissions: evidence_guard::PermissionSet,
    landing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    granted: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AuthConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AuthConfig::default(),
    };

    let store = JsonFileStore::new(&args.store);
    let resolver = IdentityResolver::new(&config.session_key);
    info!("Inspecting session '{}' in {:?}", config.session_key, store.path());

    let (session, reason) = match resolver.try_resolve(&store) {
        Ok(identity) => (SessionState::resolved(identity), None),
        Err(e) => (SessionState::Unauthenticated, Some(e.to_string())),
    };

    let requirement = Requirement {
        permission: args.permission,
        roles: args.roles.clone(),
    };
    let granted = if args.permission.is_none() && args.roles.is_empty() {
        None
    } else {
        Some(requirement.decide(&session) == Decision::Granted)
    };

    let identity = session.identity();
    let report = Report {
        authenticated: identity.is_some(),
        reason,
        role: identity.map(|i| i.role()),
        stored_role: identity.map(|i| i.stored_role().to_string()),
        name: identity.and_then(|i| i.display_name()).map(str::to_string),
        permissions: session.permissions(),
        landing: LandingRouter::from_config(&config)
            .destination(&session)
            .map(str::to_string),
        granted,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    Ok(())
}

fn print_text(report: &Report) {
    match (&report.role, &report.reason) {
        (Some(role), _) => {
            println!("Session:     authenticated as {}", role);
            if let Some(stored) = report.stored_role.as_deref().filter(|s| *s != role.as_str()) {
                println!("Stored role: {} (legacy spelling)", stored);
            }
            if let Some(name) = &report.name {
                println!("Name:        {}", name);
            }
        }
        (None, Some(reason)) => println!("Session:     unauthenticated ({})", reason),
        (None, None) => println!("Session:     unauthenticated"),
    }

    let permissions: Vec<&str> = report.permissions.iter().map(|p| p.as_str()).collect();
    if permissions.is_empty() {
        println!("Permissions: none");
    } else {
        println!("Permissions: {}", permissions.join(", "));
    }

    if let Some(landing) = &report.landing {
        println!("Landing:     {}", landing);
    }

    if let Some(granted) = report.granted {
        println!("Requirement: {}", if granted { "granted" } else { "denied" });
    }
}
