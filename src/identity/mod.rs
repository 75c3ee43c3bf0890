//! Identity resolution
//!
//! Turns an untrusted session blob from a key-value store into a
//! [`SessionState`]. Every failure mode collapses to
//! [`SessionState::Unauthenticated`], so guards only ever see two outcomes
//! once loading completes.

mod record;
mod resolver;
mod store;

pub use record::SessionRecord;
pub use resolver::{Identity, IdentityResolver, SessionState, DEFAULT_SESSION_KEY};
#[cfg(feature = "async")]
pub use store::AsyncIdentityStore;
pub use store::{IdentityStore, JsonFileStore, MemoryStore};
