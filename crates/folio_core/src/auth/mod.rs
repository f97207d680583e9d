//! Auth state consumed by route guards.
//!
//! # Responsibility
//! - Define the snapshot shape published by the external auth provider.
//! - Define the subscribable source contract guards read from.
//!
//! # Invariants
//! - Every snapshot is exactly one of loading, authenticated, unauthenticated.
//! - Sources publish in order; consumers may skip intermediate revisions.

mod snapshot;
mod store;

pub use snapshot::{AuthData, AuthSnapshot, AuthStatus};
pub use store::{
    AuthListener, AuthStateSource, AuthStateStore, Revision, Revisioned, SubscriptionId,
};
