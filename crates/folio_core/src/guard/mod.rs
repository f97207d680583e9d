//! Auth-gated navigation guards.
//!
//! # Responsibility
//! - Decide between loading, nested content and redirect per auth snapshot.
//! - Share one state machine between the guest and private zones.
//!
//! # Invariants
//! - Loading snapshots (and no snapshot) always yield `Pending`.
//! - No state is terminal; every publication is re-evaluated.
//! - Redirects use replace semantics and fire once per denied episode.

mod route_guard;
mod zone;

pub use route_guard::{
    CommitOutcome, GuardError, GuardFrame, GuardView, RouteGuard, RouteGuardBuilder,
};
pub use zone::{GuardState, Zone};
