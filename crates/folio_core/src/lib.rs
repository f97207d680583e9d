//! Client core for Folio.
//! Owns the typed content key scheme and the auth-gated route guards.

pub mod adapter;
pub mod auth;
pub mod cache;
pub mod guard;
pub mod key;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod service;

pub use adapter::{AdapterError, AdapterResult, ContentAdapter, ContentRecord};
pub use auth::{AuthData, AuthSnapshot, AuthStateSource, AuthStateStore, AuthStatus, Revisioned};
pub use cache::ContentCache;
pub use guard::{CommitOutcome, GuardError, GuardFrame, GuardState, GuardView, RouteGuard, Zone};
pub use key::{
    make_item_key, make_tree_key, AnyItemKey, AnyTreeKey, CacheKey, ItemKey, TreeKey, TreeType,
};
pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LoggingConfig, LoggingError,
};
pub use model::content::{ContentKind, ContentType, Event, Note, Task};
pub use navigation::{
    Destinations, HistoryNavigator, NavigationConfig, NavigationConfigError, Navigator,
};
pub use service::content_service::{ContentService, ContentServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
