//! Navigation capability and redirect destinations.
//!
//! # Responsibility
//! - Define the replace-only navigation contract used by route guards.
//! - Validate host-supplied redirect destinations.
//!
//! # Invariants
//! - Guard redirects never push history entries.
//! - Destinations come from configuration, never from guard logic.

mod config;
mod history;

pub use config::{
    Destinations, NavigationConfig, NavigationConfigError, DEFAULT_HOME_PATH, DEFAULT_TOP_PATH,
};
pub use history::{HistoryNavigator, Navigator};
