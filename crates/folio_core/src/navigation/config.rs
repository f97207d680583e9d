//! Redirect destination configuration.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default guest-zone redirect target for authenticated users.
pub const DEFAULT_HOME_PATH: &str = "/home";
/// Default private-zone redirect target for anonymous users.
pub const DEFAULT_TOP_PATH: &str = "/";

/// Raw navigation configuration as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Where the guest zone sends authenticated users.
    pub home: String,
    /// Where the private zone sends anonymous users.
    pub top: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            home: DEFAULT_HOME_PATH.to_string(),
            top: DEFAULT_TOP_PATH.to_string(),
        }
    }
}

impl NavigationConfig {
    /// Parses a JSON object such as `{"home": "/home", "top": "/"}`.
    ///
    /// Missing fields fall back to defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, NavigationConfigError> {
        serde_json::from_str(raw).map_err(NavigationConfigError::Parse)
    }

    /// Validates both destinations.
    ///
    /// # Errors
    /// - `EmptyDestination` when a path is blank.
    /// - `RelativeDestination` when a path does not start with `/`.
    pub fn validate(&self) -> Result<Destinations, NavigationConfigError> {
        Ok(Destinations {
            home: normalize_destination("home", &self.home)?,
            top: normalize_destination("top", &self.top)?,
        })
    }
}

/// Validated redirect targets handed to route guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    home: String,
    top: String,
}

impl Destinations {
    pub fn new(
        home: impl Into<String>,
        top: impl Into<String>,
    ) -> Result<Self, NavigationConfigError> {
        NavigationConfig {
            home: home.into(),
            top: top.into(),
        }
        .validate()
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn top(&self) -> &str {
        &self.top
    }
}

fn normalize_destination(
    name: &'static str,
    value: &str,
) -> Result<String, NavigationConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NavigationConfigError::EmptyDestination(name));
    }
    if !trimmed.starts_with('/') {
        return Err(NavigationConfigError::RelativeDestination {
            name,
            value: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Navigation configuration errors.
#[derive(Debug)]
pub enum NavigationConfigError {
    Parse(serde_json::Error),
    EmptyDestination(&'static str),
    RelativeDestination { name: &'static str, value: String },
}

impl Display for NavigationConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid navigation config: {err}"),
            Self::EmptyDestination(name) => {
                write!(f, "navigation destination `{name}` must not be empty")
            }
            Self::RelativeDestination { name, value } => write!(
                f,
                "navigation destination `{name}` must be an absolute path, got `{value}`"
            ),
        }
    }
}

impl Error for NavigationConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
