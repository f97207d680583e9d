//! Zone polarity and the pure guard transition function.

use crate::auth::{AuthSnapshot, AuthStatus};
use crate::navigation::Destinations;
use std::fmt::{Display, Formatter};

/// Navigation zone guarded by one route guard instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Reachable only while NOT authenticated; denied users go `home`.
    Guest,
    /// Reachable only while authenticated; denied users go `top`.
    Private,
}

/// Guard state after one auth observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardState {
    Pending,
    Allowed,
    Denied,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Private => "private",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "guest" => Some(Self::Guest),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    /// Evaluates one observation. No observation yet counts as loading.
    pub fn evaluate(self, observation: Option<&AuthSnapshot>) -> GuardState {
        let status = observation.map_or(AuthStatus::Loading, AuthSnapshot::status);
        match (self, status) {
            (_, AuthStatus::Loading) => GuardState::Pending,
            (Self::Guest, AuthStatus::Unauthenticated)
            | (Self::Private, AuthStatus::Authenticated) => GuardState::Allowed,
            (Self::Guest, AuthStatus::Authenticated)
            | (Self::Private, AuthStatus::Unauthenticated) => GuardState::Denied,
        }
    }

    /// Redirect target used when this zone denies access.
    pub fn redirect_target(self, destinations: &Destinations) -> &str {
        match self {
            Self::Guest => destinations.home(),
            Self::Private => destinations.top(),
        }
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GuardState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Allowed => "allowed",
            Self::Denied => "denied",
        }
    }
}

impl Display for GuardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
