//! Auth state snapshot shape published by the auth provider.

use serde::{Deserialize, Serialize};

/// Resolved auth payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub is_authenticated: bool,
}

/// One observation of the auth provider.
///
/// `data` is meaningless while `is_loading` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AuthData>,
}

/// Three-way reading of an [`AuthSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Loading,
    Authenticated,
    /// Resolved with no data, or with `isAuthenticated = false`.
    Unauthenticated,
}

impl AuthSnapshot {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            data: None,
        }
    }

    pub fn authenticated() -> Self {
        Self::resolved(Some(AuthData {
            is_authenticated: true,
        }))
    }

    /// Resolved snapshot without data.
    pub fn unauthenticated() -> Self {
        Self::resolved(None)
    }

    pub fn resolved(data: Option<AuthData>) -> Self {
        Self {
            is_loading: false,
            data,
        }
    }

    pub fn status(&self) -> AuthStatus {
        if self.is_loading {
            return AuthStatus::Loading;
        }
        match self.data {
            Some(AuthData {
                is_authenticated: true,
            }) => AuthStatus::Authenticated,
            _ => AuthStatus::Unauthenticated,
        }
    }
}
