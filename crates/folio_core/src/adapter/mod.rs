//! Content adapter contract.
//!
//! # Responsibility
//! - Define the shape of requests issued to the pluggable data-access layer.
//! - Keep transport and storage details outside core.
//!
//! # Invariants
//! - Adapters are addressed only through typed keys.
//! - A record fetched for a key carries that same key.

use crate::key::{AnyItemKey, AnyTreeKey};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AdapterResult<T> = Result<T, AdapterError>;

/// One content entity as returned by an adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub key: AnyItemKey,
    pub project_id: String,
    /// Adapter-defined body; core never inspects it.
    pub payload: serde_json::Value,
}

/// Pluggable data-access layer.
pub trait ContentAdapter {
    /// Stable adapter id used in diagnostics.
    fn adapter_id(&self) -> &str;

    /// Fetches one item; `Ok(None)` when it does not exist.
    fn fetch_item(&self, key: &AnyItemKey) -> AdapterResult<Option<ContentRecord>>;

    /// Fetches every item of the tree's base type inside its project.
    fn fetch_tree(&self, key: &AnyTreeKey) -> AdapterResult<Vec<ContentRecord>>;
}

impl<A: ContentAdapter + ?Sized> ContentAdapter for Box<A> {
    fn adapter_id(&self) -> &str {
        (**self).adapter_id()
    }

    fn fetch_item(&self, key: &AnyItemKey) -> AdapterResult<Option<ContentRecord>> {
        (**self).fetch_item(key)
    }

    fn fetch_tree(&self, key: &AnyTreeKey) -> AdapterResult<Vec<ContentRecord>> {
        (**self).fetch_tree(key)
    }
}

/// Adapter-side failures surfaced to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// Backend cannot be reached right now.
    Unavailable(String),
    /// Backend answered with data core cannot interpret.
    InvalidResponse(String),
}

impl Display for AdapterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "adapter unavailable: {message}"),
            Self::InvalidResponse(message) => {
                write!(f, "adapter returned invalid response: {message}")
            }
        }
    }
}

impl Error for AdapterError {}
