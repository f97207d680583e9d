//! Typed content key scheme.
//!
//! # Responsibility
//! - Give every content-addressing call site one structurally comparable key
//!   shape for single items and for project-scoped trees.
//! - Replace ad hoc string keys with type-checked constructors.
//!
//! # Invariants
//! - Key equality and hashing are structural.
//! - A tree key's type tag is always its base content type tag plus `Tree`.
//! - Keys are immutable values; constructors never fail and never do I/O.

mod item_key;
mod tree_key;

pub use item_key::{make_item_key, AnyItemKey, ItemKey};
pub use tree_key::{make_tree_key, AnyTreeKey, TreeKey, TreeType};

use crate::model::content::{ContentKind, ContentType};
use std::fmt::{self, Display, Formatter};

/// Cache slot key: one item or one tree, widened to the any-type form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CacheKey {
    Item(AnyItemKey),
    Tree(AnyTreeKey),
}

impl CacheKey {
    /// Base content type addressed by this key.
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Item(key) => key.content_type(),
            Self::Tree(key) => key.base_type(),
        }
    }

    /// Wire type tag (`note` or `noteTree`).
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Item(key) => key.type_tag(),
            Self::Tree(key) => key.type_tag(),
        }
    }
}

impl<T: ContentKind> From<ItemKey<T>> for CacheKey {
    fn from(value: ItemKey<T>) -> Self {
        Self::Item(value.erase())
    }
}

impl<T: ContentKind> From<TreeKey<T>> for CacheKey {
    fn from(value: TreeKey<T>) -> Self {
        Self::Tree(value.erase())
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(key) => write!(f, "{key}"),
            Self::Tree(key) => write!(f, "{key}"),
        }
    }
}
