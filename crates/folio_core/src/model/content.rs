//! Content type catalog shared by keys, adapters and the content cache.
//!
//! # Responsibility
//! - Define the closed set of content kinds served by adapters.
//! - Provide one zero-sized marker type per kind so keys can be narrowed to a
//!   single kind at compile time.
//! - Derive every tree tag (`<kind>Tree`) at compile time.
//!
//! # Invariants
//! - `ContentType::tree_tag()` is always `as_str()` followed by `Tree`.
//! - `ContentKind` is sealed: only the kinds declared here implement it.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// Type-level content kind used as the key scheme's generic parameter.
///
/// Implemented by the runtime enum [`ContentType`] (any kind) and by one
/// marker type per variant (exactly that kind).
pub trait ContentKind: Copy + Eq + Ord + Hash + Debug + sealed::Sealed {
    /// Runtime content type carried by this kind value.
    fn content_type(self) -> ContentType;

    /// Narrows a runtime content type into this kind.
    ///
    /// Returns `None` when `value` is not representable by `Self`.
    fn from_content_type(value: ContentType) -> Option<Self>;
}

/// Tree tag suffix appended to every content type tag.
pub const TREE_TAG_SUFFIX: &str = "Tree";

macro_rules! content_types {
    ($( $(#[$meta:meta])* $variant:ident => $tag:literal ),+ $(,)?) => {
        /// Closed set of content kinds served through adapters.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ContentType {
            $( $(#[$meta])* $variant, )+
        }

        impl ContentType {
            /// Every declared content type, in declaration order.
            pub const ALL: &'static [ContentType] = &[$(ContentType::$variant),+];

            /// Stable wire tag (`note`, `task`, ...).
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $tag, )+
                }
            }

            /// Tree tag for this content type, fixed at compile time.
            pub const fn tree_tag(self) -> &'static str {
                match self {
                    $( Self::$variant => concat!($tag, "Tree"), )+
                }
            }
        }

        $(
            $(#[$meta])*
            ///
            /// Zero-sized marker narrowing keys to this content type.
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $variant;

            impl sealed::Sealed for $variant {}

            impl ContentKind for $variant {
                fn content_type(self) -> ContentType {
                    ContentType::$variant
                }

                fn from_content_type(value: ContentType) -> Option<Self> {
                    match value {
                        ContentType::$variant => Some($variant),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}

content_types! {
    /// Free-form markdown note.
    Note => "note",
    /// Actionable task.
    Task => "task",
    /// Calendar event.
    Event => "event",
}

impl ContentType {
    /// Parses one wire tag. Matching is exact; tags are lowercase.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|content_type| content_type.as_str() == value)
    }

    /// Resolves the base content type of a tree tag such as `noteTree`.
    pub fn from_tree_tag(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|content_type| content_type.tree_tag() == value)
    }
}

impl sealed::Sealed for ContentType {}

impl ContentKind for ContentType {
    fn content_type(self) -> ContentType {
        self
    }

    fn from_content_type(value: ContentType) -> Option<Self> {
        Some(value)
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| D::Error::custom(format!("unknown content type `{raw}`")))
    }
}
