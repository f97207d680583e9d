//! Project-scoped content tree keys.

use crate::model::content::{ContentKind, ContentType};
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// Tree tag derived from a base content kind.
///
/// Stores the base kind, never the tag text, so the tag cannot drift from
/// the content type it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreeType<T: ContentKind = ContentType>(T);

impl<T: ContentKind> TreeType<T> {
    pub fn of(base: T) -> Self {
        Self(base)
    }

    pub fn base(self) -> T {
        self.0
    }

    /// `<base>Tree`, fixed at compile time per content type.
    pub fn as_str(self) -> &'static str {
        self.0.content_type().tree_tag()
    }
}

impl<T: ContentKind> Display for TreeType<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of all content of one type inside one project: `(type, projectId)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreeKey<T: ContentKind = ContentType> {
    kind: TreeType<T>,
    project_id: String,
}

/// Tree key accepting any content type.
pub type AnyTreeKey = TreeKey<ContentType>;

/// Builds a tree key. Never fails; `project_id` is opaque.
pub fn make_tree_key<T: ContentKind>(kind: T, project_id: impl Into<String>) -> TreeKey<T> {
    TreeKey::new(kind, project_id)
}

impl<T: ContentKind> TreeKey<T> {
    pub fn new(kind: T, project_id: impl Into<String>) -> Self {
        Self {
            kind: TreeType::of(kind),
            project_id: project_id.into(),
        }
    }

    pub fn kind(&self) -> TreeType<T> {
        self.kind
    }

    /// Content type of the items this tree addresses.
    pub fn base_type(&self) -> ContentType {
        self.kind.base().content_type()
    }

    /// Wire `type` tag, e.g. `noteTree`.
    pub fn type_tag(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn erase(self) -> AnyTreeKey {
        TreeKey {
            kind: TreeType::of(self.kind.base().content_type()),
            project_id: self.project_id,
        }
    }

    pub fn narrow<K: ContentKind>(self) -> Option<TreeKey<K>> {
        let base = K::from_content_type(self.base_type())?;
        Some(TreeKey {
            kind: TreeType::of(base),
            project_id: self.project_id,
        })
    }
}

impl<T: ContentKind> Display for TreeKey<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_tag(), self.project_id)
    }
}

impl<T: ContentKind> Serialize for TreeKey<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TreeKey", 2)?;
        state.serialize_field("type", self.type_tag())?;
        state.serialize_field("projectId", &self.project_id)?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTreeKey {
    #[serde(rename = "type")]
    kind: String,
    project_id: String,
}

impl<'de, T: ContentKind> Deserialize<'de> for TreeKey<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTreeKey::deserialize(deserializer)?;
        let base = ContentType::from_tree_tag(&raw.kind)
            .ok_or_else(|| D::Error::custom(format!("unknown tree type `{}`", raw.kind)))?;
        let kind = T::from_content_type(base).ok_or_else(|| {
            D::Error::custom(format!("tree key type `{}` is not allowed here", raw.kind))
        })?;
        Ok(Self::new(kind, raw.project_id))
    }
}
