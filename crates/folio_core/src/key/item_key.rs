//! Single content item keys.

use crate::model::content::{ContentKind, ContentType};
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// Key of one content entity: `(type, id)`.
///
/// Equality and hashing are structural. `T` narrows the key to one content
/// kind; the default parameter accepts any kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey<T: ContentKind = ContentType> {
    kind: T,
    id: String,
}

/// Item key accepting any content type.
pub type AnyItemKey = ItemKey<ContentType>;

/// Builds an item key. Never fails; `id` is opaque.
pub fn make_item_key<T: ContentKind>(kind: T, id: impl Into<String>) -> ItemKey<T> {
    ItemKey::new(kind, id)
}

impl<T: ContentKind> ItemKey<T> {
    pub fn new(kind: T, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> T {
        self.kind
    }

    pub fn content_type(&self) -> ContentType {
        self.kind.content_type()
    }

    /// Wire `type` tag of this key.
    pub fn type_tag(&self) -> &'static str {
        self.content_type().as_str()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Widens this key to the any-type form.
    pub fn erase(self) -> AnyItemKey {
        ItemKey {
            kind: self.kind.content_type(),
            id: self.id,
        }
    }

    /// Narrows this key to kind `K`, or returns `None` on type mismatch.
    pub fn narrow<K: ContentKind>(self) -> Option<ItemKey<K>> {
        let kind = K::from_content_type(self.kind.content_type())?;
        Some(ItemKey { kind, id: self.id })
    }
}

impl<T: ContentKind> Display for ItemKey<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_tag(), self.id)
    }
}

impl<T: ContentKind> Serialize for ItemKey<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ItemKey", 2)?;
        state.serialize_field("type", self.type_tag())?;
        state.serialize_field("id", &self.id)?;
        state.end()
    }
}

#[derive(Deserialize)]
struct RawItemKey {
    #[serde(rename = "type")]
    kind: String,
    id: String,
}

impl<'de, T: ContentKind> Deserialize<'de> for ItemKey<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawItemKey::deserialize(deserializer)?;
        let content_type = ContentType::parse(&raw.kind)
            .ok_or_else(|| D::Error::custom(format!("unknown content type `{}`", raw.kind)))?;
        let kind = T::from_content_type(content_type).ok_or_else(|| {
            D::Error::custom(format!("item key type `{}` is not allowed here", raw.kind))
        })?;
        Ok(Self { kind, id: raw.id })
    }
}
