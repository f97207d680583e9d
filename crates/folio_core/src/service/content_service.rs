//! Fetch-through content use-case service.
//!
//! # Responsibility
//! - Serve typed item/tree lookups from cache, falling back to the adapter.
//! - Reject adapter responses that do not match the requested key.
//!
//! # Invariants
//! - A cache hit never calls the adapter.
//! - Nothing is cached from a rejected response.

use crate::adapter::{AdapterError, ContentAdapter, ContentRecord};
use crate::cache::ContentCache;
use crate::key::{AnyItemKey, AnyTreeKey, CacheKey, ItemKey, TreeKey};
use crate::model::content::ContentKind;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from content service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentServiceError {
    Adapter(AdapterError),
    /// Adapter answered an item request with a record for another key.
    KeyMismatch {
        requested: AnyItemKey,
        returned: AnyItemKey,
    },
    /// Tree response contains a record of another type or project.
    TreeMemberMismatch {
        tree: AnyTreeKey,
        member: AnyItemKey,
    },
}

impl Display for ContentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Adapter(err) => write!(f, "{err}"),
            Self::KeyMismatch { requested, returned } => write!(
                f,
                "adapter returned `{returned}` for requested item `{requested}`"
            ),
            Self::TreeMemberMismatch { tree, member } => {
                write!(f, "adapter returned `{member}` as member of tree `{tree}`")
            }
        }
    }
}

impl Error for ContentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Adapter(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AdapterError> for ContentServiceError {
    fn from(value: AdapterError) -> Self {
        Self::Adapter(value)
    }
}

/// Content service facade over one adapter and its cache.
pub struct ContentService<A: ContentAdapter> {
    adapter: A,
    cache: ContentCache,
}

impl<A: ContentAdapter> ContentService<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            cache: ContentCache::new(),
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Returns one item, fetching it on cache miss.
    ///
    /// Missing items are not cached, so a later call asks the adapter again.
    pub fn item<T: ContentKind>(
        &mut self,
        key: &ItemKey<T>,
    ) -> Result<Option<ContentRecord>, ContentServiceError> {
        if let Some(record) = self.cache.item(key) {
            debug!(
                "event=cache_hit module=content key_type={}",
                key.type_tag()
            );
            return Ok(Some(record.clone()));
        }

        let requested = key.clone().erase();
        debug!(
            "event=cache_miss module=content key_type={} adapter={}",
            requested.type_tag(),
            self.adapter.adapter_id()
        );
        let Some(record) = self.adapter.fetch_item(&requested)? else {
            return Ok(None);
        };
        if record.key != requested {
            warn!(
                "event=adapter_mismatch module=content key_type={} returned_type={}",
                requested.type_tag(),
                record.key.type_tag()
            );
            return Err(ContentServiceError::KeyMismatch {
                requested,
                returned: record.key,
            });
        }

        self.cache.put_item(record.clone());
        Ok(Some(record))
    }

    /// Returns every item of a tree, fetching the tree on cache miss.
    pub fn tree<T: ContentKind>(
        &mut self,
        key: &TreeKey<T>,
    ) -> Result<Vec<ContentRecord>, ContentServiceError> {
        if let Some(records) = self.cache.tree(key) {
            debug!(
                "event=cache_hit module=content key_type={} members={}",
                key.type_tag(),
                records.len()
            );
            return Ok(records.into_iter().cloned().collect());
        }

        let requested = key.clone().erase();
        debug!(
            "event=cache_miss module=content key_type={} adapter={}",
            requested.type_tag(),
            self.adapter.adapter_id()
        );
        let records = self.adapter.fetch_tree(&requested)?;
        if let Some(stray) = records.iter().find(|record| {
            record.key.content_type() != requested.base_type()
                || record.project_id != requested.project_id()
        }) {
            warn!(
                "event=adapter_mismatch module=content key_type={} returned_type={}",
                requested.type_tag(),
                stray.key.type_tag()
            );
            return Err(ContentServiceError::TreeMemberMismatch {
                member: stray.key.clone(),
                tree: requested,
            });
        }

        self.cache.put_tree(&requested, records.clone());
        Ok(records)
    }

    /// Drops one cached slot so the next lookup refetches.
    pub fn invalidate(&mut self, key: impl Into<CacheKey>) -> bool {
        self.cache.invalidate(&key.into())
    }

    pub fn invalidate_project(&mut self, project_id: &str) -> usize {
        self.cache.invalidate_project(project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentService, ContentServiceError};
    use crate::adapter::{AdapterError, AdapterResult, ContentAdapter, ContentRecord};
    use crate::key::{make_item_key, make_tree_key, AnyItemKey, AnyTreeKey};
    use crate::model::content::{ContentType, Note};
    use std::cell::Cell;

    struct WrongKeyAdapter {
        calls: Cell<usize>,
    }

    impl ContentAdapter for WrongKeyAdapter {
        fn adapter_id(&self) -> &str {
            "wrong-key"
        }

        fn fetch_item(&self, key: &AnyItemKey) -> AdapterResult<Option<ContentRecord>> {
            self.calls.set(self.calls.get() + 1);
            Ok(Some(ContentRecord {
                key: make_item_key(ContentType::Task, key.id()),
                project_id: "p-1".to_string(),
                payload: serde_json::Value::Null,
            }))
        }

        fn fetch_tree(&self, _key: &AnyTreeKey) -> AdapterResult<Vec<ContentRecord>> {
            Err(AdapterError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn rejects_record_for_another_key_and_caches_nothing() {
        let mut service = ContentService::new(WrongKeyAdapter {
            calls: Cell::new(0),
        });

        let err = service.item(&make_item_key(Note, "n-1")).unwrap_err();
        assert!(matches!(err, ContentServiceError::KeyMismatch { .. }));
        assert!(service.cache().is_empty());

        service.item(&make_item_key(Note, "n-1")).unwrap_err();
        assert_eq!(service.adapter().calls.get(), 2);
    }

    #[test]
    fn adapter_errors_propagate() {
        let mut service = ContentService::new(WrongKeyAdapter {
            calls: Cell::new(0),
        });
        let err = service.tree(&make_tree_key(Note, "p-1")).unwrap_err();
        assert_eq!(
            err,
            ContentServiceError::Adapter(AdapterError::Unavailable("offline".to_string()))
        );
        assert!(err.to_string().contains("offline"));
    }
}
