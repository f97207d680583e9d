//! Client-side content cache keyed by structural key equality.
//!
//! # Responsibility
//! - Hold fetched items and tree memberships under `CacheKey` slots.
//! - Resolve tree entries through item entries so one record has one copy.
//!
//! # Invariants
//! - Item slots hold records whose `key` equals the slot key.
//! - A tree entry with any missing member reads as a miss.

use crate::adapter::ContentRecord;
use crate::key::{AnyItemKey, CacheKey, ItemKey, TreeKey};
use crate::model::content::ContentKind;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
enum CacheEntry {
    Item(ContentRecord),
    Tree(Vec<AnyItemKey>),
}

#[derive(Debug, Default)]
pub struct ContentCache {
    entries: HashMap<CacheKey, CacheEntry>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn item<T: ContentKind>(&self, key: &ItemKey<T>) -> Option<&ContentRecord> {
        self.item_by_erased(&key.clone().erase())
    }

    /// Resolved tree members in fetch order.
    pub fn tree<T: ContentKind>(&self, key: &TreeKey<T>) -> Option<Vec<&ContentRecord>> {
        let slot = CacheKey::from(key.clone());
        let Some(CacheEntry::Tree(members)) = self.entries.get(&slot) else {
            return None;
        };
        members
            .iter()
            .map(|member| self.item_by_erased(member))
            .collect()
    }

    /// Stores one record under its own key, replacing any previous copy.
    pub fn put_item(&mut self, record: ContentRecord) {
        self.entries
            .insert(CacheKey::Item(record.key.clone()), CacheEntry::Item(record));
    }

    /// Stores tree membership and every member record.
    pub fn put_tree<T: ContentKind>(&mut self, key: &TreeKey<T>, records: Vec<ContentRecord>) {
        let members = records.iter().map(|record| record.key.clone()).collect();
        for record in records {
            self.put_item(record);
        }
        self.entries
            .insert(CacheKey::from(key.clone()), CacheEntry::Tree(members));
    }

    /// Removes one slot. Returns whether it existed.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes every item and tree slot of one project. Returns the number
    /// of removed slots.
    pub fn invalidate_project(&mut self, project_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, entry| match (key, entry) {
            (CacheKey::Tree(tree), _) => tree.project_id() != project_id,
            (CacheKey::Item(_), CacheEntry::Item(record)) => record.project_id != project_id,
            (CacheKey::Item(_), CacheEntry::Tree(_)) => true,
        });
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn item_by_erased(&self, key: &AnyItemKey) -> Option<&ContentRecord> {
        match self.entries.get(&CacheKey::Item(key.clone())) {
            Some(CacheEntry::Item(record)) => Some(record),
            _ => None,
        }
    }
}
