//! Subscribable auth state source and its in-process implementation.

use crate::auth::snapshot::AuthSnapshot;
use log::debug;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Monotonic publication counter of a source.
pub type Revision = u64;

/// Handle returned by [`AuthStateSource::subscribe`].
pub type SubscriptionId = u64;

/// Listener invoked after every publication.
pub type AuthListener = Box<dyn Fn(&Revisioned<AuthSnapshot>) + Send + Sync>;

/// Value tagged with the revision it was published at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revisioned<T> {
    pub revision: Revision,
    pub value: T,
}

/// Consumed auth provider contract.
///
/// Implementations publish snapshots in order; readers only ever see the
/// latest one.
pub trait AuthStateSource {
    /// Latest published snapshot, or `None` before the first publication.
    fn latest(&self) -> Option<Revisioned<AuthSnapshot>>;

    fn subscribe(&self, listener: AuthListener) -> SubscriptionId;

    /// Returns whether `id` was still subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

impl<S: AuthStateSource + ?Sized> AuthStateSource for Arc<S> {
    fn latest(&self) -> Option<Revisioned<AuthSnapshot>> {
        (**self).latest()
    }

    fn subscribe(&self, listener: AuthListener) -> SubscriptionId {
        (**self).subscribe(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        (**self).unsubscribe(id)
    }
}

#[derive(Default)]
struct StoreInner {
    latest: Option<Revisioned<AuthSnapshot>>,
    next_revision: Revision,
    next_subscription: SubscriptionId,
    listeners: BTreeMap<SubscriptionId, Arc<dyn Fn(&Revisioned<AuthSnapshot>) + Send + Sync>>,
}

/// In-process auth state store. Clones share the same state.
#[derive(Clone, Default)]
pub struct AuthStateStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl AuthStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `snapshot` at revision 1.
    pub fn with_snapshot(snapshot: AuthSnapshot) -> Self {
        let store = Self::new();
        store.publish(snapshot);
        store
    }

    /// Publishes one snapshot and notifies listeners.
    ///
    /// Listeners run after the store lock is released, so a listener may
    /// read or publish again.
    pub fn publish(&self, snapshot: AuthSnapshot) -> Revision {
        let (published, listeners) = {
            let mut inner = self.lock();
            inner.next_revision += 1;
            let published = Revisioned {
                revision: inner.next_revision,
                value: snapshot,
            };
            inner.latest = Some(published);
            let listeners = inner.listeners.values().cloned().collect::<Vec<_>>();
            (published, listeners)
        };

        debug!(
            "event=auth_publish module=auth revision={} status={:?} listeners={}",
            published.revision,
            snapshot.status(),
            listeners.len()
        );
        for listener in listeners {
            listener(&published);
        }
        published.revision
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // Snapshot state stays consistent even if a listener panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AuthStateSource for AuthStateStore {
    fn latest(&self) -> Option<Revisioned<AuthSnapshot>> {
        self.lock().latest
    }

    fn subscribe(&self, listener: AuthListener) -> SubscriptionId {
        let mut inner = self.lock();
        inner.next_subscription += 1;
        let id = inner.next_subscription;
        inner.listeners.insert(id, Arc::from(listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().listeners.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthStateSource, AuthStateStore};
    use crate::auth::snapshot::AuthSnapshot;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn latest_is_none_before_first_publication() {
        let store = AuthStateStore::new();
        assert!(store.latest().is_none());
    }

    #[test]
    fn revisions_increase_and_latest_wins() {
        let store = AuthStateStore::new();
        assert_eq!(store.publish(AuthSnapshot::loading()), 1);
        assert_eq!(store.publish(AuthSnapshot::authenticated()), 2);

        let latest = store.latest().expect("published snapshot");
        assert_eq!(latest.revision, 2);
        assert_eq!(latest.value, AuthSnapshot::authenticated());
    }

    #[test]
    fn listeners_see_each_publication_until_unsubscribed() {
        let store = AuthStateStore::new();
        let seen = Arc::new(AtomicU64::new(0));
        let sink = Arc::clone(&seen);
        let id = store.subscribe(Box::new(move |published| {
            sink.store(published.revision, Ordering::SeqCst);
        }));

        store.publish(AuthSnapshot::loading());
        store.publish(AuthSnapshot::unauthenticated());
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.publish(AuthSnapshot::authenticated());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn clones_share_state() {
        let store = AuthStateStore::new();
        let handle = store.clone();
        handle.publish(AuthSnapshot::authenticated());
        assert_eq!(
            store.latest().map(|published| published.value),
            Some(AuthSnapshot::authenticated())
        );
    }
}
