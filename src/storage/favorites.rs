//! Persisted list of favorited giveaways.
//!
//! [`FavoritesStore`] is the single source of truth for favorite status across
//! restarts. It is constructed once by the composition root and shared with
//! every state manager through an `Arc`.
//!
//! Writes are serialized by an internal mutex and persisted before the call
//! returns. Persistence failures are logged and swallowed: the in-memory list
//! still updates, and callers never observe the failure.

use crate::domain::GiveawayItem;
use crate::storage::backend::KeyValueStore;
use crate::storage::models::{PreferenceChange, PreferenceKey, SubscriptionId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

type Observer = Arc<dyn Fn(PreferenceChange) + Send + Sync>;

struct Inner {
    backend: Box<dyn KeyValueStore>,
    favorites: Vec<GiveawayItem>,
}

/// Favorite giveaways backed by a [`KeyValueStore`].
///
/// # Examples
///
/// ```
/// use giveaway::storage::{FavoritesStore, MemoryStore};
/// use giveaway::GiveawayItem;
///
/// let store = FavoritesStore::new(Box::new(MemoryStore::default()));
/// let mut item = GiveawayItem::mock(1);
/// item.is_favorite = true;
/// store.append(item);
/// assert!(store.contains(1));
/// ```
pub struct FavoritesStore {
    inner: Mutex<Inner>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: Mutex<u64>,
}

impl FavoritesStore {
    /// Opens the store, decoding any previously persisted favorites.
    ///
    /// An absent key or an undecodable value yields an empty list.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        let key = PreferenceKey::FavoriteGiveaways.storage_key();
        let favorites = match backend.get(key) {
            Ok(Some(value)) => serde_json::from_value::<Vec<GiveawayItem>>(value)
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "stored favorites could not be decoded, starting empty");
                    Vec::new()
                }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored favorites, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = favorites.len(), "favorites store opened");

        Self {
            inner: Mutex::new(Inner { backend, favorites }),
            observers: Mutex::new(Vec::new()),
            next_subscription: Mutex::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves the list itself intact.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Snapshot of the current favorites, in insertion order.
    #[must_use]
    pub fn favorites(&self) -> Vec<GiveawayItem> {
        self.lock().favorites.clone()
    }

    /// Replaces the whole list.
    pub fn set_favorites(&self, favorites: Vec<GiveawayItem>) {
        self.mutate(|list| *list = favorites);
    }

    /// Applies `mutation` to the list, persists it and notifies subscribers.
    pub fn mutate<F>(&self, mutation: F)
    where
        F: FnOnce(&mut Vec<GiveawayItem>),
    {
        {
            let mut inner = self.lock();
            mutation(&mut inner.favorites);
            Self::persist(&mut inner);
        }
        self.notify(PreferenceKey::FavoriteGiveaways);
    }

    /// Adds `item`, replacing any stored snapshot with the same id.
    pub fn append(&self, item: GiveawayItem) {
        tracing::debug!(item_id = item.id, "adding favorite");
        self.mutate(|list| {
            list.retain(|existing| existing.id != item.id);
            list.push(item);
        });
    }

    /// Removes every snapshot with `id`.
    pub fn remove(&self, id: i64) {
        tracing::debug!(item_id = id, "removing favorite");
        self.mutate(|list| list.retain(|existing| existing.id != id));
    }

    /// Records the outcome of a favorite toggle: stored when `item.is_favorite`
    /// is set, removed otherwise.
    pub fn apply_toggle(&self, item: &GiveawayItem) {
        if item.is_favorite {
            self.append(item.clone());
        } else {
            self.remove(item.id);
        }
    }

    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.lock().favorites.iter().any(|f| f.id == id)
    }

    #[must_use]
    pub fn favorite_ids(&self) -> HashSet<i64> {
        self.lock().favorites.iter().map(|f| f.id).collect()
    }

    /// Overwrites `is_favorite` on freshly fetched items from store membership.
    ///
    /// Every other field keeps the fetched value.
    #[must_use]
    pub fn merge_favorites(&self, mut items: Vec<GiveawayItem>) -> Vec<GiveawayItem> {
        let ids = self.favorite_ids();
        for item in &mut items {
            item.is_favorite = ids.contains(&item.id);
        }
        items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers `observer`, called after every write with the changed key.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(PreferenceChange) + Send + Sync + 'static,
    {
        let id = {
            let mut next = self
                .next_subscription
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *next += 1;
            SubscriptionId(*next)
        };
        self.observers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .retain(|(existing, _)| *existing != id);
    }

    fn persist(inner: &mut Inner) {
        let key = PreferenceKey::FavoriteGiveaways.storage_key();
        let value = match serde_json::to_value(&inner.favorites) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode favorites, skipping persist");
                return;
            }
        };
        if let Err(e) = inner.backend.set(key, value) {
            tracing::warn!(error = %e, "failed to persist favorites");
        }
    }

    fn notify(&self, key: PreferenceKey) {
        // Observers run outside the lock so they may read the store.
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer(PreferenceChange { key });
        }
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("count", &self.len())
            .finish_non_exhaustive()
    }
}
