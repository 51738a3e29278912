//! Grow-only keyed cache of shared instances.

use crate::{CacheError, CacheResult};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A keyed store holding exactly one shared instance per key.
///
/// `V` may be unsized, so a cache can hold trait objects (`SharedCache<Tier,
/// dyn CareStrategy>`) or string slices (`SharedCache<String, str>`).
///
/// Concurrent first inserts for the same key race on the write lock; exactly
/// one value survives and every caller receives that instance.
pub struct SharedCache<K, V: ?Sized> {
    /// Label used in errors and logs ("hydration", "growth state", ...).
    family: &'static str,
    entries: RwLock<HashMap<K, Arc<V>>>,
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: ?Sized,
{
    /// Creates an empty cache for the given flyweight family.
    #[must_use]
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the family label.
    #[must_use]
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Returns the cached instance for `key`.
    ///
    /// Fails with [`CacheError::NotFound`] when nothing was ever inserted
    /// under `key`.
    pub fn get<Q>(&self, key: &Q) -> CacheResult<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.read()
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::NotFound {
                family: self.family,
                key: format!("{key:?}"),
            })
    }

    /// Returns the instance cached under `key`, inserting `value` first if the
    /// key is absent.
    ///
    /// An existing entry is never replaced: if another value is already
    /// cached, `value` is dropped and the cached instance is returned.
    pub fn get_or_insert(&self, key: K, value: Arc<V>) -> Arc<V> {
        self.get_or_insert_with(key, move || value)
    }

    /// Like [`get_or_insert`](Self::get_or_insert), but only builds the value
    /// when the key is absent.
    pub fn get_or_insert_with<F>(&self, key: K, make: F) -> Arc<V>
    where
        F: FnOnce() -> Arc<V>,
    {
        if let Some(existing) = self.read().get(&key) {
            return Arc::clone(existing);
        }

        let mut entries = self.write();
        match entries.entry(key) {
            Entry::Occupied(entry) => {
                // Lost the race between releasing the read lock and taking the write lock.
                debug!(family = self.family, key = ?entry.key(), "flyweight already cached");
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => Arc::clone(entry.insert(make())),
        }
    }

    /// Returns true if an instance is cached under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().contains_key(key)
    }

    /// Number of cached instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of the cached keys, in no particular order.
    #[must_use]
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.read().keys().cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, Arc<V>>> {
        // Entries are inserted whole, so a poisoned lock still guards a consistent map.
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, Arc<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> fmt::Debug for SharedCache<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCache")
            .field("family", &self.family)
            .field("len", &self.len())
            .finish()
    }
}
