// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory object store backed by moka.

use std::collections::HashMap;
use std::hash::Hash;

use moka::future::Cache;
use strata_store::{Deferred, Error, Fetched, Lookup, ObjectStore};

use crate::builder::MemoryStoreBuilder;

/// An in-memory object store backed by moka.
///
/// The store is unbounded and entries never expire; it only forgets a key
/// when the key is deleted. Clones share the same underlying map.
///
/// Lookups are lazy: `get_multi` captures the requested keys and reads the
/// map only when its answer is realized.
///
/// # Examples
///
/// ```
/// use strata_memory::MemoryStore;
/// use strata_store::{Lookup, ObjectStore, ObjectStoreExt};
/// # futures::executor::block_on(async {
///
/// let store = MemoryStore::<String, i32>::new();
/// store.set("key".to_string(), 42).await?;
///
/// let fetched = store.get_multi(&["key".to_string(), "other".to_string()]).await?;
/// assert_eq!(fetched["key"], Lookup::Found(42));
/// assert_eq!(fetched["other"], Lookup::NotFound);
/// # Ok::<(), strata_store::Error>(())
/// # }).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoryStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder for configuring a memory store.
    #[must_use]
    pub fn builder() -> MemoryStoreBuilder<K, V> {
        MemoryStoreBuilder::new()
    }

    pub(crate) fn from_builder(builder: &MemoryStoreBuilder<K, V>) -> Self {
        let mut moka_builder = Cache::builder();

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(name) = builder.name.as_deref() {
            moka_builder = moka_builder.name(name);
        }

        Self {
            inner: moka_builder.build(),
        }
    }

    /// Returns the name given to the store through its builder.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    /// Returns the number of stored entries.
    ///
    /// Pending internal bookkeeping is applied first, so the count reflects
    /// every write that completed before the call.
    pub async fn len(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    /// Returns `true` if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns `true` if the store holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }
}

impl<K, V> ObjectStore<K, V> for MemoryStore<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn set_multi(&self, entries: &HashMap<K, V>) -> Result<(), Error> {
        for (key, value) in entries {
            self.inner.insert(key.clone(), value.clone()).await;
        }
        Ok(())
    }

    fn get_multi(&self, keys: &[K]) -> Deferred<'_, Fetched<K, V>> {
        let keys = keys.to_vec();
        Deferred::lazy(async move {
            let mut fetched = HashMap::with_capacity(keys.len());
            for key in keys {
                let lookup = Lookup::from(self.inner.get(&key).await);
                fetched.insert(key, lookup);
            }
            Ok(fetched)
        })
    }

    async fn del_multi(&self, keys: &[K]) -> Result<(), Error> {
        for key in keys {
            self.inner.invalidate(key).await;
        }
        Ok(())
    }
}
