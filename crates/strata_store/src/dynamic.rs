// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Dynamic object store wrapper for type erasure.

use std::{collections::HashMap, fmt::Debug, sync::Arc};

use crate::{Deferred, Error, Fetched, ObjectStore, store::DynObjectStore};

/// Extension trait for converting any `ObjectStore` into a `DynamicStore`.
///
/// This trait is automatically implemented for all types that implement `ObjectStore`.
///
/// # Examples
///
/// ```
/// use strata_store::{DynamicStore, DynamicStoreExt, ObjectStore};
///
/// fn erase<T>(store: T) -> DynamicStore<String, i32>
/// where
///     T: ObjectStore<String, i32> + 'static,
/// {
///     store.into_dynamic()
/// }
/// ```
pub trait DynamicStoreExt<K, V>: Sized {
    /// Converts this store into a `DynamicStore`.
    fn into_dynamic(self) -> DynamicStore<K, V>;
}

impl<K, V, T> DynamicStoreExt<K, V> for T
where
    T: ObjectStore<K, V> + 'static,
{
    fn into_dynamic(self) -> DynamicStore<K, V> {
        DynamicStore::new(self)
    }
}

/// A clonable object store with type erasure.
///
/// `DynamicStore` wraps a trait object in an `Arc`, so tiers of different
/// concrete types can live in one ordered tier list, and one tier can be
/// shared by several chains. Clones share the same underlying store.
///
/// # Examples
///
/// ```ignore
/// let remote: DynamicStore<String, i32> = remote_tier.into_dynamic();
///
/// // Both chains consult the same remote tier.
/// let a = CacheChain::builder().tier(remote.clone()).build();
/// let b = CacheChain::builder().tier(remote).build();
/// ```
pub struct DynamicStore<K, V>(Arc<DynObjectStore<'static, K, V>>);

impl<K, V> DynamicStore<K, V> {
    /// Creates a new dynamic store from any `ObjectStore` implementation.
    pub(crate) fn new<T>(store: T) -> Self
    where
        T: ObjectStore<K, V> + Send + Sync + 'static,
    {
        Self(DynObjectStore::new_arc(store))
    }
}

impl<K, V> Debug for DynamicStore<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicStore").finish_non_exhaustive()
    }
}

impl<K, V> Clone for DynamicStore<K, V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<K, V> ObjectStore<K, V> for DynamicStore<K, V>
where
    K: Sync,
    V: Sync,
{
    async fn set_multi(&self, entries: &HashMap<K, V>) -> Result<(), Error> {
        self.0.set_multi(entries).await
    }

    fn get_multi(&self, keys: &[K]) -> Deferred<'_, Fetched<K, V>> {
        self.0.get_multi(keys)
    }

    async fn del_multi(&self, keys: &[K]) -> Result<(), Error> {
        self.0.del_multi(keys).await
    }
}
