// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Single-key conveniences on top of the batch operations.

use std::collections::HashMap;
use std::hash::Hash;

use crate::{Error, ObjectStore};

/// Single-key helpers for every [`ObjectStore`].
///
/// Each helper issues the matching batch operation with one key, so a store
/// only ever has to implement the batch forms.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # futures::executor::block_on(async {
/// use strata_store::ObjectStoreExt;
/// use strata_store::testing::MockStore;
///
/// let store = MockStore::<String, i32>::new();
/// store.set("answer".to_string(), 42).await?;
/// assert_eq!(store.get(&"answer".to_string()).await?, Some(42));
///
/// store.del(&"answer".to_string()).await?;
/// assert_eq!(store.get(&"answer".to_string()).await?, None);
/// # Ok::<(), strata_store::Error>(())
/// # }).unwrap();
/// ```
pub trait ObjectStoreExt<K, V>: ObjectStore<K, V> {
    /// Looks up a single key, realizing the answer immediately.
    fn get(&self, key: &K) -> impl Future<Output = Result<Option<V>, Error>> + Send;

    /// Writes a single entry.
    fn set(&self, key: K, value: V) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes a single key.
    fn del(&self, key: &K) -> impl Future<Output = Result<(), Error>> + Send;
}

impl<K, V, S> ObjectStoreExt<K, V> for S
where
    S: ObjectStore<K, V> + ?Sized,
    K: Clone + Eq + Hash + Send + Sync,
    V: Send + Sync,
{
    async fn get(&self, key: &K) -> Result<Option<V>, Error> {
        let mut fetched = self.get_multi(std::slice::from_ref(key)).await?;
        Ok(fetched.remove(key).and_then(crate::Lookup::found))
    }

    async fn set(&self, key: K, value: V) -> Result<(), Error> {
        self.set_multi(&HashMap::from([(key, value)])).await
    }

    async fn del(&self, key: &K) -> Result<(), Error> {
        self.del_multi(std::slice::from_ref(key)).await
    }
}
