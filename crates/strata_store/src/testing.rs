// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock object store for testing.
//!
//! This module provides `MockStore`, a configurable in-memory store that
//! records all operations and supports failure injection for testing error paths.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use parking_lot::Mutex;

use crate::{Deferred, Error, Fetched, Lookup, ObjectStore};

/// Recorded store operation with full context.
#[derive(Debug, Clone)]
pub enum StoreOp<K, V> {
    /// A `get_multi` call was dispatched for the given keys.
    GetMulti(Vec<K>),
    /// The deferred answer of a `get_multi` call was realized for the given keys.
    Realize(Vec<K>),
    /// A `set_multi` call was performed with the given entries.
    SetMulti(HashMap<K, V>),
    /// A `del_multi` call was performed with the given keys.
    DelMulti(Vec<K>),
}

impl<K, V> PartialEq for StoreOp<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::GetMulti(a), Self::GetMulti(b)) | (Self::Realize(a), Self::Realize(b)) | (Self::DelMulti(a), Self::DelMulti(b)) => a == b,
            (Self::SetMulti(a), Self::SetMulti(b)) => a == b,
            _ => false,
        }
    }
}

impl<K, V> Eq for StoreOp<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

type FailPredicate<K, V> = Box<dyn Fn(&StoreOp<K, V>) -> bool + Send + Sync>;

/// A configurable mock object store for testing.
///
/// The store keeps its data in memory and can be told to fail operations on
/// demand. Every operation is recorded for later verification, and the two
/// phases of a lookup are recorded separately: [`StoreOp::GetMulti`] when the
/// lookup is dispatched and [`StoreOp::Realize`] when its answer is realized.
/// This makes it possible to assert that a lookup was never realized.
///
/// Clones share data, recorded operations and failure configuration, so a
/// clone kept by a test observes everything done through the chain.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # futures::executor::block_on(async {
/// use std::collections::HashMap;
/// use strata_store::{Lookup, ObjectStore, testing::{MockStore, StoreOp}};
///
/// let store = MockStore::with_data(HashMap::from([("key".to_string(), 42)]));
///
/// let answer = store.get_multi(&["key".to_string()]);
/// assert_eq!(store.realize_count(), 0);
///
/// let fetched = answer.await.unwrap();
/// assert_eq!(fetched["key"], Lookup::Found(42));
///
/// assert_eq!(store.operations(), vec![
///     StoreOp::GetMulti(vec!["key".to_string()]),
///     StoreOp::Realize(vec!["key".to_string()]),
/// ]);
/// # });
/// ```
///
/// # Failure Injection
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # futures::executor::block_on(async {
/// use std::collections::HashMap;
/// use strata_store::{ObjectStore, testing::{MockStore, StoreOp}};
///
/// let store: MockStore<String, i32> = MockStore::new();
///
/// // Fail every lookup once it is realized.
/// store.fail_when(|op| matches!(op, StoreOp::Realize(_)));
/// assert!(store.get_multi(&["key".to_string()]).await.is_err());
///
/// // Writes are unaffected.
/// assert!(store.set_multi(&HashMap::from([("key".to_string(), 1)])).await.is_ok());
/// # });
/// ```
pub struct MockStore<K, V> {
    data: Arc<Mutex<HashMap<K, V>>>,
    operations: Arc<Mutex<Vec<StoreOp<K, V>>>>,
    fail_when: Arc<Mutex<Option<FailPredicate<K, V>>>>,
}

impl<K, V> std::fmt::Debug for MockStore<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStore")
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl<K, V> Clone for MockStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl<K, V> Default for MockStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MockStore<K, V> {
    /// Creates a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a mock store with pre-populated data.
    #[must_use]
    pub fn with_data(data: HashMap<K, V>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the number of entries in the store.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Sets a predicate that determines when operations should fail.
    ///
    /// The predicate receives the operation and returns `true` if it should fail.
    /// A failing operation is still recorded but leaves the data untouched.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&StoreOp<K, V>) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    /// Returns how many `get_multi` calls were dispatched.
    #[must_use]
    pub fn get_count(&self) -> usize {
        self.count(|op| matches!(op, StoreOp::GetMulti(_)))
    }

    /// Returns how many `get_multi` answers were realized.
    #[must_use]
    pub fn realize_count(&self) -> usize {
        self.count(|op| matches!(op, StoreOp::Realize(_)))
    }

    /// Returns how many `set_multi` calls were performed.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.count(|op| matches!(op, StoreOp::SetMulti(_)))
    }

    /// Returns how many `del_multi` calls were performed.
    #[must_use]
    pub fn del_count(&self) -> usize {
        self.count(|op| matches!(op, StoreOp::DelMulti(_)))
    }

    fn count(&self, filter: impl Fn(&StoreOp<K, V>) -> bool) -> usize {
        self.operations.lock().iter().filter(|op| filter(op)).count()
    }

    fn should_fail(&self, op: &StoreOp<K, V>) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }

    /// Records `op` and reports whether it must fail.
    fn admit(&self, op: StoreOp<K, V>) -> bool {
        let fail = self.should_fail(&op);
        self.operations.lock().push(op);
        fail
    }
}

impl<K, V> MockStore<K, V>
where
    K: Eq + Hash,
{
    /// Returns true if the store contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.lock().contains_key(key)
    }
}

impl<K, V> MockStore<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<StoreOp<K, V>> {
        self.operations.lock().clone()
    }

    /// Returns a copy of the stored data.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<K, V> {
        self.data.lock().clone()
    }
}

impl<K, V> ObjectStore<K, V> for MockStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn set_multi(&self, entries: &HashMap<K, V>) -> Result<(), Error> {
        if self.admit(StoreOp::SetMulti(entries.clone())) {
            return Err(Error::from_message("mock: set_multi failed"));
        }
        self.data
            .lock()
            .extend(entries.iter().map(|(key, value)| (key.clone(), value.clone())));
        Ok(())
    }

    fn get_multi(&self, keys: &[K]) -> Deferred<'_, Fetched<K, V>> {
        let keys = keys.to_vec();
        if self.admit(StoreOp::GetMulti(keys.clone())) {
            return Deferred::failed(Error::from_message("mock: get_multi failed"));
        }

        Deferred::from_fn(move || {
            if self.admit(StoreOp::Realize(keys.clone())) {
                return Err(Error::from_message("mock: realize failed"));
            }
            let data = self.data.lock();
            Ok(keys
                .into_iter()
                .map(|key| {
                    let lookup = Lookup::from(data.get(&key).cloned());
                    (key, lookup)
                })
                .collect())
        })
    }

    async fn del_multi(&self, keys: &[K]) -> Result<(), Error> {
        if self.admit(StoreOp::DelMulti(keys.to_vec())) {
            return Err(Error::from_message("mock: del_multi failed"));
        }
        let mut data = self.data.lock();
        for key in keys {
            data.remove(key);
        }
        Ok(())
    }
}
