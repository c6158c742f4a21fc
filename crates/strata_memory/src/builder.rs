// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring in-memory stores.
//!
//! The builder keeps moka's configuration types out of the public API.

use std::hash::Hash;
use std::marker::PhantomData;

use crate::store::MemoryStore;

/// Builder for configuring a [`MemoryStore`].
///
/// Memory stores never evict, so the only knobs are an allocation hint and a
/// diagnostic name.
///
/// # Examples
///
/// ```
/// use strata_memory::MemoryStore;
///
/// let store = MemoryStore::<String, i32>::builder()
///     .initial_capacity(128)
///     .name("sessions")
///     .build();
/// assert_eq!(store.name(), Some("sessions"));
/// ```
#[derive(Debug)]
pub struct MemoryStoreBuilder<K, V> {
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) name: Option<String>,
    _phantom: PhantomData<(K, V)>,
}

impl<K, V> Default for MemoryStoreBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoryStoreBuilder<K, V> {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_capacity: None,
            name: None,
            _phantom: PhantomData,
        }
    }

    /// Sets the initial capacity (pre-allocation hint) for the store.
    ///
    /// The store still grows beyond this size.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets a name for the store, used in debugging output.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the configured [`MemoryStore`].
    #[must_use]
    pub fn build(self) -> MemoryStore<K, V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        MemoryStore::from_builder(&self)
    }
}
