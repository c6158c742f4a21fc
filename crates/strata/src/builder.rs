// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for cache chains.

use std::fmt::Debug;

#[cfg(feature = "memory")]
use std::hash::Hash;

use strata_store::{DynamicStore, DynamicStoreExt, ObjectStore};
#[cfg(feature = "memory")]
use strata_memory::MemoryStore;

use crate::chain::{CacheChain, ChainName};
use crate::telemetry::ChainTelemetry;

const DEFAULT_NAME: ChainName = "strata";

/// Builder for constructing a [`CacheChain`].
///
/// Created by calling [`CacheChain::builder`]. Tiers are consulted in the
/// order they are added, so add the fastest tier first.
///
/// # Examples
///
/// ```
/// use strata::CacheChain;
/// use strata_memory::MemoryStore;
///
/// let chain = CacheChain::builder()
///     .name("catalog")
///     .tier(MemoryStore::<u64, String>::new())
///     .tier(MemoryStore::<u64, String>::new())
///     .start_empty(false)
///     .build();
///
/// assert_eq!(chain.name(), "catalog");
/// assert_eq!(chain.tier_count(), 2);
/// ```
pub struct CacheChainBuilder<K, V> {
    name: ChainName,
    tiers: Vec<DynamicStore<K, V>>,
    start_empty: bool,
    telemetry: Option<ChainTelemetry>,
}

impl<K, V> Debug for CacheChainBuilder<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheChainBuilder")
            .field("name", &self.name)
            .field("tiers", &self.tiers.len())
            .field("start_empty", &self.start_empty)
            .field("telemetry", &self.telemetry)
            .finish()
    }
}

impl<K, V> CacheChainBuilder<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            name: DEFAULT_NAME,
            tiers: Vec::new(),
            start_empty: false,
            telemetry: None,
        }
    }

    /// Sets the chain name reported in logs and metrics.
    ///
    /// Defaults to `"strata"`.
    #[must_use]
    pub fn name(mut self, name: ChainName) -> Self {
        self.name = name;
        self
    }

    /// Appends a tier to the chain.
    ///
    /// The store is wrapped in a [`DynamicStore`], so tiers of different
    /// types can be mixed in one chain.
    #[must_use]
    pub fn tier<S>(mut self, store: S) -> Self
    where
        S: ObjectStore<K, V> + 'static,
    {
        self.tiers.push(store.into_dynamic());
        self
    }

    /// Appends a tier that is already type-erased.
    ///
    /// Use this to share one tier between several chains: every clone of a
    /// [`DynamicStore`] refers to the same store.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::CacheChain;
    /// use strata_memory::MemoryStore;
    /// use strata_store::DynamicStoreExt;
    ///
    /// let shared = MemoryStore::<String, i32>::new().into_dynamic();
    ///
    /// let reader = CacheChain::builder().shared_tier(shared.clone()).build();
    /// let writer = CacheChain::builder().shared_tier(shared).build();
    /// # let _ = (reader, writer);
    /// ```
    #[must_use]
    pub fn shared_tier(mut self, store: DynamicStore<K, V>) -> Self {
        self.tiers.push(store);
        self
    }

    /// Appends several tiers, in iteration order.
    #[must_use]
    pub fn tiers<I, S>(mut self, stores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ObjectStore<K, V> + 'static,
    {
        self.tiers.extend(stores.into_iter().map(|store| store.into_dynamic()));
        self
    }

    /// Makes reads consult only the in-memory cache.
    ///
    /// A chain built this way never asks its tiers for anything; writes
    /// and deletes still reach every tier.
    #[must_use]
    pub fn start_empty(mut self, start_empty: bool) -> Self {
        self.start_empty = start_empty;
        self
    }

    /// Attaches telemetry to the chain.
    #[must_use]
    pub fn telemetry(mut self, telemetry: ChainTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Builds the chain with an empty in-memory cache.
    #[must_use]
    pub fn build(self) -> CacheChain<K, V> {
        CacheChain::new(self.name, self.tiers, self.start_empty, self.telemetry)
    }
}

#[cfg(feature = "memory")]
impl<K, V> CacheChainBuilder<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Appends a new, empty [`MemoryStore`] tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::CacheChain;
    ///
    /// let chain = CacheChain::<String, i32>::builder().memory_tier().build();
    /// assert_eq!(chain.tier_count(), 1);
    /// ```
    #[must_use]
    pub fn memory_tier(self) -> Self {
        self.tier(MemoryStore::new())
    }
}
