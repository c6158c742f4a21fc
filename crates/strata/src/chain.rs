// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The cache chain: an in-memory cache in front of an ordered list of tiers.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use parking_lot::RwLock;
use strata_store::{Deferred, DynamicStore, Error, Fetched, Lookup, ObjectStore, fetched_from};

use crate::builder::CacheChainBuilder;
use crate::telemetry::ext::ChainTelemetryExt;
use crate::telemetry::{ChainActivity, ChainEvent, ChainOperation, ChainTelemetry};

/// Type alias for chain names used in telemetry.
pub type ChainName = &'static str;

/// A multi-tier cache that populates itself lazily.
///
/// A chain owns an in-memory cache and an ordered list of tiers, fastest
/// first. Reads are served from memory when possible; otherwise every tier
/// is asked for the missing keys and the answers are consumed in tier order.
/// A value found at tier `i` is written back to memory and to every tier
/// before `i`, so later reads find it sooner. Writes and deletes go to
/// memory and then to every tier in order.
///
/// `get_multi` returns a [`Deferred`]: nothing beyond the in-memory lookup
/// happens until the answer is realized, and tiers after the one that
/// resolved the last missing key are never realized at all.
///
/// The chain is itself an [`ObjectStore`], so a chain can serve as a tier
/// of another chain.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use strata::CacheChain;
/// use strata_memory::MemoryStore;
/// use strata_store::ObjectStoreExt;
/// # futures::executor::block_on(async {
///
/// let remote = MemoryStore::<String, String>::new();
/// remote.set("x".to_string(), "10".to_string()).await?;
///
/// let local = MemoryStore::<String, String>::new();
/// let chain = CacheChain::builder()
///     .tier(local.clone())
///     .tier(remote)
///     .build();
///
/// let found = chain.get_multi(&["x".to_string(), "y".to_string()]).await?;
/// assert_eq!(found, HashMap::from([("x".to_string(), "10".to_string())]));
///
/// // The value was promoted into the faster tier.
/// assert_eq!(local.get(&"x".to_string()).await?, Some("10".to_string()));
/// # Ok::<(), strata_store::Error>(())
/// # }).unwrap();
/// ```
pub struct CacheChain<K, V> {
    name: ChainName,
    memory: RwLock<HashMap<K, V>>,
    tiers: Vec<DynamicStore<K, V>>,
    start_empty: bool,
    telemetry: Option<ChainTelemetry>,
}

impl<K, V> Debug for CacheChain<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheChain")
            .field("name", &self.name)
            .field("tiers", &self.tiers.len())
            .field("start_empty", &self.start_empty)
            .finish_non_exhaustive()
    }
}

impl<K, V> CacheChain<K, V> {
    /// Creates a new chain builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::CacheChain;
    /// use strata_memory::MemoryStore;
    ///
    /// let chain = CacheChain::builder()
    ///     .name("sessions")
    ///     .tier(MemoryStore::<String, i32>::new())
    ///     .build();
    /// assert_eq!(chain.tier_count(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> CacheChainBuilder<K, V> {
        CacheChainBuilder::new()
    }

    pub(crate) fn new(name: ChainName, tiers: Vec<DynamicStore<K, V>>, start_empty: bool, telemetry: Option<ChainTelemetry>) -> Self {
        Self {
            name,
            memory: RwLock::new(HashMap::new()),
            tiers,
            start_empty,
            telemetry,
        }
    }

    /// Returns the name of this chain for telemetry identification.
    #[must_use]
    pub fn name(&self) -> ChainName {
        self.name
    }

    /// Returns the number of tiers behind the in-memory cache.
    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Returns `true` if reads never consult the tiers.
    #[must_use]
    pub fn is_start_empty(&self) -> bool {
        self.start_empty
    }

    /// Returns the number of entries in the in-memory cache.
    #[must_use]
    pub fn memory_len(&self) -> usize {
        self.memory.read().len()
    }
}

impl<K, V> CacheChain<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Returns a copy of the in-memory cache.
    #[must_use]
    pub fn memory_snapshot(&self) -> HashMap<K, V> {
        self.memory.read().clone()
    }
}

impl<K, V> CacheChain<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Writes every entry to memory, then to each tier in order.
    ///
    /// # Errors
    ///
    /// Returns the first tier error. Memory and the tiers before the failing
    /// one keep the new values; later tiers are not written.
    pub async fn set_multi(&self, entries: &HashMap<K, V>) -> Result<(), Error> {
        {
            let mut memory = self.memory.write();
            memory.extend(entries.iter().map(|(key, value)| (key.clone(), value.clone())));
        }

        for (index, tier) in self.tiers.iter().enumerate() {
            if let Err(e) = tier.set_multi(entries).await {
                self.record(ChainEvent::new(ChainOperation::SetMulti, ChainActivity::Error, entries.len()).at_tier(index));
                return Err(e);
            }
        }

        self.record(ChainEvent::new(ChainOperation::SetMulti, ChainActivity::Written, entries.len()));
        Ok(())
    }

    /// Looks up `keys`, returning a deferred map of every key the chain
    /// could resolve. Keys no tier holds are absent from the map.
    ///
    /// Keys already in memory are collected immediately. If any are missing
    /// (and the chain was not built with `start_empty`), every tier's
    /// `get_multi` is dispatched for the missing keys before this returns,
    /// but no tier answer is realized until the returned value is.
    ///
    /// Realization fails with the first tier error encountered.
    pub fn get_multi(&self, keys: &[K]) -> Deferred<'_, HashMap<K, V>> {
        let mut cached = HashMap::new();
        let mut missing = Vec::new();
        {
            let memory = self.memory.read();
            let mut seen = HashSet::with_capacity(keys.len());
            for key in keys {
                if !seen.insert(key) {
                    continue;
                }
                match memory.get(key) {
                    Some(value) => {
                        cached.insert(key.clone(), value.clone());
                    }
                    None => missing.push(key.clone()),
                }
            }
        }

        if !cached.is_empty() {
            self.record(ChainEvent::new(ChainOperation::GetMulti, ChainActivity::MemoryHit, cached.len()));
        }

        if missing.is_empty() {
            return Deferred::ready(cached);
        }

        if self.start_empty {
            self.record(ChainEvent::new(ChainOperation::GetMulti, ChainActivity::ColdStart, missing.len()));
            return Deferred::ready(cached);
        }

        let pending: Vec<_> = self.tiers.iter().map(|tier| tier.get_multi(&missing)).collect();
        Deferred::lazy(self.resolve(cached, missing, pending))
    }

    /// Consumes tier answers in order until every missing key is resolved.
    async fn resolve(
        &self,
        mut result: HashMap<K, V>,
        missing: Vec<K>,
        pending: Vec<Deferred<'_, Fetched<K, V>>>,
    ) -> Result<HashMap<K, V>, Error> {
        let mut remaining: HashSet<K> = missing.into_iter().collect();

        // Answers from tiers after the last useful one are dropped unrealized.
        for (index, answer) in pending.into_iter().enumerate() {
            if remaining.is_empty() {
                break;
            }

            let timed = self.telemetry.timed(answer.into_value()).await;
            let fetched = match timed.result {
                Ok(fetched) => fetched,
                Err(e) => {
                    self.record(
                        ChainEvent::new(ChainOperation::GetMulti, ChainActivity::Error, remaining.len())
                            .at_tier(index)
                            .took(timed.duration),
                    );
                    return Err(e);
                }
            };

            let mut found = HashMap::new();
            for (key, lookup) in fetched {
                let Lookup::Found(value) = lookup else {
                    continue;
                };
                if remaining.remove(&key) {
                    found.insert(key, value);
                }
            }

            self.record(
                ChainEvent::new(ChainOperation::GetMulti, ChainActivity::TierHit, found.len())
                    .at_tier(index)
                    .took(timed.duration),
            );

            if found.is_empty() {
                continue;
            }

            {
                let mut memory = self.memory.write();
                memory.extend(found.iter().map(|(key, value)| (key.clone(), value.clone())));
            }

            for (earlier, tier) in self.tiers[..index].iter().enumerate() {
                if let Err(e) = tier.set_multi(&found).await {
                    self.record(ChainEvent::new(ChainOperation::GetMulti, ChainActivity::Error, found.len()).at_tier(earlier));
                    return Err(e);
                }
            }

            if index > 0 {
                self.record(ChainEvent::new(ChainOperation::GetMulti, ChainActivity::Promotion, found.len()).at_tier(index));
            }

            result.extend(found);
        }

        if !remaining.is_empty() {
            self.record(ChainEvent::new(ChainOperation::GetMulti, ChainActivity::Miss, remaining.len()));
        }

        Ok(result)
    }

    /// Removes `keys` from memory, then from each tier in order.
    ///
    /// Keys that are not present anywhere are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first tier error. Memory and the tiers before the failing
    /// one have already dropped the keys.
    pub async fn del_multi(&self, keys: &[K]) -> Result<(), Error> {
        {
            let mut memory = self.memory.write();
            for key in keys {
                memory.remove(key);
            }
        }

        for (index, tier) in self.tiers.iter().enumerate() {
            if let Err(e) = tier.del_multi(keys).await {
                self.record(ChainEvent::new(ChainOperation::DelMulti, ChainActivity::Error, keys.len()).at_tier(index));
                return Err(e);
            }
        }

        self.record(ChainEvent::new(ChainOperation::DelMulti, ChainActivity::Deleted, keys.len()));
        Ok(())
    }

    fn record(&self, event: ChainEvent) {
        self.telemetry.record(self.name, event);
    }
}

/// A chain is an object store, so chains nest.
///
/// Through this impl, `get_multi` answers every requested key, reporting
/// [`Lookup::NotFound`] for the ones the chain could not resolve.
impl<K, V> ObjectStore<K, V> for CacheChain<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn set_multi(&self, entries: &HashMap<K, V>) -> Result<(), Error> {
        Self::set_multi(self, entries).await
    }

    fn get_multi(&self, keys: &[K]) -> Deferred<'_, Fetched<K, V>> {
        let requested = keys.to_vec();
        Self::get_multi(self, keys).map(move |found| fetched_from(requested, found))
    }

    async fn del_multi(&self, keys: &[K]) -> Result<(), Error> {
        Self::del_multi(self, keys).await
    }
}
