// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for object store backends.
//!
//! [`ObjectStore`] is the capability every tier of a cache chain implements:
//! an in-process map, a remote cache service, a durable store, or another
//! chain.

use std::collections::HashMap;

use crate::{Deferred, Error, Fetched};

/// Trait for object store implementations.
///
/// All three operations work on batches of keys. Only `get_multi` is split in
/// two phases: the call dispatches the lookup and returns a [`Deferred`]
/// answer, which the caller realizes when (and if) it needs it. Callers are
/// free to drop the answer unrealized.
///
/// Implementations must not leave requested keys out of a `get_multi`
/// answer: a key the store does not hold is reported as
/// [`Lookup::NotFound`](crate::Lookup::NotFound).
#[cfg_attr(
    any(test, feature = "dynamic-store"),
    dynosaur::dynosaur(pub(crate) DynObjectStore = dyn(box) ObjectStore, bridge(none))
)]
pub trait ObjectStore<K, V>: Send + Sync {
    /// Writes every entry of `entries`, overwriting existing values.
    fn set_multi(&self, entries: &HashMap<K, V>) -> impl Future<Output = Result<(), Error>> + Send;

    /// Dispatches a lookup of `keys` and returns its deferred answer.
    ///
    /// The answer holds an entry for every requested key.
    fn get_multi(&self, keys: &[K]) -> Deferred<'_, Fetched<K, V>>;

    /// Removes `keys`. Keys that are not present are ignored.
    fn del_multi(&self, keys: &[K]) -> impl Future<Output = Result<(), Error>> + Send;
}
