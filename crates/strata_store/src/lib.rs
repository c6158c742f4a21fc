// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The object store capability shared by every tier of a cache chain.
//!
//! This crate defines the [`ObjectStore`] trait that every backing tier must
//! satisfy, together with [`Lookup`] for per-key answers, [`Deferred`] for
//! lazily realized lookups, and the [`Error`] type for fallible operations.
//!
//! # Overview
//!
//! A tier only has to implement three batch operations. `set_multi` and
//! `del_multi` are plain async operations. `get_multi` dispatches a lookup
//! and hands back a [`Deferred`] answer; the caller decides whether the
//! answer is ever realized. Implement [`ObjectStore`] for your backend, then
//! hand it to a `strata` cache chain.
//!
//! # Implementing an Object Store
//!
//! ```
//! use std::collections::HashMap;
//! use std::hash::Hash;
//! use std::sync::RwLock;
//!
//! use strata_store::{Deferred, Error, Fetched, Lookup, ObjectStore};
//!
//! struct SimpleStore<K, V>(RwLock<HashMap<K, V>>);
//!
//! impl<K, V> ObjectStore<K, V> for SimpleStore<K, V>
//! where
//!     K: Clone + Eq + Hash + Send + Sync,
//!     V: Clone + Send + Sync,
//! {
//!     async fn set_multi(&self, entries: &HashMap<K, V>) -> Result<(), Error> {
//!         let mut data = self.0.write().unwrap();
//!         data.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
//!         Ok(())
//!     }
//!
//!     fn get_multi(&self, keys: &[K]) -> Deferred<'_, Fetched<K, V>> {
//!         let keys = keys.to_vec();
//!         Deferred::from_fn(move || {
//!             let data = self.0.read().unwrap();
//!             Ok(keys
//!                 .into_iter()
//!                 .map(|k| {
//!                     let lookup = Lookup::from(data.get(&k).cloned());
//!                     (k, lookup)
//!                 })
//!                 .collect())
//!         })
//!     }
//!
//!     async fn del_multi(&self, keys: &[K]) -> Result<(), Error> {
//!         let mut data = self.0.write().unwrap();
//!         for key in keys {
//!             data.remove(key);
//!         }
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! Enable the `dynamic-store` feature (on by default) for [`DynamicStore`],
//! which wraps any `ObjectStore` in a clonable, type-erased container. Cache
//! chains keep their tiers as `DynamicStore`s, which is what lets one chain
//! hold heterogeneous tiers and lets several chains share a tier.

mod deferred;
pub mod error;
mod ext;
mod lookup;
pub(crate) mod store;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[cfg(any(test, feature = "dynamic-store"))]
mod dynamic;

#[doc(inline)]
pub use deferred::Deferred;
#[cfg(any(test, feature = "dynamic-store"))]
#[doc(inline)]
pub use dynamic::{DynamicStore, DynamicStoreExt};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use ext::ObjectStoreExt;
#[doc(inline)]
pub use lookup::{Fetched, Lookup, fetched_from};
#[doc(inline)]
pub use store::ObjectStore;
