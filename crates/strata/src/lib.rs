// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Multi-tier, lazily populating cache chains.
//!
//! A [`CacheChain`] puts an in-memory cache in front of an ordered list of
//! [`ObjectStore`] tiers, fastest first:
//! - Reads are answered from memory when possible. Missing keys are looked
//!   up in every tier at once, and the answers are consumed in tier order.
//! - A value found in a slower tier is promoted into memory and every faster
//!   tier.
//! - Reads are deferred. `get_multi` returns a [`Deferred`] that does no tier
//!   work until it is realized, and tiers after the one that resolved the
//!   last missing key are never realized.
//! - Writes and deletes go to memory and then to every tier, in order.
//! - Chains are object stores themselves, so they nest.
//!
//! # Examples
//!
//! ## Two Tiers
//!
//! ```
//! use std::collections::HashMap;
//! use strata::{CacheChain, MemoryStore, ObjectStoreExt};
//! # futures::executor::block_on(async {
//!
//! let local = MemoryStore::<String, String>::new();
//! let remote = MemoryStore::<String, String>::new();
//! remote.set("x".to_string(), "10".to_string()).await?;
//!
//! let chain = CacheChain::builder()
//!     .name("users")
//!     .tier(local.clone())
//!     .tier(remote)
//!     .build();
//!
//! let found = chain.get_multi(&["x".to_string(), "y".to_string()]).await?;
//! assert_eq!(found, HashMap::from([("x".to_string(), "10".to_string())]));
//! assert_eq!(local.get(&"x".to_string()).await?, Some("10".to_string()));
//! # Ok::<(), strata::Error>(())
//! # }).unwrap();
//! ```
//!
//! ## Deferred Reads
//!
//! ```
//! use strata::{CacheChain, MemoryStore};
//! # futures::executor::block_on(async {
//!
//! let chain = CacheChain::builder()
//!     .tier(MemoryStore::<String, i32>::new())
//!     .build();
//!
//! // Nothing is read from the tier yet.
//! let mut answer = chain.get_multi(&["key".to_string()]);
//! assert!(!answer.is_realized());
//!
//! // Realizing twice does the work once.
//! assert!(answer.get().await?.is_empty());
//! assert!(answer.get().await?.is_empty());
//! # Ok::<(), strata::Error>(())
//! # }).unwrap();
//! ```

mod builder;
mod chain;
mod telemetry;

#[doc(inline)]
pub use builder::CacheChainBuilder;
#[doc(inline)]
pub use chain::{CacheChain, ChainName};
#[cfg(feature = "memory")]
#[doc(inline)]
pub use strata_memory::{MemoryStore, MemoryStoreBuilder};
#[doc(inline)]
pub use strata_store::{Deferred, DynamicStore, DynamicStoreExt, Error, Fetched, Lookup, ObjectStore, ObjectStoreExt, Result};
#[doc(inline)]
pub use telemetry::ChainTelemetry;

#[cfg(any(feature = "test-util", test))]
#[doc(inline)]
pub use strata_store::testing::{MockStore, StoreOp};
