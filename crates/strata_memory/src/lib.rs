// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-memory object store backed by moka.
//!
//! This crate provides [`MemoryStore`], a concurrent in-memory
//! [`ObjectStore`](strata_store::ObjectStore) suitable as the fastest tier of
//! a cache chain, or as a stand-in for a remote tier in tests. Use
//! [`MemoryStoreBuilder`] to configure it without exposing moka types.
//!
//! # Quick Start
//!
//! ```
//! use strata_memory::MemoryStore;
//! use strata_store::ObjectStoreExt;
//!
//! # futures::executor::block_on(async {
//! let store = MemoryStore::<String, i32>::builder().name("local").build();
//!
//! store.set("key".to_string(), 42).await?;
//! assert_eq!(store.get(&"key".to_string()).await?, Some(42));
//! # Ok::<(), strata_store::Error>(())
//! # }).unwrap();
//! ```

pub mod builder;
pub mod store;

#[doc(inline)]
pub use builder::MemoryStoreBuilder;
#[doc(inline)]
pub use store::MemoryStore;
