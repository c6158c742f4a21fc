// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "memory")]

//! Integration tests for chains used as tiers and for shared tiers.

use std::collections::HashMap;

use strata::{CacheChain, DynamicStoreExt, Error, MemoryStore, ObjectStoreExt};
use strata_store::testing::{MockStore, StoreOp};

type TestResult = Result<(), Error>;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

#[test]
fn nested_chain_resolves_and_promotes_through_inner_chain() -> TestResult {
    block_on(async {
        let inner_fast = MockStore::<&'static str, i32>::new();
        let inner_slow = MockStore::with_data(HashMap::from([("a", 1)]));
        let inner = CacheChain::builder()
            .name("inner")
            .tier(inner_fast.clone())
            .tier(inner_slow.clone())
            .build();

        let outer_fast = MockStore::new();
        let outer = CacheChain::builder().name("outer").tier(outer_fast.clone()).tier(inner).build();

        let found = outer.get_multi(&["a", "b"]).await?;

        assert_eq!(found, HashMap::from([("a", 1)]));
        assert_eq!(outer_fast.snapshot(), HashMap::from([("a", 1)]));
        assert_eq!(inner_fast.snapshot(), HashMap::from([("a", 1)]));
        assert_eq!(inner_slow.set_count(), 0);
        Ok(())
    })
}

#[test]
fn nested_chain_receives_writes_and_deletes() -> TestResult {
    block_on(async {
        let leaf = MockStore::<&'static str, i32>::new();
        let inner = CacheChain::builder().tier(leaf.clone()).build();
        let outer = CacheChain::builder().tier(inner).build();

        outer.set_multi(&HashMap::from([("a", 1)])).await?;
        assert_eq!(leaf.snapshot(), HashMap::from([("a", 1)]));

        outer.del_multi(&["a"]).await?;
        assert!(leaf.snapshot().is_empty());
        assert!(outer.get_multi(&["a"]).await?.is_empty());
        Ok(())
    })
}

#[test]
fn inner_chain_is_not_realized_when_outer_tier_answers() -> TestResult {
    block_on(async {
        let outer_fast = MockStore::<&'static str, i32>::with_data(HashMap::from([("a", 1)]));
        let leaf = MockStore::with_data(HashMap::from([("a", 99)]));
        let inner = CacheChain::builder().tier(leaf.clone()).build();
        let outer = CacheChain::builder().tier(outer_fast).tier(inner).build();

        assert_eq!(outer.get_multi(&["a"]).await?, HashMap::from([("a", 1)]));
        // The inner chain dispatched its own tier but never realized it.
        assert_eq!(leaf.operations(), vec![StoreOp::GetMulti(vec!["a"])]);
        Ok(())
    })
}

#[test]
fn shared_tier_is_visible_to_every_chain() -> TestResult {
    block_on(async {
        let shared = MemoryStore::<String, String>::new().into_dynamic();
        let writer = CacheChain::builder().shared_tier(shared.clone()).build();
        let reader = CacheChain::builder().shared_tier(shared.clone()).build();

        writer.set("greeting".to_string(), "hello".to_string()).await?;

        assert_eq!(reader.get(&"greeting".to_string()).await?, Some("hello".to_string()));
        assert_eq!(shared.get(&"greeting".to_string()).await?, Some("hello".to_string()));
        Ok(())
    })
}

#[test]
fn memory_tiers_hold_promoted_values() -> TestResult {
    block_on(async {
        let local = MemoryStore::<u32, String>::builder().name("local").build();
        let remote = MemoryStore::<u32, String>::builder().name("remote").build();
        remote.set(1, String::new()).await?;

        let chain = CacheChain::builder().tier(local.clone()).tier(remote).build();

        assert_eq!(chain.get_multi(&[1, 2]).await?, HashMap::from([(1, String::new())]));
        assert!(local.contains_key(&1));
        assert!(!local.contains_key(&2));
        Ok(())
    })
}
