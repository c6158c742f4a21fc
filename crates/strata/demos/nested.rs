// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! A chain used as a tier of another chain, observed through mock stores.
//!
//! Run with `cargo run --example nested --features test-util`.

use std::collections::HashMap;

use strata::{CacheChain, MockStore};

fn main() -> Result<(), strata::Error> {
    futures::executor::block_on(async {
        let edge = MockStore::<&'static str, u32>::new();
        let regional = MockStore::new();
        let origin = MockStore::with_data(HashMap::from([("page", 404), ("home", 200)]));

        let inner = CacheChain::builder()
            .name("regional")
            .tier(regional.clone())
            .tier(origin.clone())
            .build();
        let outer = CacheChain::builder().name("edge").tier(edge.clone()).tier(inner).build();

        let found = outer.get_multi(&["home", "missing"]).await?;
        println!("found: {found:?}");

        println!("edge ops:     {:?}", edge.operations());
        println!("regional ops: {:?}", regional.operations());
        println!("origin ops:   {:?}", origin.operations());
        Ok(())
    })
}
