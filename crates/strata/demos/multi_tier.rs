// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Two-tier chain with promotion and structured logs.
//!
//! Run with `cargo run --example multi_tier`.

use std::collections::HashMap;

use strata::{CacheChain, ChainTelemetry, MemoryStore, ObjectStoreExt};
use tick::Clock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), strata::Error> {
    tracing_subscriber::registry().with(tracing_subscriber::fmt::layer()).init();

    let local = MemoryStore::<String, String>::builder().name("local").build();
    let remote = MemoryStore::<String, String>::builder().name("remote").build();
    remote.set("x".to_string(), "10".to_string()).await?;

    let chain = CacheChain::builder()
        .name("demo")
        .tier(local.clone())
        .tier(remote)
        .telemetry(ChainTelemetry::new(Clock::new_tokio()).with_logs())
        .build();

    // Dispatches both tiers; nothing is read until the answer is awaited.
    let answer = chain.get_multi(&["x".to_string(), "y".to_string()]);
    println!("realized before await: {}", answer.is_realized());

    let found = answer.await?;
    println!("found: {found:?}");
    println!("promoted into local tier: {:?}", local.get(&"x".to_string()).await?);

    // Served from memory this time.
    let again = chain.get_multi(&["x".to_string()]).await?;
    println!("second read: {again:?}");

    chain.set_multi(&HashMap::from([("y".to_string(), "20".to_string())])).await?;
    chain.del_multi(&["x".to_string()]).await?;
    println!("memory after writes: {:?}", chain.memory_snapshot());

    Ok(())
}
