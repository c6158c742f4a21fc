// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `Deferred`.

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::channel::oneshot;
use strata_store::{Deferred, Error};

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

#[test]
fn ready_is_realized_from_the_start() {
    block_on(async {
        let mut deferred = Deferred::ready("value");
        assert!(deferred.is_realized());
        assert_eq!(*deferred.get().await.expect("ready value"), "value");
    });
}

#[test]
fn lazy_runs_exactly_once() {
    block_on(async {
        let runs = AtomicUsize::new(0);
        let mut deferred = Deferred::lazy(async {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1, 2, 3])
        });

        for _ in 0..3 {
            assert_eq!(deferred.get().await.expect("lazy value"), &vec![1, 2, 3]);
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    });
}

#[test]
fn dropped_realization_resumes_instead_of_restarting() {
    let starts = AtomicUsize::new(0);
    let (sender, receiver) = oneshot::channel::<i32>();

    let mut deferred = Deferred::lazy(async {
        starts.fetch_add(1, Ordering::SeqCst);
        receiver.await.map_err(Error::from_message)
    });

    // The value is not available yet, so the first attempt stays pending and is dropped.
    assert!(deferred.get().now_or_never().is_none());
    assert!(!deferred.is_realized());

    sender.send(5).expect("receiver is alive");

    let value = block_on(deferred.get()).expect("value arrives");
    assert_eq!(*value, 5);
    assert_eq!(starts.load(Ordering::SeqCst), 1);
}

#[test]
fn into_future_consumes_pending_value() {
    block_on(async {
        let deferred = Deferred::from_fn(|| Ok(String::from("consumed")));
        let value = deferred.await.expect("value");
        assert_eq!(value, "consumed");
    });
}

#[test]
fn into_value_after_get_returns_memoized_value() {
    block_on(async {
        let runs = AtomicUsize::new(0);
        let mut deferred = Deferred::from_fn(|| {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok(11)
        });

        let _ = deferred.get().await.expect("value");
        assert_eq!(deferred.into_value().await.expect("value"), 11);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    });
}

#[tokio::test]
async fn error_surfaces_only_on_realization() {
    let deferred: Deferred<'_, u8> = Deferred::from_fn(|| Err(Error::from_message("tier timed out")));

    // Creating the deferred value did not fail anything.
    assert!(!deferred.is_realized());

    let error = deferred.await.expect_err("realization fails");
    assert!(error.to_string().contains("tier timed out"));
}
