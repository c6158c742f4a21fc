// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Deferred, memoized values.
//!
//! [`Deferred`] is how a tier hands back the answer of a `get_multi` call: the
//! call itself returns immediately, and the work behind it only runs when a
//! consumer realizes the deferred value.

use std::fmt::{self, Debug};

use futures::future::{BoxFuture, FutureExt};

use crate::{Error, Result};

/// A single-assignment, memoized deferred value.
///
/// A `Deferred` is either already settled ([`ready`](Self::ready),
/// [`failed`](Self::failed)) or wraps a computation that has not started yet
/// ([`lazy`](Self::lazy), [`from_fn`](Self::from_fn)). The computation runs at
/// most once, on the first call to [`get`](Self::get) or when the deferred is
/// consumed, and its outcome (value or error) is kept for every later call.
///
/// Dropping an unrealized `Deferred` drops its computation without running it.
///
/// # Examples
///
/// ```
/// use strata_store::Deferred;
/// # futures::executor::block_on(async {
///
/// let mut deferred = Deferred::from_fn(|| Ok(6 * 7));
/// assert!(!deferred.is_realized());
///
/// assert_eq!(*deferred.get().await?, 42);
/// assert!(deferred.is_realized());
///
/// // Consuming the deferred returns the memoized value.
/// assert_eq!(deferred.await?, 42);
/// # Ok::<(), strata_store::Error>(())
/// # });
/// ```
pub struct Deferred<'a, T> {
    state: State<'a, T>,
}

enum State<'a, T> {
    Pending(BoxFuture<'a, Result<T>>),
    Done(Result<T>),
}

impl<'a, T: 'a> Deferred<'a, T> {
    /// Creates a deferred value that is already known.
    #[must_use]
    pub fn ready(value: T) -> Self {
        Self {
            state: State::Done(Ok(value)),
        }
    }

    /// Creates a deferred value that has already failed.
    ///
    /// The error surfaces when the value is realized, not before.
    #[must_use]
    pub fn failed(error: Error) -> Self {
        Self {
            state: State::Done(Err(error)),
        }
    }

    /// Creates a deferred value from a future that has not been polled yet.
    ///
    /// Rust futures do nothing until polled, so the work behind `future` starts
    /// only when the deferred value is realized. A tier that wants its backing
    /// call in flight before realization should start it before calling this
    /// and pass a future that merely waits for the outcome.
    pub fn lazy<F>(future: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'a,
    {
        Self {
            state: State::Pending(Box::pin(future)),
        }
    }

    /// Creates a deferred value from a synchronous computation.
    ///
    /// The closure is called on first realization.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use strata_store::Deferred;
    /// # futures::executor::block_on(async {
    ///
    /// let calls = AtomicUsize::new(0);
    /// let mut deferred = Deferred::from_fn(|| {
    ///     calls.fetch_add(1, Ordering::SeqCst);
    ///     Ok("computed")
    /// });
    ///
    /// assert_eq!(calls.load(Ordering::SeqCst), 0);
    /// deferred.get().await?;
    /// deferred.get().await?;
    /// assert_eq!(calls.load(Ordering::SeqCst), 1);
    /// # Ok::<(), strata_store::Error>(())
    /// # });
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'a,
    {
        Self::lazy(async move { f() })
    }

    /// Returns `true` once the value (or its failure) is known.
    #[must_use]
    pub fn is_realized(&self) -> bool {
        matches!(self.state, State::Done(_))
    }

    /// Realizes the value and returns a reference to it.
    ///
    /// The first call runs the wrapped computation; later calls return the
    /// memoized outcome. If the future returned by this method is dropped
    /// before completion, the next call resumes the same computation.
    ///
    /// # Errors
    ///
    /// Returns the error the computation failed with. A failed deferred keeps
    /// failing with a clone of the same error.
    pub async fn get(&mut self) -> Result<&T> {
        if let State::Pending(pending) = &mut self.state {
            let outcome = pending.await;
            self.state = State::Done(outcome);
        }

        match &self.state {
            State::Done(Ok(value)) => Ok(value),
            State::Done(Err(error)) => Err(error.clone()),
            State::Pending(_) => unreachable!("a pending deferred is realized above"),
        }
    }

    /// Consumes the deferred value, realizing it if needed.
    ///
    /// `Deferred` also implements [`IntoFuture`], so `deferred.await` does the same.
    ///
    /// # Errors
    ///
    /// Returns the error the computation failed with.
    pub async fn into_value(self) -> Result<T> {
        match self.state {
            State::Pending(pending) => pending.await,
            State::Done(outcome) => outcome,
        }
    }

    /// Transforms the eventual value without realizing it.
    ///
    /// A settled value is mapped immediately; a pending one is mapped when it
    /// is realized. Failures pass through untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_store::Deferred;
    /// # futures::executor::block_on(async {
    ///
    /// let deferred = Deferred::lazy(async { Ok(20) }).map(|n| n + 1);
    /// assert_eq!(deferred.await?, 21);
    /// # Ok::<(), strata_store::Error>(())
    /// # });
    /// ```
    pub fn map<U, F>(self, f: F) -> Deferred<'a, U>
    where
        F: FnOnce(T) -> U + Send + 'a,
        U: 'a,
    {
        match self.state {
            State::Done(outcome) => Deferred {
                state: State::Done(outcome.map(f)),
            },
            State::Pending(pending) => Deferred::lazy(async move { pending.await.map(f) }),
        }
    }
}

impl<'a, T: Send + 'a> IntoFuture for Deferred<'a, T> {
    type Output = Result<T>;
    type IntoFuture = BoxFuture<'a, Result<T>>;

    fn into_future(self) -> Self::IntoFuture {
        self.into_value().boxed()
    }
}

impl<T: Debug> Debug for Deferred<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Pending(_) => f.debug_tuple("Deferred").field(&format_args!("<pending>")).finish(),
            State::Done(outcome) => f.debug_tuple("Deferred").field(outcome).finish(),
        }
    }
}
