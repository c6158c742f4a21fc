// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for object store operations.

/// An error from an object store operation.
///
/// This is an opaque error type that wraps whatever a tier failed with: a
/// refused connection, a timed out request, a rejected write. Use
/// [`std::error::Error::source()`] to reach the underlying cause.
///
/// The type is cheap to clone so that a [`Deferred`](crate::Deferred) that
/// failed can hand the same failure to every caller that realizes it.
///
/// # Example
///
/// ```
/// use strata_store::Error;
///
/// let error = Error::from_message("remote tier unreachable");
/// let copy = error.clone();
/// assert_eq!(error.to_string(), copy.to_string());
/// ```
#[ohno::error]
#[derive(Clone)]
pub struct Error {}

impl Error {
    /// Creates a new error from any type that can be converted to an error.
    ///
    /// This is the entry point for tier implementations living in other crates.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_store::Error;
    ///
    /// let io = std::io::Error::other("connection reset");
    /// let error = Error::from_message(io);
    /// assert!(error.to_string().contains("connection reset"));
    /// ```
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for object store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_debug_contains_cause_message() {
        let error = Error::caused_by("tier exploded");
        let debug_str = format!("{error:?}");
        assert!(
            debug_str.contains("tier exploded"),
            "debug output should contain the cause message, got: {debug_str}"
        );
    }

    #[test]
    fn error_display_contains_cause_message() {
        let error = Error::from_message("display test");
        let display_str = format!("{error}");
        assert!(
            display_str.contains("display test"),
            "display output should contain the cause message, got: {display_str}"
        );
    }

    #[test]
    fn cloned_error_keeps_cause() {
        let error = Error::from_message("shared failure");
        let cloned = error.clone();
        assert!(format!("{cloned}").contains("shared failure"));
    }

    #[test]
    fn result_type_alias_propagates_errors() {
        fn returns_err() -> Result<i32> {
            Err(Error::caused_by("expected failure"))
        }

        let err = returns_err().expect_err("should return an error");
        assert!(format!("{err}").contains("expected failure"));
    }
}
