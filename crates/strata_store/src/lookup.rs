// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashMap;
use std::hash::Hash;

/// The answer of a tier for a single requested key.
///
/// Tiers never signal absence through a special value: a stored `0`, `""` or
/// `false` is just as much `Found` as any other value.
///
/// # Examples
///
/// ```
/// use strata_store::Lookup;
///
/// let hit = Lookup::Found(0);
/// assert!(hit.is_found());
/// assert_eq!(hit.found(), Some(0));
///
/// let miss: Lookup<i32> = Lookup::NotFound;
/// assert!(!miss.is_found());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lookup<V> {
    /// The tier holds a value for the key.
    Found(V),
    /// The tier holds nothing for the key.
    NotFound,
}

impl<V> Lookup<V> {
    /// Returns `true` if the tier holds a value for the key.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Consumes the lookup and returns the value, if any.
    #[must_use]
    pub fn found(self) -> Option<V> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// Returns a reference to the value, if any.
    #[must_use]
    pub fn as_found(&self) -> Option<&V> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}

impl<V> From<Option<V>> for Lookup<V> {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

/// The answer of a tier to a `get_multi` request.
///
/// Holds an entry for every requested key.
pub type Fetched<K, V> = HashMap<K, Lookup<V>>;

/// Builds a [`Fetched`] answer for `keys` out of the values that were found.
///
/// Every requested key gets an entry; keys missing from `found` are recorded
/// as [`Lookup::NotFound`].
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use strata_store::{Lookup, fetched_from};
///
/// let found = HashMap::from([("a", 1)]);
/// let fetched = fetched_from(["a", "b"], found);
/// assert_eq!(fetched["a"], Lookup::Found(1));
/// assert_eq!(fetched["b"], Lookup::NotFound);
/// ```
pub fn fetched_from<K, V>(keys: impl IntoIterator<Item = K>, mut found: HashMap<K, V>) -> Fetched<K, V>
where
    K: Eq + Hash,
{
    let mut fetched: Fetched<K, V> = HashMap::new();
    for key in keys {
        if fetched.contains_key(&key) {
            continue;
        }
        let lookup = Lookup::from(found.remove(&key));
        fetched.insert(key, lookup);
    }
    fetched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values_are_found() {
        assert!(Lookup::Found(0).is_found());
        assert!(Lookup::Found(String::new()).is_found());
        assert!(Lookup::Found(false).is_found());
    }

    #[test]
    fn from_option() {
        assert_eq!(Lookup::from(Some(3)), Lookup::Found(3));
        assert_eq!(Lookup::<i32>::from(None), Lookup::NotFound);
    }

    #[test]
    fn as_found_borrows() {
        let lookup = Lookup::Found("value".to_string());
        assert_eq!(lookup.as_found().map(String::as_str), Some("value"));
        assert_eq!(Lookup::<String>::NotFound.as_found(), None);
    }

    #[test]
    fn fetched_from_duplicated_keys_keeps_found_value() {
        let fetched = fetched_from(["a", "a"], HashMap::from([("a", 1)]));
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched["a"], Lookup::Found(1));
    }
}
