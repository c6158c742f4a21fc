// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(any(feature = "metrics", test))]
pub(crate) const CHAIN_NAME: &str = "chain.name";

#[cfg(test)]
pub(crate) const CHAIN_EVENT_NAME: &str = "chain.event";

#[cfg(any(feature = "metrics", test))]
pub(crate) const CHAIN_OPERATION_NAME: &str = "chain.operation";

#[cfg(any(feature = "metrics", test))]
pub(crate) const CHAIN_ACTIVITY_NAME: &str = "chain.activity";

#[cfg(any(feature = "metrics", test))]
pub(crate) const CHAIN_TIER_NAME: &str = "chain.tier";

#[cfg(test)]
pub(crate) const CHAIN_KEYS_NAME: &str = "chain.keys";

#[cfg(test)]
pub(crate) const CHAIN_DURATION_NAME: &str = "chain.duration_ns";
