// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cache chain telemetry.
//!
//! Chain operations report what they did as [`ChainEvent`]s. With the `logs`
//! feature enabled the events become structured `tracing` events; with the
//! `metrics` feature they feed OpenTelemetry instruments. Without either
//! feature, recording is a no-op.

use std::time::Duration;

#[cfg(any(feature = "logs", test))]
use opentelemetry::logs::Severity;
#[cfg(any(feature = "metrics", test))]
use opentelemetry::metrics::{Counter, Histogram, MeterProvider};
use tick::Clock;

pub(crate) mod attributes;
pub(crate) mod ext;
#[cfg(any(feature = "metrics", test))]
pub(crate) mod metrics;
mod recorder;
#[cfg(test)]
pub(crate) mod testing;

/// Telemetry configuration for a cache chain.
///
/// Create one with a clock, enable the outputs you want, then pass it to
/// [`CacheChainBuilder::telemetry`](crate::CacheChainBuilder::telemetry).
/// The clock times every tier realization.
///
/// # Examples
///
/// ```
/// use strata::{CacheChain, ChainTelemetry};
/// use strata_memory::MemoryStore;
/// use tick::Clock;
///
/// # fn build(clock: Clock) {
/// let telemetry = ChainTelemetry::new(clock).with_logs();
///
/// let chain = CacheChain::builder()
///     .name("profiles")
///     .tier(MemoryStore::<String, String>::new())
///     .telemetry(telemetry)
///     .build();
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ChainTelemetry {
    clock: Clock,
    #[cfg(any(feature = "logs", test))]
    logging_enabled: bool,
    #[cfg(any(feature = "metrics", test))]
    event_counter: Option<Counter<u64>>,
    #[cfg(any(feature = "metrics", test))]
    tier_read_duration: Option<Histogram<f64>>,
}

impl ChainTelemetry {
    /// Creates telemetry with every output disabled.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            #[cfg(any(feature = "logs", test))]
            logging_enabled: false,
            #[cfg(any(feature = "metrics", test))]
            event_counter: None,
            #[cfg(any(feature = "metrics", test))]
            tier_read_duration: None,
        }
    }

    /// Enables structured logging of chain events via `tracing`.
    #[cfg(any(feature = "logs", test))]
    #[must_use]
    pub fn with_logs(self) -> Self {
        Self {
            logging_enabled: true,
            ..self
        }
    }

    /// Enables OpenTelemetry metrics using the provided meter provider.
    #[cfg(any(feature = "metrics", test))]
    #[must_use]
    pub fn with_metrics(self, provider: &dyn MeterProvider) -> Self {
        let meter = metrics::create_meter(provider);
        Self {
            event_counter: Some(metrics::create_event_counter(&meter)),
            tier_read_duration: Some(metrics::create_tier_read_duration_histogram(&meter)),
            ..self
        }
    }

    /// Returns the clock used to time tier realizations.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainOperation {
    GetMulti,
    SetMulti,
    DelMulti,
}

impl ChainOperation {
    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(dead_code, reason = "read only by logs and metrics")
    )]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetMulti => "chain.get_multi",
            Self::SetMulti => "chain.set_multi",
            Self::DelMulti => "chain.del_multi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainActivity {
    MemoryHit,
    ColdStart,
    TierHit,
    Promotion,
    Miss,
    Written,
    Deleted,
    Error,
}

impl ChainActivity {
    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(dead_code, reason = "read only by logs and metrics")
    )]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MemoryHit => "memory_hit",
            Self::ColdStart => "cold_start",
            Self::TierHit => "tier_hit",
            Self::Promotion => "promotion",
            Self::Miss => "miss",
            Self::Written => "written",
            Self::Deleted => "deleted",
            Self::Error => "error",
        }
    }

    #[cfg(any(feature = "logs", test))]
    pub fn severity(self) -> Severity {
        match self {
            Self::MemoryHit | Self::TierHit | Self::Miss => Severity::Debug,
            Self::ColdStart | Self::Promotion | Self::Written | Self::Deleted => Severity::Info,
            Self::Error => Severity::Error,
        }
    }
}

/// One thing a chain operation did, as reported to telemetry.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(
    not(any(feature = "logs", feature = "metrics", test)),
    expect(dead_code, reason = "read only by logs and metrics")
)]
pub(crate) struct ChainEvent {
    pub operation: ChainOperation,
    pub activity: ChainActivity,
    /// Index of the tier involved, if any.
    pub tier: Option<usize>,
    /// Number of keys the event covers.
    #[cfg_attr(not(any(feature = "logs", test)), expect(dead_code, reason = "read only by logs"))]
    pub keys: usize,
    pub duration: Option<Duration>,
}

impl ChainEvent {
    pub fn new(operation: ChainOperation, activity: ChainActivity, keys: usize) -> Self {
        Self {
            operation,
            activity,
            tier: None,
            keys,
            duration: None,
        }
    }

    #[must_use]
    pub fn at_tier(self, tier: usize) -> Self {
        Self { tier: Some(tier), ..self }
    }

    #[must_use]
    pub fn took(self, duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_operation_as_str() {
        assert_eq!(ChainOperation::GetMulti.as_str(), "chain.get_multi");
        assert_eq!(ChainOperation::SetMulti.as_str(), "chain.set_multi");
        assert_eq!(ChainOperation::DelMulti.as_str(), "chain.del_multi");
    }

    #[test]
    fn chain_activity_as_str() {
        assert_eq!(ChainActivity::MemoryHit.as_str(), "memory_hit");
        assert_eq!(ChainActivity::ColdStart.as_str(), "cold_start");
        assert_eq!(ChainActivity::TierHit.as_str(), "tier_hit");
        assert_eq!(ChainActivity::Promotion.as_str(), "promotion");
        assert_eq!(ChainActivity::Miss.as_str(), "miss");
        assert_eq!(ChainActivity::Written.as_str(), "written");
        assert_eq!(ChainActivity::Deleted.as_str(), "deleted");
        assert_eq!(ChainActivity::Error.as_str(), "error");
    }

    #[test]
    fn chain_activity_severity() {
        assert_eq!(ChainActivity::MemoryHit.severity(), Severity::Debug);
        assert_eq!(ChainActivity::TierHit.severity(), Severity::Debug);
        assert_eq!(ChainActivity::Miss.severity(), Severity::Debug);
        assert_eq!(ChainActivity::ColdStart.severity(), Severity::Info);
        assert_eq!(ChainActivity::Promotion.severity(), Severity::Info);
        assert_eq!(ChainActivity::Written.severity(), Severity::Info);
        assert_eq!(ChainActivity::Deleted.severity(), Severity::Info);
        assert_eq!(ChainActivity::Error.severity(), Severity::Error);
    }

    #[test]
    fn chain_event_builders() {
        let event = ChainEvent::new(ChainOperation::GetMulti, ChainActivity::TierHit, 3)
            .at_tier(2)
            .took(Duration::from_millis(4));

        assert_eq!(event.tier, Some(2));
        assert_eq!(event.keys, 3);
        assert_eq!(event.duration, Some(Duration::from_millis(4)));
    }

    #[test]
    fn new_telemetry_has_everything_disabled() {
        let telemetry = ChainTelemetry::new(Clock::new_frozen());
        assert!(!telemetry.logging_enabled);
        assert!(telemetry.event_counter.is_none());
        assert!(telemetry.tier_read_duration.is_none());
    }
}
