// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Turns chain events into logs and metrics.

#[cfg(any(feature = "logs", test))]
use opentelemetry::logs::Severity;
#[cfg(any(feature = "metrics", test))]
use opentelemetry::KeyValue;

use crate::chain::ChainName;
use crate::telemetry::{ChainEvent, ChainTelemetry};
#[cfg(any(feature = "metrics", test))]
use crate::telemetry::attributes;

impl ChainTelemetry {
    /// Records a chain event to every enabled output.
    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(unused_variables, reason = "no-op when logs and metrics are disabled")
    )]
    #[inline]
    pub(crate) fn record(&self, chain: ChainName, event: ChainEvent) {
        #[cfg(any(feature = "metrics", test))]
        self.record_metrics(chain, event);

        #[cfg(any(feature = "logs", test))]
        if self.logging_enabled {
            Self::emit(chain, event);
        }
    }

    #[cfg(any(feature = "metrics", test))]
    fn record_metrics(&self, chain: ChainName, event: ChainEvent) {
        if self.event_counter.is_none() && self.tier_read_duration.is_none() {
            return;
        }

        let mut attrs = vec![
            KeyValue::new(attributes::CHAIN_NAME, chain),
            KeyValue::new(attributes::CHAIN_OPERATION_NAME, event.operation.as_str()),
            KeyValue::new(attributes::CHAIN_ACTIVITY_NAME, event.activity.as_str()),
        ];
        if let Some(tier) = event.tier {
            attrs.push(KeyValue::new(attributes::CHAIN_TIER_NAME, i64::try_from(tier).unwrap_or(i64::MAX)));
        }

        if let Some(c) = &self.event_counter {
            c.add(1, &attrs);
        }

        if let (Some(d), Some(h)) = (event.duration, &self.tier_read_duration) {
            h.record(d.as_secs_f64(), &attrs);
        }
    }

    #[cfg(any(feature = "logs", test))]
    fn emit(chain: ChainName, event: ChainEvent) {
        let op = event.operation.as_str();
        let activity = event.activity.as_str();
        let tier = event.tier;
        let keys = event.keys;
        let duration_ns = event.duration.map(|d| d.as_nanos());

        // Tracing level must be constant, so the macro expands once per level.
        // Field names must match constants in attributes.rs.
        macro_rules! emit_event {
            ($level:ident) => {
                tracing::$level!(
                    chain.name = chain,
                    chain.operation = op,
                    chain.activity = activity,
                    chain.tier = ?tier,
                    chain.keys = keys,
                    chain.duration_ns = ?duration_ns,
                    "chain.event"
                )
            };
        }

        match event.activity.severity() {
            Severity::Error => emit_event!(error),
            Severity::Info => emit_event!(info),
            Severity::Debug => emit_event!(debug),
            _ => {}
        }
    }
}
