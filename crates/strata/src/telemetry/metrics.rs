// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use opentelemetry::{
    InstrumentationScope,
    metrics::{Counter, Histogram, Meter, MeterProvider},
};

const METER_NAME: &str = "strata";
const VERSION: &str = "v0.1.0";
const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.47.0";
pub(crate) const CHAIN_EVENT_COUNT_NAME: &str = "chain.event.count";
pub(crate) const CHAIN_TIER_READ_DURATION_NAME: &str = "chain.tier.read.duration";

pub(crate) fn create_meter(meter_provider: &dyn MeterProvider) -> Meter {
    meter_provider.meter_with_scope(
        InstrumentationScope::builder(METER_NAME)
            .with_version(VERSION)
            .with_schema_url(SCHEMA_URL)
            .build(),
    )
}

pub(crate) fn create_event_counter(meter: &Meter) -> Counter<u64> {
    meter
        .u64_counter(CHAIN_EVENT_COUNT_NAME)
        .with_description("Cache chain events")
        .with_unit("{event}")
        .build()
}

pub(crate) fn create_tier_read_duration_histogram(meter: &Meter) -> Histogram<f64> {
    meter
        .f64_histogram(CHAIN_TIER_READ_DURATION_NAME)
        .with_description("Time spent realizing a tier lookup")
        .with_unit("s")
        .build()
}
