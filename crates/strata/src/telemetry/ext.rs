// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Extension traits for telemetry recording.

use std::time::Duration;

use tick::Clock;

use crate::chain::ChainName;
use crate::telemetry::{ChainEvent, ChainTelemetry};

/// Result of a timed async operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimedResult<R> {
    pub result: R,
    pub duration: Duration,
}

pub(crate) trait ClockExt {
    /// Times an async operation and returns both the result and elapsed duration.
    fn timed_async<F>(&self, f: F) -> impl Future<Output = TimedResult<F::Output>> + Send
    where
        F: Future + Send,
        F::Output: Send;
}

impl ClockExt for Clock {
    async fn timed_async<F>(&self, f: F) -> TimedResult<F::Output>
    where
        F: Future + Send,
        F::Output: Send,
    {
        let start = self.instant();
        let result = f.await;
        TimedResult {
            result,
            duration: self.instant().saturating_duration_since(start),
        }
    }
}

pub(crate) trait ChainTelemetryExt {
    /// Records a chain event if telemetry is configured.
    fn record(&self, chain: ChainName, event: ChainEvent);

    /// Awaits `f`, timing it with the telemetry clock if telemetry is configured.
    fn timed<F>(&self, f: F) -> impl Future<Output = TimedResult<F::Output>> + Send
    where
        F: Future + Send,
        F::Output: Send;
}

impl ChainTelemetryExt for Option<ChainTelemetry> {
    fn record(&self, chain: ChainName, event: ChainEvent) {
        if let Some(t) = self {
            t.record(chain, event);
        }
    }

    async fn timed<F>(&self, f: F) -> TimedResult<F::Output>
    where
        F: Future + Send,
        F::Output: Send,
    {
        match self {
            Some(t) => t.clock().timed_async(f).await,
            None => TimedResult {
                result: f.await,
                duration: Duration::ZERO,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{ChainActivity, ChainOperation};

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        futures::executor::block_on(f)
    }

    #[test]
    fn clock_ext_timed_async_measures_duration() {
        block_on(async {
            let control = tick::ClockControl::new();
            let clock = control.to_clock();

            let timed = clock
                .timed_async(async {
                    control.advance(Duration::from_millis(100));
                    42
                })
                .await;

            assert_eq!(timed.result, 42);
            assert_eq!(timed.duration, Duration::from_millis(100));
        });
    }

    #[test]
    fn telemetry_ext_times_with_configured_clock() {
        block_on(async {
            let control = tick::ClockControl::new();
            let telemetry = Some(ChainTelemetry::new(control.to_clock()));

            let timed = telemetry
                .timed(async {
                    control.advance(Duration::from_millis(7));
                    "done"
                })
                .await;

            assert_eq!(timed.result, "done");
            assert_eq!(timed.duration, Duration::from_millis(7));
        });
    }

    #[test]
    fn telemetry_ext_none_reports_zero_duration() {
        block_on(async {
            let telemetry: Option<ChainTelemetry> = None;
            let timed = telemetry.timed(async { 1 }).await;
            assert_eq!(timed.result, 1);
            assert_eq!(timed.duration, Duration::ZERO);
        });
    }

    #[test]
    fn telemetry_ext_none_emits_no_logs() {
        use crate::telemetry::testing::LogCapture;

        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let telemetry: Option<ChainTelemetry> = None;
        telemetry.record("chain", ChainEvent::new(ChainOperation::GetMulti, ChainActivity::Miss, 1));

        assert!(capture.output().is_empty());
    }
}
