//! Wall-clock timing of arbitrary operations.
//!
//! An operation is run, its duration measured, and the measurement handed
//! to a [`TimingSink`]. The operation's return value passes through
//! untouched, including `Err` values. If the operation panics nothing is
//! recorded.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Receiver of timing measurements.
pub trait TimingSink: Send + Sync {
    /// Records that `label` took `elapsed`.
    fn record(&self, label: &str, elapsed: Duration);
}

impl<T: TimingSink + ?Sized> TimingSink for &T {
    fn record(&self, label: &str, elapsed: Duration) {
        (**self).record(label, elapsed)
    }
}

/// Emits one `info` event per measurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TimingSink for LogSink {
    fn record(&self, label: &str, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        info!(
            operation = label,
            elapsed_secs = secs,
            "{} completed in {:.2} seconds",
            label,
            secs
        );
    }
}

/// Summary of all measurements sharing a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingStats {
    /// Number of measurements
    pub count: usize,
    /// Sum of durations
    pub total: Duration,
    /// Shortest duration
    pub min: Duration,
    /// Longest duration
    pub max: Duration,
}

impl TimingStats {
    /// Average duration, or `None` when nothing was recorded.
    pub fn mean(&self) -> Option<Duration> {
        if self.count == 0 {
            return None;
        }
        Some(self.total.div_f64(self.count as f64))
    }
}

/// Keeps every measurement in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    measurements: Mutex<Vec<(String, Duration)>>,
}

impl InMemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All measurements in recording order.
    pub fn measurements(&self) -> Vec<(String, Duration)> {
        self.measurements.lock().clone()
    }

    /// Per-label statistics.
    pub fn summary(&self) -> BTreeMap<String, TimingStats> {
        let measurements = self.measurements.lock();
        let mut stats: BTreeMap<String, TimingStats> = BTreeMap::new();
        for (label, elapsed) in measurements.iter() {
            stats
                .entry(label.clone())
                .and_modify(|s| {
                    s.count += 1;
                    s.total += *elapsed;
                    s.min = s.min.min(*elapsed);
                    s.max = s.max.max(*elapsed);
                })
                .or_insert(TimingStats {
                    count: 1,
                    total: *elapsed,
                    min: *elapsed,
                    max: *elapsed,
                });
        }
        stats
    }

    /// Discards all measurements.
    pub fn clear(&self) {
        self.measurements.lock().clear();
    }
}

impl TimingSink for InMemorySink {
    fn record(&self, label: &str, elapsed: Duration) {
        self.measurements.lock().push((label.to_string(), elapsed));
    }
}

/// Runs `op`, logs `"<label> completed in <secs> seconds"`, returns its value.
///
/// # Example
/// ```
/// use dmri_core::profiling::time_operation;
///
/// let sum: u64 = time_operation("sum", || (1..=10).sum());
/// assert_eq!(sum, 55);
/// ```
pub fn time_operation<R, F>(label: &str, op: F) -> R
where
    F: FnOnce() -> R,
{
    time_operation_with(&LogSink, label, op)
}

/// Runs `op` and reports its duration to `sink`.
pub fn time_operation_with<R, F>(sink: &dyn TimingSink, label: &str, op: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = op();
    sink.record(label, start.elapsed());
    result
}

/// Wraps a one-argument operation so every call is timed and logged.
///
/// Use a tuple argument for operations with several inputs.
pub fn timed<A, R, F>(label: impl Into<String>, op: F) -> impl FnMut(A) -> R
where
    F: FnMut(A) -> R,
{
    timed_with(LogSink, label, op)
}

/// Like [`timed`], reporting to `sink`.
pub fn timed_with<A, R, F, S>(sink: S, label: impl Into<String>, mut op: F) -> impl FnMut(A) -> R
where
    F: FnMut(A) -> R,
    S: TimingSink,
{
    let label = label.into();
    move |arg: A| time_operation_with(&sink, &label, || op(arg))
}
