//! Latency percentiles over duration samples.

use std::time::Duration;

use serde::Serialize;

/// Summary of a set of latency samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LatencyStats {
    /// Fastest sample.
    pub min: Duration,
    /// Slowest sample.
    pub max: Duration,
    /// Arithmetic mean.
    pub mean: Duration,
    /// Median.
    pub p50: Duration,
    /// 95th percentile.
    pub p95: Duration,
    /// 99th percentile.
    pub p99: Duration,
}

/// Computes min, max, mean and nearest-rank percentiles.
///
/// ```rust
/// use std::time::Duration;
/// use reelmatch_core::metrics::compute_latency_percentiles;
///
/// let samples: Vec<Duration> = (1..=4).map(Duration::from_millis).collect();
/// let stats = compute_latency_percentiles(&samples);
/// assert_eq!(stats.min, Duration::from_millis(1));
/// assert_eq!(stats.max, Duration::from_millis(4));
/// ```
#[must_use]
pub fn compute_latency_percentiles(samples: &[Duration]) -> LatencyStats {
    if samples.is_empty() {
        return LatencyStats::default();
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();

    LatencyStats {
        min: sorted[0],
        max: sorted[n - 1],
        mean: mean(&sorted),
        p50: percentile(&sorted, 50),
        p95: percentile(&sorted, 95),
        p99: percentile(&sorted, 99),
    }
}

/// Arithmetic mean, truncated to whole nanoseconds.
pub(crate) fn mean(samples: &[Duration]) -> Duration {
    if samples.is_empty() {
        return Duration::ZERO;
    }
    let sum: Duration = samples.iter().sum();
    // SAFETY: the mean cannot exceed the largest sample, which fits in u64 nanoseconds.
    #[allow(clippy::cast_possible_truncation)]
    Duration::from_nanos((sum.as_nanos() / samples.len() as u128) as u64)
}

fn percentile(sorted: &[Duration], p: usize) -> Duration {
    let n = sorted.len();
    // SAFETY: p <= 100 so the rounded index lies in [0, n - 1].
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let idx = ((p as f64 / 100.0) * (n - 1) as f64).round() as usize;
    sorted[idx.min(n - 1)]
}
