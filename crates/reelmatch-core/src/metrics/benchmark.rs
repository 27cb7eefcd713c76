//! Repeated-invocation timing of recommendation calls.

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::latency::{compute_latency_percentiles, mean, LatencyStats};
use crate::error::{Error, Result};
use crate::index::BackendKind;
use crate::recommender::Recommender;

/// Timings of `runs` sequential calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    /// Number of calls measured.
    pub runs: usize,
    /// Wall-clock time of each call, in call order.
    pub samples: Vec<Duration>,
    /// Arithmetic mean of `samples`.
    pub mean: Duration,
    /// Percentile summary of `samples`.
    pub stats: LatencyStats,
}

impl BenchmarkReport {
    fn from_samples(samples: Vec<Duration>) -> Self {
        Self {
            runs: samples.len(),
            mean: mean(&samples),
            stats: compute_latency_percentiles(&samples),
            samples,
        }
    }

    /// Mean latency in seconds.
    #[must_use]
    pub fn mean_secs(&self) -> f64 {
        self.mean.as_secs_f64()
    }
}

/// Both backends timed on the same title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendComparison {
    /// Query title.
    pub title: String,
    /// Results requested per call.
    pub k: usize,
    /// Exhaustive cosine backend.
    pub cosine: BenchmarkReport,
    /// Nearest-neighbor backend.
    pub nearest_neighbor: BenchmarkReport,
}

impl BackendComparison {
    /// Report for `kind`.
    #[must_use]
    pub fn report(&self, kind: BackendKind) -> &BenchmarkReport {
        match kind {
            BackendKind::Cosine => &self.cosine,
            BackendKind::NearestNeighbor => &self.nearest_neighbor,
        }
    }

    /// Nearest-neighbor mean divided by cosine mean; above 1 means the
    /// precomputed matrix answers faster. `None` if the cosine mean is zero.
    #[must_use]
    pub fn speedup(&self) -> Option<f64> {
        let cosine = self.cosine.mean_secs();
        (cosine > 0.0).then(|| self.nearest_neighbor.mean_secs() / cosine)
    }
}

/// Calls `f(title)` `runs` times in sequence and returns per-call timings.
///
/// The call's return value, including any error it reports, is ignored.
pub fn benchmark<F, R>(mut f: F, title: &str, runs: usize) -> Result<BenchmarkReport>
where
    F: FnMut(&str) -> R,
{
    if runs == 0 {
        return Err(Error::InvalidParameter("runs must be > 0".into()));
    }
    let mut samples = Vec::with_capacity(runs);
    for _ in 0..runs {
        let start = Instant::now();
        black_box(f(black_box(title)));
        samples.push(start.elapsed());
    }
    let report = BenchmarkReport::from_samples(samples);
    tracing::debug!(title, runs, mean_us = report.mean.as_micros(), "Benchmark finished");
    Ok(report)
}

/// Mean wall-clock time of `runs` sequential calls to `f(title)`.
///
/// ```rust
/// use reelmatch_core::average_latency;
///
/// let mean = average_latency(|t: &str| t.len(), "Inception", 10)?;
/// assert!(mean.as_secs_f64() >= 0.0);
/// # Ok::<(), reelmatch_core::Error>(())
/// ```
pub fn average_latency<F, R>(f: F, title: &str, runs: usize) -> Result<Duration>
where
    F: FnMut(&str) -> R,
{
    benchmark(f, title, runs).map(|report| report.mean)
}

/// Benchmarks `recommend(title, backend, k)` on both backends.
///
/// Fails with `NotFound` before timing anything if `title` is unknown.
pub fn compare_backends(
    recommender: &Recommender,
    title: &str,
    k: usize,
    runs: usize,
) -> Result<BackendComparison> {
    if recommender.catalog().resolve(title).is_none() {
        return Err(Error::NotFound(title.to_string()));
    }
    let run = |kind: BackendKind| {
        benchmark(|t: &str| recommender.recommend(t, kind, k), title, runs)
    };
    let cosine = run(BackendKind::Cosine)?;
    let nearest_neighbor = run(BackendKind::NearestNeighbor)?;
    Ok(BackendComparison {
        title: title.to_string(),
        k,
        cosine,
        nearest_neighbor,
    })
}
