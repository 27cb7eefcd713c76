//! Latency measurement for recommendation queries.
//!
//! - [`average_latency`]: mean wall-clock time of repeated calls
//! - [`benchmark`]: per-run samples with percentile statistics
//! - [`compare_backends`]: both backends on the same title

mod benchmark;
mod latency;

pub use benchmark::{average_latency, benchmark, compare_backends, BackendComparison, BenchmarkReport};
pub use latency::{compute_latency_percentiles, LatencyStats};
