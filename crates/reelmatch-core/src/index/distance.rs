//! Distance computation over sparse feature rows.
//!
//! The trait keeps the HNSW graph independent of the metric it navigates by.

use crate::features::SparseVector;

/// Distance between two feature rows. Smaller is closer.
pub trait DistanceEngine: Send + Sync {
    /// Computes distance between two vectors.
    fn distance(&self, a: &SparseVector, b: &SparseVector) -> f32;

    /// Converts a distance back to a similarity score.
    fn to_score(&self, distance: f32) -> f32 {
        1.0 - distance
    }
}

/// Cosine similarity with a zero-vector guard.
///
/// Returns 0.0 when either vector is zero, never NaN. The result is clamped
/// to `[-1, 1]` to absorb rounding.
#[must_use]
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    cosine_with_norms(a, a.norm(), b, b.norm())
}

/// Cosine similarity with precomputed norms.
#[must_use]
pub fn cosine_with_norms(a: &SparseVector, norm_a: f32, b: &SparseVector, norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Cosine distance `1 - cos(a, b)`, in `[0, 2]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineDistance;

impl DistanceEngine for CosineDistance {
    fn distance(&self, a: &SparseVector, b: &SparseVector) -> f32 {
        1.0 - cosine_similarity(a, b)
    }
}
