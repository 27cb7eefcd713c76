//! Tests for the two similarity backends.

use std::sync::Arc;

use super::*;
use crate::features::FeatureMatrix;

fn unit(pairs: &[(u32, f32)]) -> SparseVector {
    let mut v = SparseVector::from_pairs(pairs.to_vec());
    v.normalize();
    v
}

/// Rows: 0 and 3 identical, 1 close to 0, 2 orthogonal, 4 zero.
fn fixture() -> Arc<FeatureMatrix> {
    Arc::new(FeatureMatrix::new(
        vec![
            unit(&[(0, 1.0), (1, 1.0)]),
            unit(&[(0, 1.0), (1, 0.5), (2, 0.2)]),
            unit(&[(3, 1.0)]),
            unit(&[(0, 1.0), (1, 1.0)]),
            SparseVector::default(),
        ],
        4,
    ))
}

fn backends(features: &Arc<FeatureMatrix>) -> Vec<Box<dyn SimilarityBackend>> {
    vec![
        Box::new(ExhaustiveCosine::build(Arc::clone(features))),
        Box::new(NearestNeighbor::exact(Arc::clone(features))),
        Box::new(
            NearestNeighbor::hnsw(Arc::clone(features), HnswParams::default())
                .expect("valid params"),
        ),
    ]
}

#[test]
fn test_exhaustive_matrix_is_symmetric_with_unit_diagonal() {
    let features = fixture();
    let index = ExhaustiveCosine::build(Arc::clone(&features));
    for i in 0..4 {
        assert!((index.similarity(i, i) - 1.0).abs() < 1e-6);
        for j in 0..5 {
            assert_eq!(index.similarity(i, j).to_bits(), index.similarity(j, i).to_bits());
        }
    }
    // Zero row: similarity 0 everywhere, including itself.
    assert!(index.row(4).iter().all(|s| *s == 0.0));
}

#[test]
fn test_all_backends_exclude_self_and_rank_duplicate_first() {
    let features = fixture();
    for backend in backends(&features) {
        let top = backend.top_k_similar(0, 3);
        assert!(top.iter().all(|n| n.row != 0), "{:?}", backend.kind());
        assert_eq!(top[0].row, 3);
        assert!((top[0].score - 1.0).abs() < 1e-6);
        assert_eq!(top[1].row, 1);
    }
}

#[test]
fn test_all_backends_scores_non_increasing() {
    let features = fixture();
    for backend in backends(&features) {
        for row in 0..5 {
            let top = backend.top_k_similar(row, 10);
            assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}

#[test]
fn test_all_backends_bounded_length() {
    let features = fixture();
    for backend in backends(&features) {
        assert_eq!(backend.top_k_similar(1, 2).len(), 2);
        assert_eq!(backend.top_k_similar(1, 10).len(), 4);
        assert!(backend.top_k_similar(1, 0).is_empty());
    }
}

#[test]
fn test_zero_row_query_scores_zero_in_row_order() {
    let features = fixture();
    for backend in backends(&features) {
        let top = backend.top_k_similar(4, 4);
        assert_eq!(
            top.iter().map(|n| n.row).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert!(top.iter().all(|n| n.score.abs() < 1e-6 && !n.score.is_nan()));
    }
}

#[test]
fn test_ties_broken_by_ascending_row() {
    let features = Arc::new(FeatureMatrix::new(
        vec![unit(&[(0, 1.0)]), unit(&[(1, 1.0)]), unit(&[(1, 1.0)]), unit(&[(1, 1.0)])],
        2,
    ));
    for backend in backends(&features) {
        let rows: Vec<usize> = backend.top_k_similar(0, 3).iter().map(|n| n.row).collect();
        assert_eq!(rows, vec![1, 2, 3]);
        let rows: Vec<usize> = backend.top_k_similar(2, 3).iter().map(|n| n.row).collect();
        assert_eq!(rows, vec![1, 3, 0]);
    }
}

#[test]
fn test_top_k_for_vector_includes_every_row() {
    let features = fixture();
    for backend in backends(&features) {
        let q = unit(&[(3, 2.0)]);
        let top = backend.top_k_for_vector(&q, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].row, 2);
        assert!((top[0].score - 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_backend_kind_parsing() {
    assert_eq!("cosine".parse::<BackendKind>().ok(), Some(BackendKind::Cosine));
    assert_eq!("NN".parse::<BackendKind>().ok(), Some(BackendKind::NearestNeighbor));
    assert_eq!(
        "nearest-neighbor".parse::<BackendKind>().ok(),
        Some(BackendKind::NearestNeighbor)
    );
    assert!("annoy".parse::<BackendKind>().is_err());
    assert_eq!(BackendKind::NearestNeighbor.to_string(), "nearest_neighbor");
}

#[test]
fn test_nearest_neighbor_strategy_reported() {
    let features = fixture();
    assert_eq!(
        NearestNeighbor::exact(Arc::clone(&features)).strategy(),
        NeighborStrategy::Exact
    );
    let hnsw = NearestNeighbor::build(features, NeighborStrategy::Hnsw, HnswParams::default())
        .expect("valid params");
    assert_eq!(hnsw.strategy(), NeighborStrategy::Hnsw);
}

#[test]
fn test_unbounded_k_returns_every_other_row() {
    let features = fixture();
    for backend in backends(&features) {
        let top = backend.top_k_similar(1, usize::MAX);
        assert_eq!(top.len(), 4, "{:?}", backend.kind());
        assert!(top.iter().all(|n| n.row != 1));
        assert_eq!(backend.top_k_for_vector(features.row(1), usize::MAX).len(), 5);
    }
}

#[test]
fn test_orthogonal_rows_fill_every_slot() {
    let count = 120_usize;
    let rows = (0..count)
        .map(|i| unit(&[(u32::try_from(i).expect("small index"), 1.0)]))
        .collect();
    let features = Arc::new(FeatureMatrix::new(rows, count));
    for backend in backends(&features) {
        for row in 0..count {
            let top = backend.top_k_similar(row, count - 1);
            let expected: Vec<usize> = (0..count).filter(|r| *r != row).collect();
            assert_eq!(
                top.iter().map(|hit| hit.row).collect::<Vec<_>>(),
                expected,
                "{:?} row {row}",
                backend.kind()
            );
            assert!(top.iter().all(|hit| hit.score.abs() < 1e-6));
        }
    }
}
