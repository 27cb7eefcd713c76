//! # `ReelMatch` Core
//!
//! Content-based recommendation engine for catalogs of titled items.
//!
//! Each item's title, categories and description are combined into one text,
//! weighted with TF-IDF, and compared with cosine similarity through one of
//! two interchangeable backends:
//!
//! - **Cosine**: the full N×N similarity matrix, computed once at build time
//! - **Nearest neighbor**: cosine-distance neighbor search at query time,
//!   exact or over an HNSW graph
//!
//! ## Quick Start
//!
//! ```rust
//! use reelmatch_core::{BackendKind, Catalog, Item, Recommender};
//!
//! let catalog = Catalog::from_items(vec![
//!     Item::new("A", "Drama", ""),
//!     Item::new("B", "Drama", ""),
//!     Item::new("C", "Comedy", ""),
//! ])?;
//! let engine = Recommender::with_defaults(catalog)?;
//!
//! let recs = engine.recommend("A", BackendKind::Cosine, 2)?;
//! assert_eq!(recs.items[0].title, "B");
//! assert!(engine.recommend("Z", BackendKind::Cosine, 2).is_err());
//! # Ok::<(), reelmatch_core::Error>(())
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::float_cmp,
        clippy::cast_lossless,
        clippy::manual_assert
    )
)]

pub mod cache;
pub mod catalog;
#[cfg(test)]
mod catalog_tests;
pub mod config;
#[cfg(test)]
mod config_tests;
pub mod error;
pub mod features;
pub mod index;
pub mod metrics;
pub mod recommender;
pub mod text;

pub use cache::{fingerprint, EngineCache};
pub use catalog::{Catalog, Item, RawTable};
pub use config::ReelmatchConfig;
pub use error::{Error, Result};
pub use features::{FeatureBuilder, FeatureMatrix, SparseVector, TfidfVectorizer};
pub use index::{BackendKind, Neighbor, NeighborStrategy, SimilarityBackend};
pub use metrics::{average_latency, compare_backends, BackendComparison, BenchmarkReport};
pub use recommender::{Recommendation, Recommender, ScoredTitle};
