//! Title-to-title recommendations.
//!
//! A [`Recommender`] owns the catalog and everything derived from it: the
//! fitted vectorizer, the feature matrix and both similarity backends. All
//! of it is built together in [`Recommender::build`] and never mutated
//! afterwards, so queries are pure reads and the engine can be shared
//! through an `Arc`.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, RawTable};
use crate::config::{RecommendConfig, ReelmatchConfig};
use crate::error::{Error, Result};
use crate::features::{FeatureBuilder, FeatureMatrix, TfidfVectorizer};
use crate::index::{
    BackendKind, ExhaustiveCosine, NearestNeighbor, Neighbor, SimilarityBackend,
};

/// One recommended title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTitle {
    /// Catalog row of the recommended item.
    pub row: usize,
    /// Title of the recommended item.
    pub title: String,
    /// Similarity to the query, higher is closer.
    pub score: f32,
}

/// Ranked result of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Title or free text the results were computed for.
    pub query: String,
    /// Backend that produced the ranking.
    pub backend: BackendKind,
    /// Descending score, ties by ascending row.
    pub items: Vec<ScoredTitle>,
}

impl Recommendation {
    /// Number of results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing was similar enough to list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `(title, score)` pairs in rank order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, f32)> {
        self.items.iter().map(|i| (i.title.as_str(), i.score))
    }
}

/// Content-based recommendation engine over an immutable catalog.
pub struct Recommender {
    catalog: Catalog,
    vectorizer: TfidfVectorizer,
    features: Arc<FeatureMatrix>,
    cosine: ExhaustiveCosine,
    neighbors: NearestNeighbor,
    defaults: RecommendConfig,
}

impl Recommender {
    /// Builds features and both backends for `catalog`.
    pub fn build(catalog: Catalog, config: &ReelmatchConfig) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();

        let (vectorizer, matrix) = FeatureBuilder::new(config.features.clone()).fit(&catalog);
        let features = Arc::new(matrix);
        let cosine = ExhaustiveCosine::build(Arc::clone(&features));
        let neighbors = NearestNeighbor::build(
            Arc::clone(&features),
            config.index.neighbor_strategy,
            config.index.hnsw_params(),
        )?;

        tracing::info!(
            items = catalog.len(),
            vocabulary = features.n_cols(),
            nnz = features.nnz(),
            neighbor_strategy = ?neighbors.strategy(),
            elapsed_ms = start.elapsed().as_millis(),
            "Recommender built"
        );

        Ok(Self {
            catalog,
            vectorizer,
            features,
            cosine,
            neighbors,
            defaults: config.recommend.clone(),
        })
    }

    /// Builds from a loader table; fails with `MissingColumn` before any
    /// feature work if required columns are absent.
    pub fn from_table(table: &RawTable, config: &ReelmatchConfig) -> Result<Self> {
        Self::build(Catalog::from_table(table)?, config)
    }

    /// Builds with the default configuration.
    pub fn with_defaults(catalog: Catalog) -> Result<Self> {
        Self::build(catalog, &ReelmatchConfig::default())
    }

    /// The backend serving `kind`.
    #[must_use]
    pub fn backend(&self, kind: BackendKind) -> &dyn SimilarityBackend {
        match kind {
            BackendKind::Cosine => &self.cosine,
            BackendKind::NearestNeighbor => &self.neighbors,
        }
    }

    /// Up to `k` items most similar to `title`, never including it.
    ///
    /// The first row carrying `title` is the query row. An unknown title is
    /// [`Error::NotFound`], distinct from an empty result.
    pub fn recommend(&self, title: &str, backend: BackendKind, k: usize) -> Result<Recommendation> {
        let Some(row) = self.catalog.resolve(title) else {
            tracing::warn!(title, %backend, "Title not found in catalog");
            return Err(Error::NotFound(title.to_string()));
        };

        let neighbors = self.backend(backend).top_k_similar(row, k);
        let items = self.to_titles(&neighbors);
        tracing::debug!(title, row, %backend, k, results = items.len(), "Recommendation served");

        Ok(Recommendation {
            query: title.to_string(),
            backend,
            items,
        })
    }

    /// [`Recommender::recommend`] with the configured default backend and k.
    pub fn recommend_default(&self, title: &str) -> Result<Recommendation> {
        self.recommend(title, self.defaults.default_backend, self.defaults.default_k)
    }

    /// Ranks every item against free text. Unknown words are ignored; text
    /// with no known words scores 0 against everything.
    #[must_use]
    pub fn recommend_text(&self, query: &str, backend: BackendKind, k: usize) -> Recommendation {
        let vector = self.vectorizer.transform_one(query);
        let neighbors = self.backend(backend).top_k_for_vector(&vector, k);
        let items = self.to_titles(&neighbors);
        tracing::debug!(%backend, k, known_terms = vector.nnz(), results = items.len(), "Text query served");
        Recommendation {
            query: query.to_string(),
            backend,
            items,
        }
    }

    fn to_titles(&self, neighbors: &[Neighbor]) -> Vec<ScoredTitle> {
        neighbors
            .iter()
            .filter_map(|n| {
                self.catalog.get(n.row).map(|item| ScoredTitle {
                    row: n.row,
                    title: item.title().to_string(),
                    score: n.score,
                })
            })
            .collect()
    }

    /// The catalog recommendations are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Feature matrix shared by both backends.
    #[must_use]
    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    /// Vectorizer fitted on the catalog.
    #[must_use]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Query defaults.
    #[must_use]
    pub fn defaults(&self) -> &RecommendConfig {
        &self.defaults
    }
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("items", &self.catalog.len())
            .field("vocabulary", &self.features.n_cols())
            .field("neighbors", &self.neighbors)
            .finish_non_exhaustive()
    }
}
