//! Feature extraction: catalog items to TF-IDF rows.
//!
//! # Example
//!
//! ```rust
//! use reelmatch_core::{Catalog, FeatureBuilder, Item};
//!
//! let catalog = Catalog::from_items(vec![
//!     Item::new("A", "Drama", ""),
//!     Item::new("B", "Comedy", ""),
//! ])?;
//! let matrix = FeatureBuilder::default().build(&catalog);
//! assert_eq!(matrix.n_rows(), 2);
//! # Ok::<(), reelmatch_core::Error>(())
//! ```

mod sparse;
mod tfidf;

pub use sparse::{FeatureMatrix, SparseVector};
pub use tfidf::TfidfVectorizer;

use crate::catalog::Catalog;
use crate::config::FeatureConfig;

/// Builds the feature matrix of a catalog.
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    /// Builder using the given `[features]` settings.
    #[must_use]
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Fits a vectorizer on the catalog's combined texts and returns one row
    /// per item, in catalog order.
    #[must_use]
    pub fn build(&self, catalog: &Catalog) -> FeatureMatrix {
        self.fit(catalog).1
    }

    /// Like [`FeatureBuilder::build`], also returning the fitted vectorizer
    /// for vectorizing free-text queries later.
    #[must_use]
    pub fn fit(&self, catalog: &Catalog) -> (TfidfVectorizer, FeatureMatrix) {
        let texts: Vec<&str> = catalog.combined_texts().collect();
        let mut vectorizer = TfidfVectorizer::from_config(&self.config);
        let matrix = vectorizer.fit_transform(&texts);
        (vectorizer, matrix)
    }
}
