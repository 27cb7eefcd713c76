//! TF-IDF vectorizer.
//!
//! ```text
//! tf(t, d)  = count of t in d
//! idf(t)    = ln((1 + N) / (1 + df(t))) + 1
//! row(d)    = l2_normalize(tf * idf)
//! ```

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use super::sparse::{FeatureMatrix, SparseVector};
use crate::config::FeatureConfig;
use crate::text::{StopWords, Tokenizer};

/// Fits a vocabulary and IDF weights over a corpus, then vectorizes text.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    min_df: usize,
    max_df: f32,
    max_features: Option<usize>,
    vocabulary: FxHashMap<String, u32>,
    idf: Vec<f32>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    /// English stop words, no document-frequency filtering.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(StopWords::English),
            min_df: 1,
            max_df: 1.0,
            max_features: None,
            vocabulary: FxHashMap::default(),
            idf: Vec::new(),
        }
    }

    /// Vectorizer configured from the `[features]` section.
    #[must_use]
    pub fn from_config(config: &FeatureConfig) -> Self {
        let mut v = Self::new()
            .with_stop_words(config.stop_words)
            .with_min_df(config.min_df)
            .with_max_df(config.max_df);
        v.max_features = config.max_features;
        v
    }

    /// Stop-word list removed before weighting.
    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.tokenizer = Tokenizer::new(stop_words);
        self
    }

    /// Terms in fewer than `min_df` documents are ignored.
    #[must_use]
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Terms in more than `max_df` of the documents are ignored.
    #[must_use]
    pub fn with_max_df(mut self, max_df: f32) -> Self {
        self.max_df = max_df.clamp(0.0, 1.0);
        self
    }

    /// Keep only the `max_features` most frequent terms.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Learns the vocabulary and IDF weights. Deterministic: columns are
    /// assigned in lexicographic term order.
    // Reason: document counts are far below 2^24, exact in f32/f64.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        let n_docs = documents.len();
        let mut term_freq: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let tokens = self.tokenizer.tokenize(doc.as_ref());
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            for token in &tokens {
                *term_freq.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        let max_df_count = self.max_df * n_docs as f32;
        let mut kept: Vec<(String, usize)> = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df && *df as f32 <= max_df_count)
            .collect();

        if let Some(max_features) = self.max_features {
            if kept.len() > max_features {
                let mut by_freq: Vec<(String, usize, usize)> = kept
                    .into_iter()
                    .map(|(term, df)| {
                        let tf = term_freq.get(&term).copied().unwrap_or(0);
                        (term, df, tf)
                    })
                    .collect();
                by_freq.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
                by_freq.truncate(max_features);
                by_freq.sort_by(|a, b| a.0.cmp(&b.0));
                kept = by_freq.into_iter().map(|(term, df, _)| (term, df)).collect();
            }
        }

        let n = n_docs as f32;
        self.idf = kept
            .iter()
            .map(|(_, df)| ((1.0 + n) / (1.0 + *df as f32)).ln() + 1.0)
            .collect();
        self.vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(col, (term, _))| (term, col as u32))
            .collect();
    }

    /// Vectorizes one text with the fitted vocabulary. Unknown terms are
    /// ignored; text with no known terms yields the zero vector.
    #[must_use]
    pub fn transform_one(&self, text: &str) -> SparseVector {
        let pairs: Vec<(u32, f32)> = self
            .tokenizer
            .tokenize(text)
            .iter()
            .filter_map(|token| self.vocabulary.get(token).map(|&col| (col, 1.0)))
            .collect();
        let mut counts = SparseVector::from_pairs(pairs);
        let weighted: Vec<(u32, f32)> = counts
            .indices()
            .iter()
            .zip(counts.values())
            .map(|(&col, &tf)| (col, tf * self.idf[col as usize]))
            .collect();
        counts = SparseVector::from_pairs(weighted);
        counts.normalize();
        counts
    }

    /// Vectorizes every document.
    #[must_use]
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> FeatureMatrix {
        let rows = documents
            .iter()
            .map(|d| self.transform_one(d.as_ref()))
            .collect();
        FeatureMatrix::new(rows, self.vocabulary_size())
    }

    /// [`TfidfVectorizer::fit`] then [`TfidfVectorizer::transform`].
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> FeatureMatrix {
        self.fit(documents);
        self.transform(documents)
    }

    /// Learned term → column mapping.
    #[must_use]
    pub fn vocabulary(&self) -> &FxHashMap<String, u32> {
        &self.vocabulary
    }

    /// Number of learned terms.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// IDF weight of `term`, if it is in the vocabulary.
    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary
            .get(term)
            .map(|&col| self.idf[col as usize])
    }
}
