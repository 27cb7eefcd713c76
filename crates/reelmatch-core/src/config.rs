//! Layered configuration for the recommendation engine.
//!
//! Sources are merged in order, later ones winning:
//!
//! 1. Built-in defaults ([`ReelmatchConfig::default`])
//! 2. An optional TOML file
//! 3. Environment variables prefixed `REELMATCH_`, nested keys split on `__`
//!    (e.g. `REELMATCH_RECOMMEND__DEFAULT_K=5`)

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::index::{BackendKind, HnswParams, NeighborStrategy};
use crate::text::StopWords;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "REELMATCH_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelmatchConfig {
    /// Query defaults.
    pub recommend: RecommendConfig,
    /// Feature extraction.
    pub features: FeatureConfig,
    /// Similarity index construction.
    pub index: IndexConfig,
    /// Benchmark harness.
    pub bench: BenchConfig,
    /// Log level used when `RUST_LOG` is unset.
    pub logging: LoggingConfig,
}

/// Query defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Number of recommendations when the caller does not specify one.
    pub default_k: usize,
    /// Backend used when the caller does not specify one.
    pub default_backend: BackendKind,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            default_k: 10,
            default_backend: BackendKind::Cosine,
        }
    }
}

/// TF-IDF vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Stop-word list removed before weighting.
    pub stop_words: StopWords,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    pub max_df: f32,
    /// Keep only the most frequent terms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_features: Option<usize>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            stop_words: StopWords::English,
            min_df: 1,
            max_df: 1.0,
            max_features: None,
        }
    }
}

/// Similarity index settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Search strategy behind the nearest-neighbor backend.
    pub neighbor_strategy: NeighborStrategy,
    /// HNSW `M` parameter.
    pub max_connections: usize,
    /// HNSW candidate list size during construction.
    pub ef_construction: usize,
    /// HNSW candidate list size during search.
    pub ef_search: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let params = HnswParams::default();
        Self {
            neighbor_strategy: NeighborStrategy::Exact,
            max_connections: params.max_connections,
            ef_construction: params.ef_construction,
            ef_search: params.ef_search,
        }
    }
}

impl IndexConfig {
    /// HNSW parameters described by this section.
    #[must_use]
    pub fn hnsw_params(&self) -> HnswParams {
        HnswParams::custom(self.max_connections, self.ef_construction, self.ef_search)
    }
}

/// Benchmark harness settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Sequential invocations per measurement.
    pub runs: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self { runs: 10 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `reelmatch_core=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ReelmatchConfig {
    /// Loads defaults, an optional TOML file, then `REELMATCH_*` variables.
    ///
    /// An explicit `path` that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        Self::finish(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Parses a TOML document layered over the defaults (no environment).
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::finish(Figment::from(Serialized::defaults(Self::default())).merge(Toml::string(toml)))
    }

    fn finish(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.recommend.default_k == 0 {
            return Err(Error::Config("recommend.default_k must be > 0".into()));
        }
        if self.bench.runs == 0 {
            return Err(Error::Config("bench.runs must be > 0".into()));
        }
        if !(self.features.max_df > 0.0 && self.features.max_df <= 1.0) {
            return Err(Error::Config(format!(
                "features.max_df must be in (0, 1], got {}",
                self.features.max_df
            )));
        }
        if self.features.max_features == Some(0) {
            return Err(Error::Config("features.max_features must be > 0".into()));
        }
        self.index.hnsw_params().validate().map_err(|e| match e {
            Error::InvalidParameter(msg) => Error::Config(format!("index: {msg}")),
            other => other,
        })
    }

    /// Serializes the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
