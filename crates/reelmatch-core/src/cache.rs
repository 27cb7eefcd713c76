//! Explicit engine cache keyed by table content.
//!
//! Rebuilding features and the pairwise matrix is the expensive part of the
//! engine, so callers that reload the same table (CLI invocations in a loop,
//! a long-lived process re-reading its input) can hold an [`EngineCache`]
//! and get the existing engine back whenever the table and configuration are
//! unchanged.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use sha2::{Digest, Sha256};

use crate::catalog::RawTable;
use crate::config::ReelmatchConfig;
use crate::error::Result;
use crate::recommender::Recommender;

/// SHA-256 of a table's column names and cells, hex encoded.
///
/// Every string is length-prefixed and null cells are tagged separately from
/// empty strings, so distinct tables never share an encoding.
#[must_use]
pub fn fingerprint(table: &RawTable) -> String {
    let mut hasher = Sha256::new();
    hasher.update((table.columns().len() as u64).to_le_bytes());
    for column in table.columns() {
        update_str(&mut hasher, column);
    }
    hasher.update((table.len() as u64).to_le_bytes());
    for row in table.rows() {
        for cell in row {
            match cell {
                None => hasher.update([0_u8]),
                Some(value) => {
                    hasher.update([1_u8]);
                    update_str(&mut hasher, value);
                }
            }
        }
    }
    hex::encode(hasher.finalize())
}

fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

struct CachedEngine {
    fingerprint: String,
    config: ReelmatchConfig,
    engine: Arc<Recommender>,
}

/// Holds at most one built engine and swaps it atomically on rebuild.
///
/// Readers either see the previous engine or the complete new one.
/// Concurrent misses may each build; the last one published wins.
pub struct EngineCache {
    current: ArcSwapOption<CachedEngine>,
}

impl EngineCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
        }
    }

    /// Returns the cached engine if it was built from an identical table
    /// with an identical configuration, otherwise builds and publishes one.
    pub fn get_or_build(
        &self,
        table: &RawTable,
        config: &ReelmatchConfig,
    ) -> Result<Arc<Recommender>> {
        let fingerprint = fingerprint(table);
        if let Some(cached) = self.current.load_full() {
            if cached.fingerprint == fingerprint && cached.config == *config {
                tracing::debug!(%fingerprint, "Engine cache hit");
                return Ok(Arc::clone(&cached.engine));
            }
        }

        tracing::debug!(%fingerprint, "Engine cache miss, rebuilding");
        let engine = Arc::new(Recommender::from_table(table, config)?);
        self.current.store(Some(Arc::new(CachedEngine {
            fingerprint,
            config: config.clone(),
            engine: Arc::clone(&engine),
        })));
        Ok(engine)
    }

    /// Drops the cached engine; the next lookup rebuilds.
    pub fn invalidate(&self) {
        if self.current.swap(None).is_some() {
            tracing::debug!("Engine cache invalidated");
        }
    }

    /// Currently published engine, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Recommender>> {
        self.current.load_full().map(|c| Arc::clone(&c.engine))
    }

    /// Fingerprint of the table behind the published engine.
    #[must_use]
    pub fn cached_fingerprint(&self) -> Option<String> {
        self.current.load_full().map(|c| c.fingerprint.clone())
    }
}

impl Default for EngineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EngineCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCache")
            .field("fingerprint", &self.cached_fingerprint())
            .finish()
    }
}
