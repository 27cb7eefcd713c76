//! HNSW index parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// HNSW parameters for tuning build cost and recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnswParams {
    /// Number of bi-directional links per node (M parameter).
    /// Higher = better recall, more memory, slower build.
    pub max_connections: usize,
    /// Size of dynamic candidate list during construction.
    /// Higher = better recall, slower indexing.
    pub ef_construction: usize,
    /// Size of dynamic candidate list during search, raised to at least `k`.
    pub ef_search: usize,
}

impl Default for HnswParams {
    fn default() -> Self {
        Self {
            max_connections: 16,
            ef_construction: 200,
            ef_search: 64,
        }
    }
}

impl HnswParams {
    /// Creates parameters optimized for high recall.
    #[must_use]
    pub fn high_recall() -> Self {
        Self {
            max_connections: 32,
            ef_construction: 400,
            ef_search: 256,
        }
    }

    /// Creates parameters optimized for fast indexing.
    #[must_use]
    pub fn fast_indexing() -> Self {
        Self {
            max_connections: 8,
            ef_construction: 100,
            ef_search: 32,
        }
    }

    /// Creates custom parameters.
    #[must_use]
    pub const fn custom(max_connections: usize, ef_construction: usize, ef_search: usize) -> Self {
        Self {
            max_connections,
            ef_construction,
            ef_search,
        }
    }

    /// Candidate list size for a query asking for `k` results.
    #[must_use]
    pub fn ef_for(&self, k: usize) -> usize {
        self.ef_search.max(k)
    }

    /// Rejects parameters the graph cannot be built with.
    pub fn validate(&self) -> Result<()> {
        if self.max_connections < 2 {
            return Err(Error::InvalidParameter(format!(
                "max_connections must be >= 2, got {}",
                self.max_connections
            )));
        }
        if self.ef_construction == 0 {
            return Err(Error::InvalidParameter("ef_construction must be > 0".into()));
        }
        if self.ef_search == 0 {
            return Err(Error::InvalidParameter("ef_search must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(HnswParams::default().validate().is_ok());
        assert!(HnswParams::high_recall().validate().is_ok());
        assert!(HnswParams::fast_indexing().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate() {
        assert!(HnswParams::custom(1, 100, 10).validate().is_err());
        assert!(HnswParams::custom(16, 0, 10).validate().is_err());
        assert!(HnswParams::custom(16, 100, 0).validate().is_err());
    }

    #[test]
    fn test_ef_for_never_below_k() {
        let p = HnswParams::custom(16, 100, 10);
        assert_eq!(p.ef_for(5), 10);
        assert_eq!(p.ef_for(50), 50);
    }
}
