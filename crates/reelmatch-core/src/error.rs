//! Error types for ReelMatch.

use thiserror::Error;

/// Errors raised while building or querying the recommendation engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested title has no matching row in the catalog.
    #[error("Title not found in catalog: '{0}'")]
    NotFound(String),

    /// A required column is absent from the source table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The source table has no rows.
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// A caller-supplied parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration could not be extracted or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if this is the "title not in dataset" outcome.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for ReelMatch operations.
pub type Result<T> = std::result::Result<T, Error>;
