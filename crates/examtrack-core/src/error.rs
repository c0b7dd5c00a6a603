//! Store error types.
//!
//! The analytics engine itself never fails; these errors come from the
//! stores that feed it. Defined in `examtrack-core` so callers can classify
//! store failures without string matching.

use thiserror::Error;

/// Errors that can occur while reading from an exam or field store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing data source does not exist.
    #[error("data source not found: {0}")]
    NotFound(String),

    /// Reading the data source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data source exists but its contents could not be decoded.
    #[error("failed to parse data: {0}")]
    Parse(String),

    /// The store is temporarily unable to serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns `true` if retrying the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::Parse(_))
    }
}
