//! Store errors.

use thiserror::Error;

/// Persistence-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced row does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected or lost the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),
}
