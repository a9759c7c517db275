//! Boundary error types.
//!
//! Ordinary edit flows never fail: incompatible selections surface as
//! operator-unset values, operand-count mismatches are repaired by
//! normalization, and empty containers are valid states. Errors exist only
//! at the persistence boundary.

use thiserror::Error;

/// Errors that can occur loading or saving persisted query documents.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed query document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for persistence operations.
pub type ModelResult<T> = Result<T, ModelError>;
