//! Error types for the matrix engine.

use permgrid_core::{FileName, UserId};
use thiserror::Error;

/// Errors that can occur during matrix operations.
///
/// All failures are recoverable: batch processing records the failure for
/// the offending record and continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The named user holds no permissions at all.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// The user exists but has no entry for the named file.
    #[error("user {user} has no entry for file {file}")]
    UnknownEntry {
        /// The user whose chain was searched.
        user: UserId,
        /// The file name that was not found.
        file: FileName,
    },
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
