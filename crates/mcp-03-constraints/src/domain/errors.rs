//! # Domain Errors

use thiserror::Error;

/// Failures loading constraint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// Rules did not parse.
    #[error("Invalid constraint rules: {0}")]
    InvalidRules(String),

    /// Rules file could not be read.
    #[error("Cannot read constraint rules from {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// Underlying I/O error.
        message: String,
    },
}
