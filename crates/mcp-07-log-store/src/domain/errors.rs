//! # Domain Errors

use shared_types::{ErrorCode, McpError};
use std::path::PathBuf;
use thiserror::Error;

/// Log store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// Stored index does not match the entry's position.
    #[error("Log index out of sequence at position {position}: found {found}")]
    IndexOutOfSequence {
        /// Position in the sequence.
        position: u64,
        /// Stored index.
        found: u64,
    },

    /// Stored `prevHash` does not link to the previous entry.
    #[error("Log chain broken at index {index}: prevHash mismatch")]
    ChainBroken {
        /// Offending entry.
        index: u64,
    },

    /// Recomputed hash differs from the stored one.
    #[error("Log hash mismatch at index {index}: expected {stored}, got {computed}")]
    HashMismatch {
        /// Offending entry.
        index: u64,
        /// Stored hash.
        stored: String,
        /// Recomputed hash.
        computed: String,
    },

    /// A persisted line could not be decoded.
    #[error("Corrupt log record on line {line}: {message}")]
    CorruptRecord {
        /// One-based line number.
        line: usize,
        /// Decoder message.
        message: String,
    },

    /// Another process holds the log file.
    #[error("Log file already in use: {}", path.display())]
    Locked {
        /// Log file.
        path: PathBuf,
    },

    /// An earlier failed append could not be rolled back.
    #[error("Log file {} poisoned by an unrecoverable write failure", path.display())]
    Poisoned {
        /// Log file.
        path: PathBuf,
    },

    /// Read or write failure.
    #[error("Log I/O error: {0}")]
    Io(String),

    /// Entry could not be encoded.
    #[error("Log serialization error: {0}")]
    Serialization(String),
}

impl LogError {
    /// True for tamper or corruption findings, false for I/O trouble.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            LogError::IndexOutOfSequence { .. }
                | LogError::ChainBroken { .. }
                | LogError::HashMismatch { .. }
                | LogError::CorruptRecord { .. }
        )
    }

    /// Code in the shared error taxonomy.
    pub fn code(&self) -> ErrorCode {
        if self.is_integrity() {
            ErrorCode::LOG_INTEGRITY
        } else {
            ErrorCode::LOG_PERSISTENCE
        }
    }

    /// Structured error correlated with the envelope being logged.
    pub fn to_mcp_error(&self, correlation_id: &str) -> McpError {
        McpError::new(self.code(), self.to_string(), correlation_id)
    }
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::Io(err.to_string())
    }
}
