//! # Log Entities

use serde::{Deserialize, Serialize};
use shared_types::{Envelope, Timestamp};

/// One accepted envelope in the audit trail.
///
/// Created only by the store's append path; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Zero-based position.
    pub index: u64,
    /// Write time.
    pub timestamp: Timestamp,
    /// The logged envelope.
    pub envelope: Envelope,
    /// Hex SHA-256 over index, timestamp, envelope and `prev_hash`.
    pub hash: String,
    /// Hash of the previous entry; `None` for index 0.
    pub prev_hash: Option<String>,
}

/// Where an append landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendReceipt {
    /// Assigned index.
    pub index: u64,
    /// Entry hash.
    pub hash: String,
}

/// Replay position: the next index to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogCursor {
    /// Next index to read.
    pub index: u64,
}

impl LogCursor {
    /// Cursor at `index`.
    pub fn at(index: u64) -> Self {
        Self { index }
    }

    /// Cursor positioned after `entries` were read from this one.
    #[must_use]
    pub fn advanced(self, entries: &[LogEntry]) -> Self {
        Self {
            index: self.index + entries.len() as u64,
        }
    }
}

impl From<u64> for LogCursor {
    fn from(index: u64) -> Self {
        Self::at(index)
    }
}
