//! # Inbound Ports (Driving Ports / API)

use crate::domain::entry::{AppendReceipt, LogCursor, LogEntry};
use crate::domain::errors::LogError;
use shared_types::Envelope;

/// Append-only audit log of accepted envelopes.
pub trait EnvelopeLog: Send + Sync {
    /// Appends an envelope and returns its index and entry hash.
    fn append(&self, envelope: &Envelope) -> Result<AppendReceipt, LogError>;

    /// Entries from `cursor` onwards; empty when the cursor is past the end.
    fn get_since(&self, cursor: LogCursor) -> Vec<LogEntry>;

    /// First entry carrying the given envelope id.
    fn get_by_envelope_id(&self, envelope_id: &str) -> Option<LogEntry>;

    /// Number of entries, which is also the next index.
    fn len(&self) -> u64;

    /// True when nothing has been logged.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hash of the newest entry.
    fn head_hash(&self) -> Option<String>;
}
