//! # Outbound Ports (Driven Ports)
//!
//! Durable storage and the clock the store depends on.

use crate::domain::entry::LogEntry;
use crate::domain::errors::LogError;
use shared_types::Timestamp;

/// Durable, append-only backing for the log.
///
/// Production: `JsonlLogFile`
/// Testing: `InMemoryLog`
pub trait LogPersistence: Send {
    /// Reads every persisted entry in index order.
    fn load(&mut self) -> Result<Vec<LogEntry>, LogError>;

    /// Durably appends one entry. Must not return before the entry would
    /// survive a process restart.
    fn append(&mut self, entry: &LogEntry) -> Result<(), LogError>;
}

/// Abstract clock (for testability).
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> Timestamp;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        chrono::Utc::now()
    }
}
