//! # In-Memory Backing

use crate::domain::entry::LogEntry;
use crate::domain::errors::LogError;
use crate::ports::outbound::LogPersistence;

/// Volatile log backing. Entries given at construction act as previously
/// persisted history.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLog {
    entries: Vec<LogEntry>,
}

impl InMemoryLog {
    /// Empty backing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing that replays `entries` on load.
    pub fn with_entries(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }

    /// Everything appended so far.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

impl LogPersistence for InMemoryLog {
    fn load(&mut self) -> Result<Vec<LogEntry>, LogError> {
        Ok(self.entries.clone())
    }

    fn append(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        self.entries.push(entry.clone());
        Ok(())
    }
}
