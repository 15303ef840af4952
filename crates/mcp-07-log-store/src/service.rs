//! # Log Store Service
//!
//! Single-writer log over a [`LogPersistence`] backing. Index assignment,
//! chain linkage and the durable write all happen under one lock.

use crate::adapters::{InMemoryLog, JsonlLogFile};
use crate::domain::chain::{next_entry, verify_chain};
use crate::domain::entry::{AppendReceipt, LogCursor, LogEntry};
use crate::domain::errors::LogError;
use crate::ports::inbound::EnvelopeLog;
use crate::ports::outbound::{LogPersistence, SystemTimeSource, TimeSource};
use parking_lot::Mutex;
use shared_types::Envelope;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

struct LogState {
    entries: Vec<LogEntry>,
    backing: Box<dyn LogPersistence>,
}

/// Append-only, hash-chained envelope log.
pub struct LogStore {
    state: Mutex<LogState>,
    clock: Arc<dyn TimeSource>,
}

impl LogStore {
    /// Loads the backing and verifies the whole chain before accepting
    /// appends.
    ///
    /// # Errors
    ///
    /// Any integrity failure in persisted history is returned as is; the
    /// store refuses to open over tampered data.
    pub fn open(
        mut backing: Box<dyn LogPersistence>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, LogError> {
        let entries = backing.load()?;
        verify_chain(&entries).inspect_err(|e| {
            error!(error = %e, "[LogStore] integrity check failed at boot");
        })?;
        info!(entries = entries.len(), "[LogStore] chain verified");
        Ok(Self {
            state: Mutex::new(LogState { entries, backing }),
            clock,
        })
    }

    /// Store backed by a locked JSONL file, using the system clock.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let backing = JsonlLogFile::open(path)?;
        Self::open(Box::new(backing), Arc::new(SystemTimeSource))
    }

    /// Volatile store using the system clock.
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(LogState {
                entries: Vec::new(),
                backing: Box::new(InMemoryLog::new()),
            }),
            clock: Arc::new(SystemTimeSource),
        }
    }

    /// Copy of every entry, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.state.lock().entries.clone()
    }

    /// Re-verifies the in-memory chain.
    pub fn verify(&self) -> Result<(), LogError> {
        verify_chain(&self.state.lock().entries)
    }
}

impl EnvelopeLog for LogStore {
    fn append(&self, envelope: &Envelope) -> Result<AppendReceipt, LogError> {
        let mut state = self.state.lock();
        let entry = next_entry(state.entries.last(), self.clock.now(), envelope.clone())?;

        // Persist before publishing, so a failed write leaves no gap.
        state.backing.append(&entry)?;

        let receipt = AppendReceipt {
            index: entry.index,
            hash: entry.hash.clone(),
        };
        debug!(
            index = receipt.index,
            envelope_id = %envelope.id(),
            "[LogStore] appended"
        );
        state.entries.push(entry);
        Ok(receipt)
    }

    fn get_since(&self, cursor: LogCursor) -> Vec<LogEntry> {
        let state = self.state.lock();
        usize::try_from(cursor.index)
            .ok()
            .and_then(|start| state.entries.get(start..))
            .map(<[LogEntry]>::to_vec)
            .unwrap_or_default()
    }

    fn get_by_envelope_id(&self, envelope_id: &str) -> Option<LogEntry> {
        self.state
            .lock()
            .entries
            .iter()
            .find(|e| e.envelope.id() == envelope_id)
            .cloned()
    }

    fn len(&self) -> u64 {
        self.state.lock().entries.len() as u64
    }

    fn head_hash(&self) -> Option<String> {
        self.state.lock().entries.last().map(|e| e.hash.clone())
    }
}
