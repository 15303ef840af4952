//! # Hash Chain
//!
//! Entry hash = SHA-256 of the canonical JSON of
//! `{index, timestamp, envelope, prevHash}`. Nothing is excluded, so the
//! envelope's own hash and signature are covered as well.

use crate::domain::entry::LogEntry;
use crate::domain::errors::LogError;
use serde_json::json;
use shared_crypto::{hash_canonical, NONE_EXCLUDED};
use shared_types::{Envelope, Timestamp};

/// Hash of an entry built from its parts.
pub fn compute_entry_hash(
    index: u64,
    timestamp: &Timestamp,
    envelope: &Envelope,
    prev_hash: Option<&str>,
) -> Result<String, LogError> {
    let record = json!({
        "index": index,
        "timestamp": timestamp,
        "envelope": envelope,
        "prevHash": prev_hash,
    });
    hash_canonical(&record, NONE_EXCLUDED).map_err(|e| LogError::Serialization(e.to_string()))
}

/// Builds the entry that follows `previous`.
pub fn next_entry(
    previous: Option<&LogEntry>,
    timestamp: Timestamp,
    envelope: Envelope,
) -> Result<LogEntry, LogError> {
    let index = previous.map_or(0, |p| p.index + 1);
    let prev_hash = previous.map(|p| p.hash.clone());
    let hash = compute_entry_hash(index, &timestamp, &envelope, prev_hash.as_deref())?;
    Ok(LogEntry {
        index,
        timestamp,
        envelope,
        hash,
        prev_hash,
    })
}

/// Re-derives every link and hash; fails at the first bad entry.
pub fn verify_chain(entries: &[LogEntry]) -> Result<(), LogError> {
    let mut expected_prev: Option<&str> = None;
    for (position, entry) in entries.iter().enumerate() {
        let position = position as u64;
        if entry.index != position {
            return Err(LogError::IndexOutOfSequence {
                position,
                found: entry.index,
            });
        }
        if entry.prev_hash.as_deref() != expected_prev {
            return Err(LogError::ChainBroken { index: position });
        }
        let computed = compute_entry_hash(
            entry.index,
            &entry.timestamp,
            &entry.envelope,
            entry.prev_hash.as_deref(),
        )?;
        if computed != entry.hash {
            return Err(LogError::HashMismatch {
                index: position,
                stored: entry.hash.clone(),
                computed,
            });
        }
        expected_prev = Some(&entry.hash);
    }
    Ok(())
}
