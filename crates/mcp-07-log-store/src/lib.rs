//! # Envelope Log Store (mcp-07)
//!
//! Append-only, hash-chained audit trail of every accepted envelope.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Sequential indices | Entry *i* has index *i*, starting at 0 |
//! | 2 | Linked chain | `prevHash` of entry *i* is the hash of entry *i-1*, null for 0 |
//! | 3 | Recomputable hash | Hash = SHA-256 of canonical `{index, timestamp, envelope, prevHash}` |
//! | 4 | Verified at boot | Persisted history is fully re-verified before the first append |
//! | 5 | Single writer | Appends are serialised; the file is exclusively locked |
//! | 6 | Durable append | `append` returns only after the record is flushed |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - entries, chain hashing and verification
//! - `ports/` - `EnvelopeLog` inbound; `LogPersistence`, `TimeSource` outbound
//! - `adapters/` - JSONL file, in-memory
//! - `service.rs` - `LogStore`

#![warn(missing_docs)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adapters::{InMemoryLog, JsonlLogFile};
pub use domain::chain::{compute_entry_hash, next_entry, verify_chain};
pub use domain::entry::{AppendReceipt, LogCursor, LogEntry};
pub use domain::errors::LogError;
pub use ports::inbound::EnvelopeLog;
pub use ports::outbound::{LogPersistence, SystemTimeSource, TimeSource};
pub use service::LogStore;
