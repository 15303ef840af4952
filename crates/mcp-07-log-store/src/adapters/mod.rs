//! # Adapters
//!
//! - `jsonl` - one JSON record per line, exclusively locked
//! - `memory` - volatile backing for tests and throwaway nodes

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlLogFile;
pub use memory::InMemoryLog;
