//! # Shared Crypto - Integrity Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `canonical` | Sorted-key JSON | Deterministic hash input |
//! | `hashing` | SHA-256 | Envelope, message and log-chain hashes |
//! | `signatures` | Ed25519 | Node signatures over content hashes |
//! | `keyring` | - | Node id to key lookup |
//!
//! ## Security Properties
//!
//! - **Canonical JSON**: key order and excluded integrity fields never
//!   affect a hash
//! - **Ed25519**: deterministic nonces, no RNG dependency when signing

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod errors;
pub mod hashing;
pub mod keyring;
pub mod signatures;

// Re-exports
pub use canonical::{
    canonical_json, canonical_string, canonicalize, ENVELOPE_EXCLUDED, MESSAGE_EXCLUDED,
    NONE_EXCLUDED,
};
pub use errors::CryptoError;
pub use hashing::{hash_canonical, sha256, sha256_hex, Hash};
pub use keyring::Keyring;
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
