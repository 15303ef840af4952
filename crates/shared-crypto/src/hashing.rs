//! # SHA-256 Hashing
//!
//! Content hashing for envelopes, messages and log entries. Digests are
//! hex-encoded on the wire.

use crate::canonical::canonical_json;
use crate::CryptoError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Hex SHA-256 of the canonical JSON of `value` with `excluded` keys removed.
pub fn hash_canonical<T: Serialize>(value: &T, excluded: &[&str]) -> Result<String, CryptoError> {
    let canonical = canonical_json(value, excluded)?;
    Ok(sha256_hex(canonical.as_bytes()))
}
