//! # Content Hashing
//!
//! `hash = sha256_hex(canonical(envelope))`, where the canonical form drops
//! `hash`, `signature` and `envelopeId` at every depth.

use crate::domain::errors::EnvelopeError;
use shared_crypto::{hash_canonical, ENVELOPE_EXCLUDED, MESSAGE_EXCLUDED};
use shared_types::{Envelope, Message};

/// Content hash of an envelope.
pub fn compute_envelope_hash(envelope: &Envelope) -> Result<String, EnvelopeError> {
    Ok(hash_canonical(envelope, ENVELOPE_EXCLUDED)?)
}

/// Correlation id of a router message: the hash of its canonical form with
/// `hash`, `signature` and `id` dropped.
pub fn message_correlation_id(message: &Message) -> Result<String, EnvelopeError> {
    Ok(hash_canonical(message, MESSAGE_EXCLUDED)?)
}
