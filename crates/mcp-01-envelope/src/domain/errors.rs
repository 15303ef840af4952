//! # Domain Errors
//!
//! Error types for envelope construction and validation.
//!
//! Structural failures, hash mismatches and signature failures are distinct
//! variants and are never auto-corrected.

use crate::ports::outbound::SignerError;
use shared_types::{ErrorCode, McpError};
use thiserror::Error;

/// Errors raised while building or validating an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// A top-level section or required field is absent or empty.
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// The envelope could not be decoded into the envelope model.
    #[error("Malformed envelope: {0}")]
    Malformed(String),

    /// The protocol major version is not understood.
    #[error("Unsupported protocol version: {version}")]
    UnsupportedVersion {
        /// Version as written in the header.
        version: String,
    },

    /// The recomputed content hash differs from the stored one.
    #[error("Envelope hash mismatch: stored {stored}, computed {computed}")]
    HashMismatch {
        /// Hash stored in provenance.
        stored: String,
        /// Hash recomputed from content.
        computed: String,
    },

    /// The signature did not verify against the source node's key.
    #[error("Envelope signature verification failed for node {node_id}")]
    InvalidSignature {
        /// Claimed source node.
        node_id: String,
    },

    /// Required capabilities are not declared.
    #[error("Missing required capabilities: {}", missing.join(", "))]
    MissingCapabilities {
        /// Capability ids required but not declared.
        missing: Vec<String>,
    },

    /// The signing capability failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Content could not be serialized for hashing.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl EnvelopeError {
    /// Code in the shared error taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            EnvelopeError::MissingField(_) | EnvelopeError::Malformed(_) => {
                ErrorCode::MISSING_FIELD
            }
            EnvelopeError::UnsupportedVersion { .. } => ErrorCode::UNSUPPORTED_VERSION,
            EnvelopeError::HashMismatch { .. } => ErrorCode::HASH_MISMATCH,
            EnvelopeError::InvalidSignature { .. } => ErrorCode::SIGNATURE_INVALID,
            EnvelopeError::MissingCapabilities { .. } => ErrorCode::CAPABILITY_MISSING,
            EnvelopeError::Signing(_) => ErrorCode::SIGNING_FAILED,
            EnvelopeError::Serialization(_) => ErrorCode::SERIALIZATION_FAILED,
        }
    }

    /// Structured error correlated with the failing envelope.
    pub fn to_mcp_error(&self, correlation_id: &str) -> McpError {
        McpError::new(self.code(), self.to_string(), correlation_id)
    }
}

impl From<shared_crypto::CryptoError> for EnvelopeError {
    fn from(err: shared_crypto::CryptoError) -> Self {
        EnvelopeError::Serialization(err.to_string())
    }
}

impl From<SignerError> for EnvelopeError {
    fn from(err: SignerError) -> Self {
        EnvelopeError::Signing(err.to_string())
    }
}
