//! # Envelope Validation
//!
//! Two independent checks, both required:
//!
//! - **Structural**: every section and required field present and non-empty,
//!   protocol major version supported
//! - **Cryptographic**: stored hash equals recomputed hash, and the signature
//!   verifies when a verifier is supplied
//!
//! Capability enforcement is a separate gate applied at router ingress.

use crate::domain::errors::EnvelopeError;
use crate::domain::hashing::compute_envelope_hash;
use crate::ports::outbound::EnvelopeVerifier;
use serde_json::Value;
use shared_types::{Envelope, SUPPORTED_MAJOR_VERSION};
use tracing::debug;

const SECTIONS: [&str; 4] = ["header", "body", "provenance", "safety"];

/// Decodes an envelope from raw JSON, reporting absent sections by name.
pub fn parse_envelope(value: &Value) -> Result<Envelope, EnvelopeError> {
    let obj = value
        .as_object()
        .ok_or_else(|| EnvelopeError::Malformed("envelope is not an object".into()))?;
    for section in SECTIONS {
        if !obj.get(section).is_some_and(Value::is_object) {
            return Err(EnvelopeError::MissingField(section));
        }
    }
    if obj["header"].get("timestamp").map_or(true, Value::is_null) {
        return Err(EnvelopeError::MissingField("header.timestamp"));
    }
    serde_json::from_value(value.clone()).map_err(|e| EnvelopeError::Malformed(e.to_string()))
}

/// Structural validation.
pub fn validate_structure(envelope: &Envelope) -> Result<(), EnvelopeError> {
    let header = &envelope.header;
    if header.envelope_id.is_empty() {
        return Err(EnvelopeError::MissingField("header.envelopeId"));
    }
    if header.version.is_empty() {
        return Err(EnvelopeError::MissingField("header.version"));
    }
    if header.major_version() != Some(SUPPORTED_MAJOR_VERSION) {
        return Err(EnvelopeError::UnsupportedVersion {
            version: header.version.clone(),
        });
    }
    if header.source.node_id.is_empty() {
        return Err(EnvelopeError::MissingField("header.source.nodeId"));
    }
    if envelope.body.payload_type.is_empty() {
        return Err(EnvelopeError::MissingField("body.payloadType"));
    }
    if envelope.provenance.hash.is_empty() {
        return Err(EnvelopeError::MissingField("provenance.hash"));
    }
    if envelope.provenance.signature.is_empty() {
        return Err(EnvelopeError::MissingField("provenance.signature"));
    }
    Ok(())
}

/// Cryptographic validation.
pub fn validate_integrity(
    envelope: &Envelope,
    verifier: Option<&dyn EnvelopeVerifier>,
) -> Result<(), EnvelopeError> {
    let computed = compute_envelope_hash(envelope)?;
    if computed != envelope.provenance.hash {
        debug!(envelope_id = %envelope.id(), "[Envelope] hash mismatch");
        return Err(EnvelopeError::HashMismatch {
            stored: envelope.provenance.hash.clone(),
            computed,
        });
    }

    if let Some(verifier) = verifier {
        let ok = verifier.verify(
            &envelope.provenance.hash,
            &envelope.provenance.signature,
            envelope,
        );
        if !ok {
            return Err(EnvelopeError::InvalidSignature {
                node_id: envelope.header.source.node_id.clone(),
            });
        }
    }
    Ok(())
}

/// Structural then cryptographic validation.
pub fn validate_envelope(
    envelope: &Envelope,
    verifier: Option<&dyn EnvelopeVerifier>,
) -> Result<(), EnvelopeError> {
    validate_structure(envelope)?;
    validate_integrity(envelope, verifier)
}

/// Every required capability must be declared.
pub fn enforce_capabilities(envelope: &Envelope) -> Result<(), EnvelopeError> {
    let missing = envelope.header.capabilities.missing();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EnvelopeError::MissingCapabilities { missing })
    }
}
