//! # Outbound Ports (Driven Ports / SPI)
//!
//! Signing and verification capabilities the envelope engine depends on.

use shared_types::Envelope;
use thiserror::Error;

/// Error from a signing capability.
#[derive(Debug, Error)]
pub enum SignerError {
    /// No signing key is held for the node
    #[error("No signing key for node {0}")]
    NoKey(String),

    /// The signing backend failed
    #[error("Signer unavailable: {0}")]
    Unavailable(String),
}

/// Produces a signature over an envelope's content hash.
///
/// Signing may suspend (remote HSM, agent keystore), so the port is async.
#[async_trait::async_trait]
pub trait EnvelopeSigner: Send + Sync {
    /// Sign `hash`. `envelope` is the pre-signed envelope for context.
    ///
    /// # Errors
    /// * `SignerError::NoKey` - the signer holds no key for its node
    async fn sign(&self, hash: &str, envelope: &Envelope) -> Result<String, SignerError>;
}

/// Checks a signature against the claimed source node's registered key.
///
/// Must fail closed: an unknown node or malformed signature yields `false`,
/// never a panic.
pub trait EnvelopeVerifier: Send + Sync {
    /// True iff `signature` is a valid signature of `hash` by the source of
    /// `envelope`.
    fn verify(&self, hash: &str, signature: &str, envelope: &Envelope) -> bool;
}
