//! Ed25519 signer and verifier backed by the shared [`Keyring`].

use crate::ports::outbound::{EnvelopeSigner, EnvelopeVerifier, SignerError};
use shared_crypto::Keyring;
use shared_types::Envelope;
use std::sync::Arc;
use tracing::debug;

/// Signs with the keypair registered for one node.
pub struct NodeSigner {
    keyring: Arc<Keyring>,
    node_id: String,
}

impl NodeSigner {
    /// Signer for `node_id`. The key is looked up at signing time.
    pub fn new(keyring: Arc<Keyring>, node_id: impl Into<String>) -> Self {
        Self {
            keyring,
            node_id: node_id.into(),
        }
    }
}

#[async_trait::async_trait]
impl EnvelopeSigner for NodeSigner {
    async fn sign(&self, hash: &str, _envelope: &Envelope) -> Result<String, SignerError> {
        let keypair = self
            .keyring
            .keypair(&self.node_id)
            .ok_or_else(|| SignerError::NoKey(self.node_id.clone()))?;
        Ok(keypair.sign(hash.as_bytes()).to_hex())
    }
}

/// Verifies against the public key registered for the envelope's source
/// node.
pub struct NodeVerifier {
    keyring: Arc<Keyring>,
}

impl NodeVerifier {
    /// Verifier over `keyring`.
    pub fn new(keyring: Arc<Keyring>) -> Self {
        Self { keyring }
    }
}

impl EnvelopeVerifier for NodeVerifier {
    fn verify(&self, hash: &str, signature: &str, envelope: &Envelope) -> bool {
        let node_id = &envelope.header.source.node_id;
        match self.keyring.public_key(node_id) {
            Some(key) => key.verify_hex(hash.as_bytes(), signature),
            None => {
                debug!(node_id = %node_id, "[Envelope] unknown source node");
                false
            }
        }
    }
}
