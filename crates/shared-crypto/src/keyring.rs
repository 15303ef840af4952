//! # Keyring
//!
//! In-memory registry of node keys. Local nodes hold a full keypair;
//! remote peers are registered by public key only.
//!
//! Lookups of unknown nodes return `None`. Callers decide how to fail.

use crate::signatures::{Ed25519KeyPair, Ed25519PublicKey};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
struct NodeKeys {
    public: Ed25519PublicKey,
    keypair: Option<Arc<Ed25519KeyPair>>,
}

/// Thread-safe node key registry.
#[derive(Debug, Default)]
pub struct Keyring {
    nodes: RwLock<HashMap<String, NodeKeys>>,
}

impl Keyring {
    /// Empty keyring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates and registers a fresh keypair for `node_id`, replacing any
    /// previous entry.
    pub fn generate_node_keys(&self, node_id: &str) -> Ed25519PublicKey {
        self.register_keypair(node_id, Ed25519KeyPair::generate())
    }

    /// Registers a keypair the caller already holds.
    pub fn register_keypair(&self, node_id: &str, keypair: Ed25519KeyPair) -> Ed25519PublicKey {
        let public = keypair.public_key();
        self.nodes.write().insert(
            node_id.to_string(),
            NodeKeys {
                public,
                keypair: Some(Arc::new(keypair)),
            },
        );
        public
    }

    /// Registers a remote peer's public key.
    pub fn register_public_key(&self, node_id: &str, public: Ed25519PublicKey) {
        self.nodes.write().insert(
            node_id.to_string(),
            NodeKeys {
                public,
                keypair: None,
            },
        );
    }

    /// Public key of `node_id`.
    pub fn public_key(&self, node_id: &str) -> Option<Ed25519PublicKey> {
        self.nodes.read().get(node_id).map(|k| k.public)
    }

    /// Signing keypair of `node_id`, if it is held locally.
    pub fn keypair(&self, node_id: &str) -> Option<Arc<Ed25519KeyPair>> {
        self.nodes.read().get(node_id).and_then(|k| k.keypair.clone())
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// True if no node is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}
