//! # Federation Port
//!
//! There is no network transport: handshakes addressed to a peer are
//! answered by an in-process [`FederationService`] holding the peer's
//! declared capabilities.

use async_trait::async_trait;
use mcp_05_router::{DispatchError, FederationPort};
use mcp_06_federation::{FederationService, HandshakeOutcome, HandshakeRequest};
use parking_lot::RwLock;
use shared_types::{Intent, Message, Subsystem};
use tracing::debug;

/// Federation port answering handshakes locally.
#[derive(Debug)]
pub struct LoopbackFederation {
    peer: FederationService,
    agreements: RwLock<Vec<HandshakeOutcome>>,
}

impl LoopbackFederation {
    /// Port whose peer answers with `peer`.
    pub fn new(peer: FederationService) -> Self {
        Self {
            peer,
            agreements: RwLock::new(Vec::new()),
        }
    }

    /// Successful handshakes, oldest first.
    pub fn agreements(&self) -> Vec<HandshakeOutcome> {
        self.agreements.read().clone()
    }
}

#[async_trait]
impl FederationPort for LoopbackFederation {
    async fn send(&self, message: &Message) -> Result<(), DispatchError> {
        if message.intent != Intent::FederationHandshake {
            debug!(intent = %message.intent, "[Federation] forwarded");
            return Ok(());
        }

        let request: HandshakeRequest = serde_json::from_value(message.payload.content.clone())
            .map_err(|e| {
                DispatchError::failed(Subsystem::Federation, format!("Malformed handshake: {e}"))
            })?;
        let outcome = self
            .peer
            .handle(&request)
            .map_err(|e| DispatchError::failed(Subsystem::Federation, e.to_string()))?;
        self.agreements.write().push(outcome);
        Ok(())
    }
}
