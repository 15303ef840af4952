//! # Federation Service
//!
//! Answers handshake requests on behalf of the local node.

use crate::domain::capabilities::NodeCapabilities;
use crate::domain::errors::FederationError;
use crate::domain::handshake::{perform_handshake, HandshakeOutcome, HandshakeRequest};
use tracing::{info, warn};

/// Handles inbound handshakes against this node's declaration.
#[derive(Debug, Clone)]
pub struct FederationService {
    local: NodeCapabilities,
}

impl FederationService {
    /// Service declaring `local` to peers.
    pub fn new(local: NodeCapabilities) -> Self {
        Self { local }
    }

    /// This node's declaration.
    pub fn capabilities(&self) -> &NodeCapabilities {
        &self.local
    }

    /// Negotiates with the requesting peer.
    pub fn handle(&self, request: &HandshakeRequest) -> Result<HandshakeOutcome, FederationError> {
        let peer = &request.requesting_node.node_id;
        match perform_handshake(request, &self.local) {
            Ok(outcome) => {
                info!(
                    %peer,
                    autonomy = ?outcome.negotiated_capabilities.autonomy_level,
                    resources = outcome.sync_agreement.resources.len(),
                    "[Federation] handshake accepted"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(%peer, error = %err, "[Federation] handshake refused");
                Err(err)
            }
        }
    }
}
