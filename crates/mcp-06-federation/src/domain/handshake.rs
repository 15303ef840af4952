//! # Handshake Negotiation
//!
//! Pure: the outcome depends only on the request and the target's declared
//! capabilities.
//!
//! 1. Verify both identities
//! 2. Both sides alignment-compatible
//! 3. Neither side at autonomy `NONE`
//! 4. Non-empty intersection of supported intents
//! 5. Per-resource sync: same type on both sides, never `FULL`
//! 6. Autonomy = lower of the two levels
//!
//! The resulting agreement is always voluntary.

use crate::domain::capabilities::{
    negotiate_sync, AgreedSyncType, AutonomyLevel, NegotiatedCapabilities, NodeCapabilities,
};
use crate::domain::errors::{FederationError, NodeRole};
use crate::domain::identity::verify_node_identity;
use mcp_01_envelope::EnvelopeParams;
use serde::{Deserialize, Serialize};
use shared_types::{
    Identity, Intent, Layer, Message, MessageContext, MessagePayload, MessageType, Timestamp,
};

/// Payload type of handshake envelopes.
pub const HANDSHAKE_PAYLOAD_TYPE: &str = "FEDERATION.HANDSHAKE";

/// A node asking to federate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandshakeRequest {
    /// Requester.
    pub requesting_node: Identity,
    /// Requester's declaration.
    pub requesting_capabilities: NodeCapabilities,
    /// Node asked.
    pub target_node: Identity,
}

/// Sync terms. Never authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAgreement {
    /// Resources kept in sync.
    pub resources: Vec<String>,
    /// Overall type of the agreement; always `Voluntary`.
    pub sync_type: AgreedSyncType,
    /// Always `true`.
    pub voluntary: bool,
}

/// A successful handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandshakeOutcome {
    /// Negotiated terms.
    pub negotiated_capabilities: NegotiatedCapabilities,
    /// Sync agreement.
    pub sync_agreement: SyncAgreement,
}

/// Negotiates terms between two declarations.
pub fn negotiate_capabilities(
    requesting: &NodeCapabilities,
    target: &NodeCapabilities,
) -> Result<NegotiatedCapabilities, FederationError> {
    if !requesting.alignment_compatible || !target.alignment_compatible {
        return Err(FederationError::AlignmentIncompatible);
    }
    if requesting.autonomy_level == AutonomyLevel::None
        || target.autonomy_level == AutonomyLevel::None
    {
        return Err(FederationError::AutonomySurrendered);
    }

    let common: Vec<Intent> = requesting
        .supported_intents
        .iter()
        .copied()
        .filter(|i| target.supported_intents.contains(i))
        .collect();
    if common.is_empty() {
        return Err(FederationError::NoCommonIntents);
    }

    Ok(NegotiatedCapabilities {
        node_id: requesting.node_id.clone(),
        supported_intents: common,
        alignment_compatible: true,
        autonomy_level: requesting.autonomy_level.min(target.autonomy_level),
        sync_capabilities: negotiate_sync(&requesting.sync_capabilities, &target.sync_capabilities),
    })
}

/// Runs the handshake against the target's declared capabilities.
pub fn perform_handshake(
    request: &HandshakeRequest,
    target: &NodeCapabilities,
) -> Result<HandshakeOutcome, FederationError> {
    for (role, identity) in [
        (NodeRole::Requesting, &request.requesting_node),
        (NodeRole::Target, &request.target_node),
    ] {
        verify_node_identity(identity)
            .map_err(|reason| FederationError::IdentityRejected { role, reason })?;
    }

    let negotiated = negotiate_capabilities(&request.requesting_capabilities, target)?;
    let resources = negotiated
        .sync_capabilities
        .iter()
        .map(|s| s.resource.clone())
        .collect();

    Ok(HandshakeOutcome {
        negotiated_capabilities: negotiated,
        sync_agreement: SyncAgreement {
            resources,
            sync_type: AgreedSyncType::Voluntary,
            voluntary: true,
        },
    })
}

/// Wraps a handshake request in a FEDERATION_HANDSHAKE message.
pub fn handshake_message(
    context: MessageContext,
    request: &HandshakeRequest,
    schema: &str,
    schema_version: &str,
) -> Result<Message, FederationError> {
    let content =
        serde_json::to_value(request).map_err(|e| FederationError::Serialization(e.to_string()))?;
    Ok(Message {
        context,
        intent: Intent::FederationHandshake,
        payload: MessagePayload {
            schema: schema.to_string(),
            schema_version: schema_version.to_string(),
            content,
        },
    })
}

/// Envelope parameters carrying a handshake request on the federation
/// layer, from `source` to the request's target node.
pub fn handshake_envelope_params(
    request: &HandshakeRequest,
    source: Identity,
    timestamp: Timestamp,
) -> Result<EnvelopeParams, FederationError> {
    let payload =
        serde_json::to_value(request).map_err(|e| FederationError::Serialization(e.to_string()))?;
    Ok(EnvelopeParams::new(
        Layer::Federation,
        MessageType::Request,
        source,
        request.target_node.clone(),
        HANDSHAKE_PAYLOAD_TYPE,
        payload,
        timestamp,
    ))
}
