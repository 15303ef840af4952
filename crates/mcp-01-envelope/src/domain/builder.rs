//! # Envelope Builder
//!
//! Assembles a provisional envelope, hashes it, assigns its identifier,
//! requests a signature and validates the result.
//!
//! Building the same parameters twice (same timestamps) yields the same hash
//! and, unless the identifier was overridden, the same identifier.

use crate::domain::errors::EnvelopeError;
use crate::domain::hashing::compute_envelope_hash;
use crate::domain::validation::validate_envelope;
use crate::ports::outbound::EnvelopeSigner;
use serde_json::Value;
use shared_types::{
    Body, CapabilitySet, Envelope, Header, Identity, Layer, MessageType, Priority, Provenance,
    RouteHop, Safety, Timestamp, PROTOCOL_VERSION,
};

/// Everything needed to build an envelope except its integrity fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeParams {
    /// Explicit identifier; defaults to the content hash.
    pub envelope_id: Option<String>,
    /// Creation time.
    pub timestamp: Timestamp,
    /// Protocol version.
    pub version: String,
    /// Transport layer.
    pub layer: Layer,
    /// Message type.
    pub message_type: MessageType,
    /// Optional priority.
    pub priority: Option<Priority>,
    /// Sender.
    pub source: Identity,
    /// Recipient.
    pub target: Identity,
    /// Capabilities.
    pub capabilities: CapabilitySet,
    /// Payload type tag.
    pub payload_type: String,
    /// Payload.
    pub payload: Value,
    /// Initial provenance route.
    pub route: Vec<RouteHop>,
    /// Related envelope ids.
    pub context_refs: Option<Vec<String>>,
    /// Safety section.
    pub safety: Safety,
}

impl EnvelopeParams {
    /// Parameters with protocol defaults: current version, live scope, no
    /// capabilities and an empty route.
    pub fn new(
        layer: Layer,
        message_type: MessageType,
        source: Identity,
        target: Identity,
        payload_type: impl Into<String>,
        payload: Value,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            envelope_id: None,
            timestamp,
            version: PROTOCOL_VERSION.to_string(),
            layer,
            message_type,
            priority: None,
            source,
            target,
            capabilities: CapabilitySet::default(),
            payload_type: payload_type.into(),
            payload,
            route: Vec::new(),
            context_refs: None,
            safety: Safety::default(),
        }
    }

    fn provisional(&self) -> Envelope {
        Envelope {
            header: Header {
                envelope_id: self.envelope_id.clone().unwrap_or_default(),
                timestamp: self.timestamp,
                version: self.version.clone(),
                layer: self.layer,
                message_type: self.message_type,
                priority: self.priority,
                source: self.source.clone(),
                target: self.target.clone(),
                capabilities: self.capabilities.clone(),
            },
            body: Body {
                payload_type: self.payload_type.clone(),
                payload: self.payload.clone(),
            },
            provenance: Provenance {
                context_refs: self.context_refs.clone(),
                ..Provenance::unsigned(self.route.clone())
            },
            safety: self.safety.clone(),
        }
    }
}

/// Builds, signs and validates an envelope.
pub async fn build_envelope(
    params: &EnvelopeParams,
    signer: &dyn EnvelopeSigner,
) -> Result<Envelope, EnvelopeError> {
    let mut envelope = params.provisional();
    let hash = compute_envelope_hash(&envelope)?;

    envelope.header.envelope_id = params.envelope_id.clone().unwrap_or_else(|| hash.clone());
    envelope.provenance.hash = hash;
    seal(envelope, signer).await
}

/// Appends a hop to an envelope's route, then re-hashes and re-signs it.
///
/// The identifier is kept so the envelope stays correlated across hops.
pub async fn append_hop(
    envelope: &Envelope,
    hop: RouteHop,
    signer: &dyn EnvelopeSigner,
) -> Result<Envelope, EnvelopeError> {
    let mut next = envelope.clone();
    next.provenance.append_hop(hop);
    next.provenance.hash = compute_envelope_hash(&next)?;
    next.provenance.signature.clear();
    seal(next, signer).await
}

async fn seal(mut envelope: Envelope, signer: &dyn EnvelopeSigner) -> Result<Envelope, EnvelopeError> {
    let signature = signer.sign(&envelope.provenance.hash, &envelope).await?;
    envelope.provenance.signature = signature;
    validate_envelope(&envelope, None)?;
    Ok(envelope)
}
