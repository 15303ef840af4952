//! # Envelope
//!
//! The signed, hash-verifiable wrapper for every cross-subsystem message.
//!
//! ## Integrity Properties
//!
//! - **Content hash**: covers every field except `header.envelopeId`,
//!   `provenance.hash` and `provenance.signature`.
//! - **Identifier**: equals the content hash unless the builder was given one.
//! - **Append-only provenance**: hops are pushed, never replaced.
//! - **Versioning**: `header.version` carries the protocol version and is
//!   checked at validation time.

use crate::entities::{
    AlignmentFlag, CapabilitySet, Identity, Layer, MessageType, Priority, RiskLevel, RouteHop,
    SnapshotScope, Timestamp,
};
use serde::{Deserialize, Serialize};

/// Protocol version stamped on newly built envelopes.
pub const PROTOCOL_VERSION: &str = "1.1.0";

/// Major protocol version this crate understands.
pub const SUPPORTED_MAJOR_VERSION: u64 = 1;

/// Payload type of error envelopes.
pub const ERROR_PAYLOAD_TYPE: &str = "MCP.ERROR";

/// The unit of communication between subsystems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Addressing and classification.
    pub header: Header,
    /// Typed payload.
    pub body: Body,
    /// Route, content hash and signature.
    pub provenance: Provenance,
    /// Safety classification.
    pub safety: Safety,
}

impl Envelope {
    /// The envelope identifier, used as correlation id for failures.
    pub fn id(&self) -> &str {
        &self.header.envelope_id
    }

    /// The stored content hash.
    pub fn hash(&self) -> &str {
        &self.provenance.hash
    }

    /// The claimed sender.
    pub fn source(&self) -> &Identity {
        &self.header.source
    }
}

/// Envelope header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Identifier; excluded from the content hash.
    pub envelope_id: String,
    /// Creation time.
    pub timestamp: Timestamp,
    /// Protocol version, `major.minor.patch`.
    pub version: String,
    /// Transport layer.
    pub layer: Layer,
    /// Message type.
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Optional priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Sender.
    pub source: Identity,
    /// Recipient.
    pub target: Identity,
    /// Declared and required capabilities.
    #[serde(default)]
    pub capabilities: CapabilitySet,
}

impl Header {
    /// Major component of `version`, if it parses.
    pub fn major_version(&self) -> Option<u64> {
        self.version.split('.').next()?.parse().ok()
    }
}

/// Envelope body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    /// Payload type tag, e.g. `"TEST.PING"`.
    pub payload_type: String,
    /// Opaque payload.
    pub payload: serde_json::Value,
}

/// Provenance section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Ordered route hops, oldest first.
    pub route: Vec<RouteHop>,
    /// Hex SHA-256 content hash; excluded from itself.
    pub hash: String,
    /// Hex signature over `hash`; excluded from the content hash.
    pub signature: String,
    /// Ids of causally related envelopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_refs: Option<Vec<String>>,
}

impl Provenance {
    /// Unsigned provenance with the given route.
    pub fn unsigned(route: Vec<RouteHop>) -> Self {
        Self {
            route,
            hash: String::new(),
            signature: String::new(),
            context_refs: None,
        }
    }

    /// Appends a hop to the route. Existing hops are left untouched.
    pub fn append_hop(&mut self, hop: RouteHop) {
        self.route.push(hop);
    }
}

/// Safety section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Safety {
    /// Live state or a named snapshot.
    pub snapshot_scope: SnapshotScope,
    /// Concerns raised against the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_flags: Option<Vec<AlignmentFlag>>,
    /// Declared risk level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}
