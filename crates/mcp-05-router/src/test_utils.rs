use crate::ports::outbound::{
    AgentPort, AlignmentInboxPort, DispatchError, FederationPort, KnowledgeGraphPort,
    LandingPort, ProjectionPort, RouterInboxPort, TransformPort,
};
use async_trait::async_trait;
use chrono::TimeZone;
use mcp_01_envelope::compute_envelope_hash;
use parking_lot::Mutex;
use serde_json::Value;
use shared_types::{
    Body, CapabilitySet, Envelope, Header, Identity, Intent, Layer, Message, MessageContext,
    MessagePayload, MessageType, Provenance, RouteHop, Safety, Subsystem, Timestamp,
    PROTOCOL_VERSION,
};

pub fn fixed_time() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Message from the local router module with a one-hop provenance.
pub fn message(intent: Intent, content: Value) -> Message {
    let caller = Identity::module("local", "MCP");
    Message {
        context: MessageContext {
            provenance: vec![RouteHop::from_identity(&caller, fixed_time())],
            caller,
            session_id: "session-1".into(),
            permissions: vec![],
            timestamp: fixed_time(),
        },
        intent,
        payload: MessagePayload {
            schema: "test.schema".into(),
            schema_version: "1".into(),
            content,
        },
    }
}

/// Recomputes hash and id; signature is a placeholder.
pub fn reseal(mut envelope: Envelope) -> Envelope {
    let hash = compute_envelope_hash(&envelope).unwrap();
    envelope.header.envelope_id = hash.clone();
    envelope.provenance.hash = hash;
    envelope.provenance.signature = "00".into();
    envelope
}

/// Sealed IO-layer envelope from the local transform module.
pub fn envelope(payload_type: &str, payload: Value) -> Envelope {
    let source = Identity::module("local", "TKD");
    reseal(Envelope {
        header: Header {
            envelope_id: String::new(),
            timestamp: fixed_time(),
            version: PROTOCOL_VERSION.into(),
            layer: Layer::Io,
            message_type: MessageType::Event,
            priority: None,
            target: Identity::module("local", "MCP"),
            source: source.clone(),
            capabilities: CapabilitySet::default(),
        },
        body: Body {
            payload_type: payload_type.into(),
            payload,
        },
        provenance: Provenance::unsigned(vec![RouteHop::from_identity(&source, fixed_time())]),
        safety: Safety::default(),
    })
}

/// Accepts everything and remembers what it was given.
#[derive(Default)]
pub struct RecordingPort {
    log: Mutex<Vec<(Subsystem, Message)>>,
}

impl RecordingPort {
    fn record(&self, to: Subsystem, message: &Message) -> Result<(), DispatchError> {
        self.log.lock().push((to, message.clone()));
        Ok(())
    }

    pub fn delivered(&self) -> Vec<Subsystem> {
        self.log.lock().iter().map(|(s, _)| *s).collect()
    }

    pub fn last_message(&self) -> Option<Message> {
        self.log.lock().last().map(|(_, m)| m.clone())
    }
}

#[async_trait]
impl LandingPort for RecordingPort {
    async fn land(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Landing, message)
    }
}

#[async_trait]
impl TransformPort for RecordingPort {
    async fn transform(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Transform, message)
    }
}

#[async_trait]
impl RouterInboxPort for RecordingPort {
    async fn receive(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Router, message)
    }
}

#[async_trait]
impl KnowledgeGraphPort for RecordingPort {
    async fn apply(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::KnowledgeGraph, message)
    }
}

#[async_trait]
impl AlignmentInboxPort for RecordingPort {
    async fn submit(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Alignment, message)
    }
}

#[async_trait]
impl AgentPort for RecordingPort {
    async fn execute(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Agents, message)
    }
}

#[async_trait]
impl ProjectionPort for RecordingPort {
    async fn project(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Projections, message)
    }
}

#[async_trait]
impl FederationPort for RecordingPort {
    async fn send(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Federation, message)
    }
}
