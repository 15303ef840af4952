//! Shared builders for the integration scenarios.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeZone;
use parking_lot::Mutex;
use serde_json::Value;

use mcp_01_envelope::{EnvelopeParams, EnvelopeService, EnvelopeVerifier, NodeSigner, NodeVerifier};
use mcp_03_constraints::{ConstraintRules, ConstraintValidator};
use mcp_04_alignment::{ReviewCapability, ReviewPolicy, ReviewRequest, ReviewResult};
use mcp_05_router::{
    AgentPort, AlignmentInboxPort, DispatchError, FederationPort, KnowledgeGraphPort, LandingPort,
    ProjectionPort, Router, RouterConfig, RouterInboxPort, SubsystemPorts, TransformPort,
};
use shared_crypto::Keyring;
use shared_types::{
    Identity, Intent, Layer, Message, MessageContext, MessagePayload, MessageType, RouteHop,
    Subsystem, Timestamp,
};

// =============================================================================
// IDENTITIES AND TIME
// =============================================================================

pub const NODE: &str = "node-1";

pub fn fixed_time() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn module(subsystem: Subsystem) -> Identity {
    Identity::module(NODE, subsystem.tag())
}

// =============================================================================
// ENVELOPES
// =============================================================================

/// Keyring holding a keypair for [`NODE`], and an envelope engine signing
/// and verifying with it.
pub fn envelope_service() -> (Arc<Keyring>, EnvelopeService) {
    let keyring = Arc::new(Keyring::new());
    keyring.generate_node_keys(NODE);
    let signer = Arc::new(NodeSigner::new(Arc::clone(&keyring), NODE));
    let verifier: Arc<dyn EnvelopeVerifier> = Arc::new(NodeVerifier::new(Arc::clone(&keyring)));
    (keyring, EnvelopeService::new(signer, Some(verifier)))
}

/// Event from `from` to the router with a one-hop route.
pub fn params(layer: Layer, from: Subsystem, payload_type: &str, payload: Value) -> EnvelopeParams {
    let source = module(from);
    let mut params = EnvelopeParams::new(
        layer,
        MessageType::Event,
        source.clone(),
        module(Subsystem::Router),
        payload_type,
        payload,
        fixed_time(),
    );
    params.route = vec![RouteHop::from_identity(&source, fixed_time())];
    params
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Message from the router module of [`NODE`] with a one-hop provenance.
pub fn message(intent: Intent, content: Value) -> Message {
    let caller = module(Subsystem::Router);
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
            schema_version: "1.1.0".into(),
            content,
        },
    }
}

// =============================================================================
// ROUTER COLLABORATORS
// =============================================================================

/// Dispatch port recording every delivery.
#[derive(Default)]
pub struct Recorder {
    delivered: Mutex<Vec<(Subsystem, Message)>>,
}

impl Recorder {
    pub fn destinations(&self) -> Vec<Subsystem> {
        self.delivered.lock().iter().map(|(to, _)| *to).collect()
    }

    pub fn last(&self) -> Option<Message> {
        self.delivered.lock().last().map(|(_, m)| m.clone())
    }

    fn record(&self, to: Subsystem, message: &Message) -> Result<(), DispatchError> {
        self.delivered.lock().push((to, message.clone()));
        Ok(())
    }
}

#[async_trait]
impl LandingPort for Recorder {
    async fn land(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Landing, message)
    }
}

#[async_trait]
impl TransformPort for Recorder {
    async fn transform(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Transform, message)
    }
}

#[async_trait]
impl RouterInboxPort for Recorder {
    async fn receive(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Router, message)
    }
}

#[async_trait]
impl KnowledgeGraphPort for Recorder {
    async fn apply(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::KnowledgeGraph, message)
    }
}

#[async_trait]
impl AlignmentInboxPort for Recorder {
    async fn submit(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Alignment, message)
    }
}

#[async_trait]
impl AgentPort for Recorder {
    async fn execute(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Agents, message)
    }
}

#[async_trait]
impl ProjectionPort for Recorder {
    async fn project(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Projections, message)
    }
}

#[async_trait]
impl FederationPort for Recorder {
    async fn send(&self, message: &Message) -> Result<(), DispatchError> {
        self.record(Subsystem::Federation, message)
    }
}

pub fn ports(recorder: &Arc<Recorder>) -> SubsystemPorts {
    SubsystemPorts {
        landing: recorder.clone(),
        transform: recorder.clone(),
        router: recorder.clone(),
        knowledge_graph: recorder.clone(),
        alignment: recorder.clone(),
        agents: recorder.clone(),
        projections: recorder.clone(),
        federation: recorder.clone(),
    }
}

/// Reviewer returning the same ruling for every request.
pub struct FixedReviewer(pub ReviewResult);

#[async_trait]
impl ReviewCapability for FixedReviewer {
    async fn review(&self, _request: &ReviewRequest) -> ReviewResult {
        self.0.clone()
    }
}

/// Router local to [`NODE`] over `ports`.
pub fn router_over(ports: SubsystemPorts) -> Router {
    let config = RouterConfig {
        local_node_id: NODE.into(),
        ..RouterConfig::default()
    };
    Router::new(config, ports).with_constraints(Arc::new(ConstraintValidator::new(
        ConstraintRules::default().with_local_node(NODE),
    )))
}

/// Router local to [`NODE`], dispatching into `recorder`.
pub fn router(recorder: &Arc<Recorder>) -> Router {
    router_over(ports(recorder))
}

/// [`router`] with every reviewed route answered by `ruling`.
pub fn reviewed_router(recorder: &Arc<Recorder>, ruling: ReviewResult) -> Router {
    router(recorder).with_review(ReviewPolicy::default(), Arc::new(FixedReviewer(ruling)))
}
