//! # Node Runtime
//!
//! Drives envelopes through a wired [`SubsystemContainer`]: build and sign,
//! route, and answer every failure with a signed error envelope addressed
//! back to the sender.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};

use mcp_01_envelope::{EnvelopeApi, EnvelopeParams};
use mcp_05_router::{RouterApi, RoutingResult};
use mcp_06_federation::{handshake_envelope_params, HandshakeRequest};
use mcp_07_log_store::EnvelopeLog;
use shared_types::{Envelope, Identity, Layer, McpError, MessageType, RouteHop, Subsystem};

use crate::container::{NodeConfig, SubsystemContainer, LOOPBACK_PEER_ID};
use crate::wiring::{
    declared_capabilities, AGENT_TASK_PAYLOAD_TYPE, PROPOSAL_PAYLOAD_TYPE, RECORD_PAYLOAD_TYPE,
};

/// One envelope's trip through the node.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// The envelope as sent.
    pub envelope: Envelope,
    /// Router outcome.
    pub result: RoutingResult,
    /// Signed error response, when routing failed.
    pub reply: Option<Envelope>,
}

/// The node runtime.
pub struct NodeRuntime {
    container: Arc<SubsystemContainer>,
}

impl NodeRuntime {
    /// Wires a node from `config`.
    pub fn new(config: NodeConfig) -> Result<Self> {
        Ok(Self::from_container(SubsystemContainer::new(config)?))
    }

    /// Runtime over an existing container.
    pub fn from_container(container: SubsystemContainer) -> Self {
        Self {
            container: Arc::new(container),
        }
    }

    /// The subsystem container.
    pub fn container(&self) -> Arc<SubsystemContainer> {
        Arc::clone(&self.container)
    }

    /// Parameters for an envelope between two subsystems of this node.
    pub fn params(
        &self,
        layer: Layer,
        from: Subsystem,
        to: Subsystem,
        payload_type: &str,
        payload: Value,
    ) -> EnvelopeParams {
        EnvelopeParams::new(
            layer,
            MessageType::Event,
            self.container.identity_of(from),
            self.container.identity_of(to),
            payload_type,
            payload,
            Utc::now(),
        )
    }

    /// Builds, signs and routes an envelope sent by `from`.
    ///
    /// A route without hops gets one for the source, so every envelope
    /// leaves with an audit trail.
    pub async fn submit(&self, mut params: EnvelopeParams, from: Subsystem) -> Result<Delivery> {
        if params.route.is_empty() {
            params
                .route
                .push(RouteHop::from_identity(&params.source, params.timestamp));
        }
        let envelope = self
            .container
            .envelopes
            .build(&params)
            .await
            .context("Failed to build envelope")?;

        let result = self.container.router.route_envelope(&envelope, from).await;
        let reply = match (&result.error, result.success) {
            (Some(error), false) => Some(self.reply_with_error(&envelope, error.clone()).await?),
            _ => None,
        };

        if result.success {
            info!(
                envelope_id = %envelope.id(),
                payload_type = %envelope.body.payload_type,
                index = ?result.receipt.as_ref().map(|r| r.index),
                "[Node] envelope routed"
            );
        } else {
            warn!(
                envelope_id = %envelope.id(),
                payload_type = %envelope.body.payload_type,
                stage = %result.stage,
                halted = result.halted,
                explanation = ?result.explanation(),
                "[Node] envelope not routed"
            );
        }

        Ok(Delivery {
            envelope,
            result,
            reply,
        })
    }

    async fn reply_with_error(
        &self,
        original: &Envelope,
        error: McpError,
    ) -> Result<Envelope> {
        let emitting = self.container.router.identity();
        self.container
            .envelopes
            .error_response(original, &emitting, error, Utc::now())
            .await
            .context("Failed to build error envelope")
    }

    /// Sends one envelope down each wired path, plus one nothing resolves.
    pub async fn run_sample_traffic(&self) -> Result<Vec<Delivery>> {
        let node_id = self.container.config.node_id.clone();
        let mut deliveries = Vec::new();

        // Landed record to extraction.
        deliveries.push(
            self.submit(
                self.params(
                    Layer::Io,
                    Subsystem::Landing,
                    Subsystem::Transform,
                    RECORD_PAYLOAD_TYPE,
                    json!({ "source": "sensor-a", "rows": 3 }),
                ),
                Subsystem::Landing,
            )
            .await?,
        );

        // Extracted proposal to the graph.
        deliveries.push(
            self.submit(
                self.params(
                    Layer::Agent,
                    Subsystem::Router,
                    Subsystem::KnowledgeGraph,
                    PROPOSAL_PAYLOAD_TYPE,
                    json!({
                        "type": "rule",
                        "payload": { "when": "rows > 0", "then": "index" },
                        "provenance": { "extractedBy": "TKD" }
                    }),
                ),
                Subsystem::Router,
            )
            .await?,
        );

        // Handshake with the loopback peer.
        let request = HandshakeRequest {
            requesting_node: Identity::node(node_id.clone()),
            requesting_capabilities: declared_capabilities(&node_id),
            target_node: Identity::node(LOOPBACK_PEER_ID),
        };
        let params = handshake_envelope_params(
            &request,
            self.container.identity_of(Subsystem::Router),
            Utc::now(),
        )?;
        deliveries.push(self.submit(params, Subsystem::Router).await?);

        // Agent task; agents are always reviewed and no reviewer is attached.
        deliveries.push(
            self.submit(
                self.params(
                    Layer::Agent,
                    Subsystem::Router,
                    Subsystem::Agents,
                    AGENT_TASK_PAYLOAD_TYPE,
                    json!({ "taskScope": "summarise", "reversible": true }),
                ),
                Subsystem::Router,
            )
            .await?,
        );

        // Unregistered payload type.
        deliveries.push(
            self.submit(
                self.params(
                    Layer::Io,
                    Subsystem::Landing,
                    Subsystem::Router,
                    "TEST.PING",
                    json!({ "ping": true }),
                ),
                Subsystem::Landing,
            )
            .await?,
        );

        Ok(deliveries)
    }

    /// Re-verifies the log chain before exit.
    pub fn shutdown(&self) -> Result<()> {
        info!("[Node] shutting down");
        self.container
            .log
            .verify()
            .context("Envelope log failed verification at shutdown")?;
        info!(
            entries = self.container.log.len(),
            head = ?self.container.log.head_hash(),
            "[Node] envelope log intact"
        );
        Ok(())
    }
}
