//! # Outbound Ports (Driven Ports / SPI)
//!
//! One delivery interface per destination subsystem. [`SubsystemPorts`]
//! selects the port by `Subsystem` tag with an exhaustive match, so a
//! destination without a port cannot be routed to.

use async_trait::async_trait;
use shared_types::{Message, Subsystem};
use std::sync::Arc;
use thiserror::Error;

/// Delivery failure raised by a destination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The destination refused or failed to process the message.
    #[error("{subsystem} failed: {reason}")]
    Failed {
        /// Destination.
        subsystem: Subsystem,
        /// Reason given by the destination.
        reason: String,
    },

    /// No implementation is attached for the destination.
    #[error("{0} is not wired on this node")]
    Unavailable(Subsystem),
}

impl DispatchError {
    /// Failure raised by `subsystem`.
    pub fn failed(subsystem: Subsystem, reason: impl Into<String>) -> Self {
        DispatchError::Failed {
            subsystem,
            reason: reason.into(),
        }
    }
}

/// Data landing layer.
#[async_trait]
pub trait LandingPort: Send + Sync {
    /// Hands a message to the landing layer.
    async fn land(&self, message: &Message) -> Result<(), DispatchError>;
}

/// Pattern and rule extraction layer.
#[async_trait]
pub trait TransformPort: Send + Sync {
    /// Submits data for extraction.
    async fn transform(&self, message: &Message) -> Result<(), DispatchError>;
}

/// Messages addressed to the router itself.
#[async_trait]
pub trait RouterInboxPort: Send + Sync {
    /// Accepts a message for the router's own inbox.
    async fn receive(&self, message: &Message) -> Result<(), DispatchError>;
}

/// Knowledge-graph store.
#[async_trait]
pub trait KnowledgeGraphPort: Send + Sync {
    /// Applies a query, mutation proposal or proposal to the graph.
    async fn apply(&self, message: &Message) -> Result<(), DispatchError>;
}

/// Alignment authority inbox, for review traffic routed as messages.
#[async_trait]
pub trait AlignmentInboxPort: Send + Sync {
    /// Delivers an analysis or review message.
    async fn submit(&self, message: &Message) -> Result<(), DispatchError>;
}

/// Agent execution.
#[async_trait]
pub trait AgentPort: Send + Sync {
    /// Runs an agent task.
    async fn execute(&self, message: &Message) -> Result<(), DispatchError>;
}

/// Projection and scenario generator.
#[async_trait]
pub trait ProjectionPort: Send + Sync {
    /// Requests a projection.
    async fn project(&self, message: &Message) -> Result<(), DispatchError>;
}

/// Peer nodes.
#[async_trait]
pub trait FederationPort: Send + Sync {
    /// Sends a message to the federation layer.
    async fn send(&self, message: &Message) -> Result<(), DispatchError>;
}

/// The full set of destination ports.
#[derive(Clone)]
pub struct SubsystemPorts {
    /// Landing layer.
    pub landing: Arc<dyn LandingPort>,
    /// Extraction layer.
    pub transform: Arc<dyn TransformPort>,
    /// Router inbox.
    pub router: Arc<dyn RouterInboxPort>,
    /// Knowledge graph.
    pub knowledge_graph: Arc<dyn KnowledgeGraphPort>,
    /// Alignment inbox.
    pub alignment: Arc<dyn AlignmentInboxPort>,
    /// Agents.
    pub agents: Arc<dyn AgentPort>,
    /// Projections.
    pub projections: Arc<dyn ProjectionPort>,
    /// Federation.
    pub federation: Arc<dyn FederationPort>,
}

impl SubsystemPorts {
    /// Delivers `message` to the port for `to`.
    pub async fn dispatch(&self, to: Subsystem, message: &Message) -> Result<(), DispatchError> {
        match to {
            Subsystem::Landing => self.landing.land(message).await,
            Subsystem::Transform => self.transform.transform(message).await,
            Subsystem::Router => self.router.receive(message).await,
            Subsystem::KnowledgeGraph => self.knowledge_graph.apply(message).await,
            Subsystem::Alignment => self.alignment.submit(message).await,
            Subsystem::Agents => self.agents.execute(message).await,
            Subsystem::Projections => self.projections.project(message).await,
            Subsystem::Federation => self.federation.send(message).await,
        }
    }
}
