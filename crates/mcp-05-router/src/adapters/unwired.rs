//! # Unwired Port
//!
//! Placeholder for destinations a node does not host. Every delivery
//! fails with `DispatchError::Unavailable`.

use crate::ports::outbound::{
    AgentPort, AlignmentInboxPort, DispatchError, FederationPort, KnowledgeGraphPort,
    LandingPort, ProjectionPort, RouterInboxPort, SubsystemPorts, TransformPort,
};
use async_trait::async_trait;
use shared_types::{Message, Subsystem};
use std::sync::Arc;

/// Refuses every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwiredPort;

#[async_trait]
impl LandingPort for UnwiredPort {
    async fn land(&self, _message: &Message) -> Result<(), DispatchError> {
        Err(DispatchError::Unavailable(Subsystem::Landing))
    }
}

#[async_trait]
impl TransformPort for UnwiredPort {
    async fn transform(&self, _message: &Message) -> Result<(), DispatchError> {
        Err(DispatchError::Unavailable(Subsystem::Transform))
    }
}

#[async_trait]
impl RouterInboxPort for UnwiredPort {
    async fn receive(&self, _message: &Message) -> Result<(), DispatchError> {
        Err(DispatchError::Unavailable(Subsystem::Router))
    }
}

#[async_trait]
impl KnowledgeGraphPort for UnwiredPort {
    async fn apply(&self, _message: &Message) -> Result<(), DispatchError> {
        Err(DispatchError::Unavailable(Subsystem::KnowledgeGraph))
    }
}

#[async_trait]
impl AlignmentInboxPort for UnwiredPort {
    async fn submit(&self, _message: &Message) -> Result<(), DispatchError> {
        Err(DispatchError::Unavailable(Subsystem::Alignment))
    }
}

#[async_trait]
impl AgentPort for UnwiredPort {
    async fn execute(&self, _message: &Message) -> Result<(), DispatchError> {
        Err(DispatchError::Unavailable(Subsystem::Agents))
    }
}

#[async_trait]
impl ProjectionPort for UnwiredPort {
    async fn project(&self, _message: &Message) -> Result<(), DispatchError> {
        Err(DispatchError::Unavailable(Subsystem::Projections))
    }
}

#[async_trait]
impl FederationPort for UnwiredPort {
    async fn send(&self, _message: &Message) -> Result<(), DispatchError> {
        Err(DispatchError::Unavailable(Subsystem::Federation))
    }
}

impl Default for SubsystemPorts {
    fn default() -> Self {
        let port = Arc::new(UnwiredPort);
        Self {
            landing: port.clone(),
            transform: port.clone(),
            router: port.clone(),
            knowledge_graph: port.clone(),
            alignment: port.clone(),
            agents: port.clone(),
            projections: port.clone(),
            federation: port,
        }
    }
}
