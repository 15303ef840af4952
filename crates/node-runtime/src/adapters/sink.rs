//! Accept-and-log port for destinations this node hosts no logic for.

use async_trait::async_trait;
use mcp_05_router::{
    AlignmentInboxPort, DispatchError, LandingPort, ProjectionPort, RouterInboxPort, TransformPort,
};
use shared_types::{Message, Subsystem};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Records each delivery in the trace and counts it.
#[derive(Debug, Default)]
pub struct TracingSink {
    delivered: AtomicU64,
}

impl TracingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages accepted so far.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    fn accept(&self, to: Subsystem, message: &Message) -> Result<(), DispatchError> {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        info!(
            %to,
            intent = %message.intent,
            schema = %message.payload.schema,
            session_id = %message.context.session_id,
            "[Sink] delivered"
        );
        Ok(())
    }
}

#[async_trait]
impl LandingPort for TracingSink {
    async fn land(&self, message: &Message) -> Result<(), DispatchError> {
        self.accept(Subsystem::Landing, message)
    }
}

#[async_trait]
impl TransformPort for TracingSink {
    async fn transform(&self, message: &Message) -> Result<(), DispatchError> {
        self.accept(Subsystem::Transform, message)
    }
}

#[async_trait]
impl RouterInboxPort for TracingSink {
    async fn receive(&self, message: &Message) -> Result<(), DispatchError> {
        self.accept(Subsystem::Router, message)
    }
}

#[async_trait]
impl AlignmentInboxPort for TracingSink {
    async fn submit(&self, message: &Message) -> Result<(), DispatchError> {
        self.accept(Subsystem::Alignment, message)
    }
}

#[async_trait]
impl ProjectionPort for TracingSink {
    async fn project(&self, message: &Message) -> Result<(), DispatchError> {
        self.accept(Subsystem::Projections, message)
    }
}
