//! # Inbound Ports (Driving Ports / API)

use crate::domain::result::RoutingResult;
use async_trait::async_trait;
use shared_types::{Envelope, Message, Subsystem};

/// Routing entry points.
#[async_trait]
pub trait RouterApi: Send + Sync {
    /// Runs `ROUTE_CHECK → CONSTRAINT_CHECK → ALIGNMENT_REVIEW → DISPATCH`
    /// for a message travelling from `from` to `to`.
    async fn route_message(&self, message: Message, from: Subsystem, to: Subsystem) -> RoutingResult;

    /// Validates an inbound envelope, resolves its destination, routes the
    /// lifted message and logs the envelope on success.
    async fn route_envelope(&self, envelope: &Envelope, from: Subsystem) -> RoutingResult;
}
