//! # Domain Errors

use shared_types::{ErrorCode, Intent, Layer, McpError, Subsystem};
use thiserror::Error;

/// Routing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The (from, to, intent) triple is not in the legal routing table.
    #[error("Illegal route: {from} → {to} with intent {intent}")]
    IllegalRoute {
        /// Source subsystem.
        from: Subsystem,
        /// Destination subsystem.
        to: Subsystem,
        /// Message intent.
        intent: Intent,
    },

    /// No destination registered for an envelope's layer and payload type.
    #[error("Router: no route for layer={layer} payload={payload_type}")]
    NoRoute {
        /// Envelope layer.
        layer: Layer,
        /// Envelope payload type.
        payload_type: String,
    },
}

impl RoutingError {
    /// Code in the shared error taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            RoutingError::IllegalRoute { .. } => ErrorCode::ILLEGAL_ROUTE,
            RoutingError::NoRoute { .. } => ErrorCode::NO_ROUTE,
        }
    }

    /// Structured error correlated with the failing message.
    pub fn to_mcp_error(&self, correlation_id: &str) -> McpError {
        McpError::new(self.code(), self.to_string(), correlation_id)
    }
}
