//! # Domain Errors

use serde::Serialize;
use shared_types::{ErrorCode, McpError};
use std::fmt;
use thiserror::Error;

/// Which side of a handshake an identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeRole {
    /// The node asking to federate.
    Requesting,
    /// The node being asked.
    Target,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Requesting => f.write_str("Requesting"),
            NodeRole::Target => f.write_str("Target"),
        }
    }
}

/// Why a node identity was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityRejection {
    /// No node id.
    #[error("Node identity must include nodeId")]
    MissingNodeId,
    /// The reserved local id presented as a peer.
    #[error("Node identity 'local' is reserved")]
    ReservedLocal,
}

/// Handshake failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FederationError {
    /// A node identity failed verification.
    #[error("{role} node identity verification failed: {reason}")]
    IdentityRejected {
        /// Side that failed.
        role: NodeRole,
        /// What was wrong.
        reason: IdentityRejection,
    },

    /// A side does not submit to alignment review.
    #[error("Alignment compatibility required for federation")]
    AlignmentIncompatible,

    /// A side declared no autonomy.
    #[error("Both nodes must maintain autonomy for federation")]
    AutonomySurrendered,

    /// The supported intent sets do not intersect.
    #[error("No common supported intents for federation")]
    NoCommonIntents,

    /// A handshake could not be encoded.
    #[error("Handshake serialization failed: {0}")]
    Serialization(String),
}

impl FederationError {
    /// True when the failure is an identity problem rather than a mismatch.
    pub fn is_identity(&self) -> bool {
        matches!(self, FederationError::IdentityRejected { .. })
    }

    /// Code in the shared error taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            FederationError::IdentityRejected { .. } => ErrorCode::IDENTITY_REJECTED,
            FederationError::AlignmentIncompatible
            | FederationError::AutonomySurrendered
            | FederationError::NoCommonIntents => ErrorCode::FEDERATION_INCOMPATIBLE,
            FederationError::Serialization(_) => ErrorCode::SERIALIZATION_FAILED,
        }
    }

    /// Structured error correlated with the handshake.
    pub fn to_mcp_error(&self, correlation_id: &str) -> McpError {
        McpError::new(self.code(), self.to_string(), correlation_id)
    }
}
