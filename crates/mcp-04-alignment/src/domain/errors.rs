//! # Domain Errors

use crate::domain::review::AlignmentActor;
use shared_types::{ErrorCode, McpError};
use thiserror::Error;

/// Review outcomes that stop routing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// Judge rejected the message and offered no modification.
    #[error("Message rejected by Alignment: {explanation}")]
    Rejected {
        /// Ruling explanation.
        explanation: String,
    },

    /// Routing halted.
    #[error("Message halted by {actor:?}: {explanation}")]
    Halted {
        /// Issuing role.
        actor: AlignmentActor,
        /// Ruling explanation.
        explanation: String,
    },
}

impl AlignmentError {
    /// Code in the shared error taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            AlignmentError::Rejected { .. } => ErrorCode::JUDGE_REJECTED,
            AlignmentError::Halted { .. } => ErrorCode::MEDIATOR_HALT,
        }
    }

    /// Structured error correlated with the reviewed message.
    pub fn to_mcp_error(&self, correlation_id: &str) -> McpError {
        McpError::new(self.code(), self.to_string(), correlation_id)
    }
}

/// Reasons an agent execution request is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentGuardError {
    /// The caller is not the router module.
    #[error("Agents can only be invoked via MCP")]
    NotViaRouter,

    /// No task scope given.
    #[error("Agent execution must have a defined task scope")]
    MissingTaskScope,

    /// Neither reversible nor constitutional.
    #[error("Agent execution must be reversible unless it's a constitutional change")]
    Irreversible,

    /// Update aimed at the landing layer or the knowledge graph.
    #[error("Agents cannot modify {0} directly")]
    ForbiddenTarget(String),

    /// An agent tried to spawn another agent.
    #[error("Agent {parent} cannot spawn {child} outside MCP control")]
    RecursiveSpawn {
        /// Spawning agent.
        parent: String,
        /// Requested child agent.
        child: String,
    },
}

impl AgentGuardError {
    /// Code in the shared error taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            AgentGuardError::NotViaRouter => ErrorCode::IDENTITY_REJECTED,
            AgentGuardError::MissingTaskScope => ErrorCode::MISSING_CONTENT_FIELD,
            AgentGuardError::Irreversible => ErrorCode::REVERSIBILITY,
            AgentGuardError::ForbiddenTarget(_) => ErrorCode::NON_COERCION,
            AgentGuardError::RecursiveSpawn { .. } => ErrorCode::RECURSIVE_SPAWN,
        }
    }

    /// Structured error correlated with the request.
    pub fn to_mcp_error(&self, correlation_id: &str) -> McpError {
        McpError::new(self.code(), self.to_string(), correlation_id)
    }
}
