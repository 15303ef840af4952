//! # Agents Port
//!
//! Runs nothing itself: an execution request is checked against the agent
//! orchestration rules and accepted or refused.

use async_trait::async_trait;
use mcp_04_alignment::{validate_agent_execution, AgentExecutionRequest};
use mcp_05_router::{AgentPort, DispatchError};
use shared_types::{Message, Subsystem};
use tracing::{info, warn};

/// Agent port that enforces the execution guard.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuardedAgents;

#[async_trait]
impl AgentPort for GuardedAgents {
    async fn execute(&self, message: &Message) -> Result<(), DispatchError> {
        let request = AgentExecutionRequest::from_message(message);
        if let Err(err) = validate_agent_execution(&request) {
            warn!(
                agent_id = ?request.agent_id,
                code = %err.code(),
                error = %err,
                "[Agents] execution refused"
            );
            return Err(DispatchError::failed(Subsystem::Agents, err.to_string()));
        }
        info!(
            agent_id = ?request.agent_id,
            task_scope = ?request.task_scope,
            "[Agents] execution accepted"
        );
        Ok(())
    }
}
