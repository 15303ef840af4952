//! # Agent Execution Guard
//!
//! Agents run only when the router asks, on a named task scope, and only
//! reversibly unless the change is constitutional. They never update the
//! landing layer or the knowledge graph and never spawn other agents on
//! their own.

use crate::domain::errors::AgentGuardError;
use serde_json::{Map, Value};
use shared_types::{Intent, Message, MessageContext, MessagePayload, Subsystem};

/// Content targets an agent may not update.
pub const PROTECTED_TARGETS: [&str; 2] = ["LDS", "KG"];

/// Agent execution parameters read from a message.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentExecutionRequest<'a> {
    /// The carrying message.
    pub message: &'a Message,
    /// Agent asked to run.
    pub agent_id: Option<String>,
    /// Task the agent is confined to.
    pub task_scope: Option<String>,
    /// Declared reversible.
    pub reversible: bool,
}

impl<'a> AgentExecutionRequest<'a> {
    /// Reads `taskScope` and `reversible` from the content and the agent
    /// from the caller (falling back to content `agentId`).
    pub fn from_message(message: &'a Message) -> Self {
        let content = &message.payload;
        let agent_id = message.context.caller.agent_id.clone().or_else(|| {
            content
                .field("agentId")
                .and_then(Value::as_str)
                .map(str::to_owned)
        });
        Self {
            message,
            agent_id,
            task_scope: content
                .field("taskScope")
                .and_then(Value::as_str)
                .map(str::to_owned),
            reversible: content.flag("reversible"),
        }
    }
}

/// Checks an agent execution request against the orchestration rules.
pub fn validate_agent_execution(request: &AgentExecutionRequest<'_>) -> Result<(), AgentGuardError> {
    let message = request.message;

    if message.context.caller.module_id.as_deref() != Some(Subsystem::Router.tag()) {
        return Err(AgentGuardError::NotViaRouter);
    }

    let scoped = request
        .task_scope
        .as_deref()
        .is_some_and(|scope| !scope.trim().is_empty());
    if !scoped {
        return Err(AgentGuardError::MissingTaskScope);
    }

    if !request.reversible && !message.payload.flag("constitutional") {
        return Err(AgentGuardError::Irreversible);
    }

    if message.intent == Intent::Update {
        if let Some(target) = message.payload.field("target").and_then(Value::as_str) {
            if PROTECTED_TARGETS.contains(&target) {
                return Err(AgentGuardError::ForbiddenTarget(target.to_owned()));
            }
        }
    }

    Ok(())
}

/// Agents already running may not spawn children outside router control.
pub fn can_spawn_recursively(parent: &MessageContext, _child_agent_id: &str) -> bool {
    parent.caller.agent_id.is_none()
}

/// Same as [`can_spawn_recursively`], as a guard result.
pub fn check_spawn(parent: &MessageContext, child_agent_id: &str) -> Result<(), AgentGuardError> {
    if can_spawn_recursively(parent, child_agent_id) {
        return Ok(());
    }
    Err(AgentGuardError::RecursiveSpawn {
        parent: parent.caller.agent_id.clone().unwrap_or_default(),
        child: child_agent_id.to_owned(),
    })
}

/// Builds an AGENT_EXECUTION message for `agent_id`. The content is the
/// given object plus `taskScope` and `reversible: true`.
pub fn agent_execution_message(
    context: &MessageContext,
    agent_id: &str,
    task_scope: &str,
    content: Value,
    schema: &str,
    schema_version: &str,
) -> Message {
    let mut fields = match content {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    fields.insert("taskScope".into(), Value::String(task_scope.to_owned()));
    fields.insert("reversible".into(), Value::Bool(true));

    let mut context = context.clone();
    context.caller = context.caller.with_agent(agent_id);

    Message {
        context,
        intent: Intent::AgentExecution,
        payload: MessagePayload {
            schema: schema.to_owned(),
            schema_version: schema_version.to_owned(),
            content: Value::Object(fields),
        },
    }
}
