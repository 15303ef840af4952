//! # Message
//!
//! The policy-bearing form of an envelope used inside the router.
//!
//! A `Message` carries the same semantic content as the wire envelope but is
//! shaped for policy decisions: who is calling, under which session, with
//! which permissions, for which intent.

use crate::entities::{Identity, Intent, RouteHop, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A permission granted to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Resource the permission applies to.
    pub resource: String,
    /// Permitted action.
    pub action: String,
    /// Optional narrowing scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Who sent a message and under which session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContext {
    /// Calling identity.
    pub caller: Identity,
    /// Session the message belongs to.
    pub session_id: String,
    /// Permissions granted to the caller.
    #[serde(default)]
    pub permissions: Vec<Permission>,
    /// Provenance chain, oldest first.
    #[serde(default)]
    pub provenance: Vec<RouteHop>,
    /// Creation time.
    pub timestamp: Timestamp,
}

/// Schema-declared payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    /// Schema identifier.
    pub schema: String,
    /// Schema version.
    pub schema_version: String,
    /// Typed content.
    pub content: Value,
}

impl MessagePayload {
    /// Reads `key` from object content.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.content.as_object()?.get(key)
    }

    /// True iff `key` is present and literally `true`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.field(key), Some(Value::Bool(true)))
    }

    /// True iff `key` is present with any value.
    pub fn has_key(&self, key: &str) -> bool {
        self.field(key).is_some()
    }
}

/// A routed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Caller context.
    pub context: MessageContext,
    /// Purpose of the message.
    pub intent: Intent,
    /// Payload.
    pub payload: MessagePayload,
}

impl Message {
    /// Applies a patch, replacing each section the patch carries.
    #[must_use]
    pub fn patched(mut self, patch: &MessagePatch) -> Self {
        if let Some(context) = &patch.context {
            self.context = context.clone();
        }
        if let Some(intent) = patch.intent {
            self.intent = intent;
        }
        if let Some(payload) = &patch.payload {
            self.payload = payload.clone();
        }
        self
    }
}

/// Partial message used by a judge to rewrite an in-flight message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MessagePatch {
    /// Replacement context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<MessageContext>,
    /// Replacement intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Replacement payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<MessagePayload>,
}

impl MessagePatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.context.is_none() && self.intent.is_none() && self.payload.is_none()
    }
}
