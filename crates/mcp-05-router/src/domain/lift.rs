//! # Envelope to Message
//!
//! Inbound envelopes are lifted into the policy-bearing `Message` form
//! before the pipeline runs:
//!
//! | Message field | Envelope source |
//! |---------------|-----------------|
//! | caller | `header.source` |
//! | session id | envelope id |
//! | permissions | one per declared capability |
//! | provenance | `provenance.route` |
//! | schema / version | `body.payloadType` / `header.version` |
//! | content | `body.payload` |

use shared_types::{Envelope, Intent, Message, MessageContext, MessagePayload, Permission};

/// Action granted by a declared capability.
pub const CAPABILITY_ACTION: &str = "use";

/// Lifts `envelope` into a message carrying `intent`.
pub fn lift_envelope(envelope: &Envelope, intent: Intent) -> Message {
    let permissions = envelope
        .header
        .capabilities
        .declared
        .iter()
        .map(|cap| Permission {
            resource: cap.id.clone(),
            action: CAPABILITY_ACTION.to_string(),
            scope: None,
        })
        .collect();

    Message {
        context: MessageContext {
            caller: envelope.header.source.clone(),
            session_id: envelope.id().to_string(),
            permissions,
            provenance: envelope.provenance.route.clone(),
            timestamp: envelope.header.timestamp,
        },
        intent,
        payload: MessagePayload {
            schema: envelope.body.payload_type.clone(),
            schema_version: envelope.header.version.clone(),
            content: envelope.body.payload.clone(),
        },
    }
}
