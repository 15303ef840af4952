//! # Review Model
//!
//! The request forwarded to the alignment authority and the ruling it
//! returns.

use serde::{Deserialize, Serialize};
use shared_types::{Message, MessagePatch, Subsystem};

/// Which role issued a ruling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlignmentActor {
    /// No review was needed; a pass marker.
    Actor,
    /// Adjudicates: approve, reject, or approve with modifications.
    Judge,
    /// May halt routing unconditionally.
    Mediator,
}

/// A message awaiting review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// The in-flight message.
    pub message: Message,
    /// Source subsystem.
    pub from: Subsystem,
    /// Destination subsystem.
    pub to: Subsystem,
}

/// Ruling returned by a review capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    /// Whether the message may proceed unchanged.
    pub approved: bool,
    /// Issuing role.
    pub actor: AlignmentActor,
    /// Free-form ruling text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruling: Option<String>,
    /// Patch to apply before dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifications: Option<MessagePatch>,
    /// Unconditional stop.
    #[serde(default)]
    pub halt: bool,
    /// Why the ruling was made.
    pub explanation: String,
}

impl ReviewResult {
    /// Pass marker for messages that need no review.
    pub fn pass(explanation: impl Into<String>) -> Self {
        Self {
            approved: true,
            actor: AlignmentActor::Actor,
            ruling: None,
            modifications: None,
            halt: false,
            explanation: explanation.into(),
        }
    }

    /// Judge approval.
    pub fn approve(explanation: impl Into<String>) -> Self {
        Self {
            approved: true,
            actor: AlignmentActor::Judge,
            ..Self::pass(explanation)
        }
    }

    /// Judge rejection without modifications.
    pub fn reject(explanation: impl Into<String>) -> Self {
        Self {
            approved: false,
            actor: AlignmentActor::Judge,
            ..Self::pass(explanation)
        }
    }

    /// Judge rejection carrying a patch that makes the message acceptable.
    pub fn modify(patch: MessagePatch, explanation: impl Into<String>) -> Self {
        Self {
            modifications: Some(patch),
            ..Self::reject(explanation)
        }
    }

    /// Mediator halt.
    pub fn halt(explanation: impl Into<String>) -> Self {
        Self {
            approved: false,
            actor: AlignmentActor::Mediator,
            halt: true,
            ..Self::pass(explanation)
        }
    }

    /// Adds ruling text.
    #[must_use]
    pub fn with_ruling(mut self, ruling: impl Into<String>) -> Self {
        self.ruling = Some(ruling.into());
        self
    }
}
