//! # Ruling Interpretation
//!
//! Precedence, first match wins:
//!
//! 1. `halt` set: halted, whatever the actor or modifications
//! 2. `approved`: proceed with the message unchanged
//! 3. non-empty `modifications`: proceed with the patched message
//! 4. otherwise: rejected

use crate::domain::errors::AlignmentError;
use crate::domain::review::{AlignmentActor, ReviewResult};
use shared_types::Message;

/// What the router does after a review.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewDecision {
    /// Dispatch the original message.
    Proceed(Message),
    /// Dispatch the judge-modified message.
    Modified(Message),
    /// A halt was issued; routing stops.
    Halted(AlignmentError),
    /// The judge rejected without modifications; routing stops.
    Rejected(AlignmentError),
}

impl ReviewDecision {
    /// Message to dispatch, if routing continues.
    pub fn message(&self) -> Option<&Message> {
        match self {
            ReviewDecision::Proceed(m) | ReviewDecision::Modified(m) => Some(m),
            ReviewDecision::Halted(_) | ReviewDecision::Rejected(_) => None,
        }
    }

    /// True if routing stops.
    pub fn is_terminal(&self) -> bool {
        self.message().is_none()
    }
}

/// True when the ruling is a mediator halt.
pub fn is_mediator_halted(result: &ReviewResult) -> bool {
    result.actor == AlignmentActor::Mediator && result.halt
}

/// Applies a judge's modifications. Approved rulings leave the message
/// untouched.
pub fn apply_judge_ruling(message: Message, result: &ReviewResult) -> Message {
    match &result.modifications {
        Some(patch) if !result.approved => message.patched(patch),
        _ => message,
    }
}

/// Interprets a ruling for `message`.
pub fn interpret_ruling(message: Message, result: &ReviewResult) -> ReviewDecision {
    if result.halt {
        return ReviewDecision::Halted(AlignmentError::Halted {
            actor: result.actor,
            explanation: result.explanation.clone(),
        });
    }
    if result.approved {
        return ReviewDecision::Proceed(message);
    }
    match &result.modifications {
        Some(patch) if !patch.is_empty() => ReviewDecision::Modified(apply_judge_ruling(message, result)),
        _ => ReviewDecision::Rejected(AlignmentError::Rejected {
            explanation: result.explanation.clone(),
        }),
    }
}
