//! # Alignment Gate
//!
//! Applies the review policy and forwards guarded messages to the
//! configured review capability.

use crate::domain::policy::ReviewPolicy;
use crate::domain::review::{ReviewRequest, ReviewResult};
use crate::domain::ruling::{interpret_ruling, ReviewDecision};
use crate::ports::outbound::ReviewCapability;
use shared_types::{Message, Subsystem};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of passing a message through the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    /// The ruling, or a pass marker when no review was needed.
    pub result: ReviewResult,
    /// What routing does next.
    pub decision: ReviewDecision,
}

/// Review gate in front of dispatch.
pub struct AlignmentGate {
    policy: ReviewPolicy,
    reviewer: Arc<dyn ReviewCapability>,
}

impl AlignmentGate {
    /// Gate enforcing `policy` with `reviewer`.
    pub fn new(policy: ReviewPolicy, reviewer: Arc<dyn ReviewCapability>) -> Self {
        Self { policy, reviewer }
    }

    /// The active policy.
    pub fn policy(&self) -> &ReviewPolicy {
        &self.policy
    }

    /// Reviews `message` if the policy requires it.
    pub async fn check(&self, message: Message, from: Subsystem, to: Subsystem) -> GateOutcome {
        if !self.policy.requires_review(from, to, message.intent) {
            debug!(%from, %to, intent = %message.intent, "[Alignment] review not required");
            return GateOutcome {
                result: ReviewResult::pass("Alignment review not required"),
                decision: ReviewDecision::Proceed(message),
            };
        }

        let request = ReviewRequest { message, from, to };
        let result = self.reviewer.review(&request).await;
        let decision = interpret_ruling(request.message, &result);

        match &decision {
            ReviewDecision::Proceed(_) => {
                info!(%from, %to, actor = ?result.actor, "[Alignment] approved")
            }
            ReviewDecision::Modified(_) => {
                info!(%from, %to, explanation = %result.explanation, "[Alignment] modified by judge")
            }
            ReviewDecision::Halted(e) | ReviewDecision::Rejected(e) => {
                warn!(%from, %to, error = %e, "[Alignment] routing stopped")
            }
        }

        GateOutcome { result, decision }
    }
}
