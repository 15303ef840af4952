//! # Fail-Closed Reviewer
//!
//! Stand-in reviewer used until an alignment authority is attached. Every
//! review it receives is rejected by the judge.

use crate::domain::review::{ReviewRequest, ReviewResult};
use crate::ports::outbound::ReviewCapability;
use async_trait::async_trait;
use tracing::debug;

/// Ruling text returned for every review.
pub const PENDING_REVIEW: &str = "Pending alignment review";

/// Rejects everything it is asked to review.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailClosedReviewer;

#[async_trait]
impl ReviewCapability for FailClosedReviewer {
    async fn review(&self, request: &ReviewRequest) -> ReviewResult {
        debug!(
            from = %request.from,
            to = %request.to,
            intent = %request.message.intent,
            "[Alignment] no reviewer attached, rejecting"
        );
        ReviewResult::reject(PENDING_REVIEW).with_ruling(PENDING_REVIEW)
    }
}
