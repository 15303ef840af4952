//! # Routing Results

use mcp_03_constraints::ConstraintReport;
use mcp_04_alignment::ReviewResult;
use mcp_07_log_store::AppendReceipt;
use serde::Serialize;
use shared_types::{McpError, Message};
use std::fmt;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouterStage {
    /// Envelope validation, capability check and route resolution.
    Ingress,
    /// Legal route table lookup.
    RouteCheck,
    /// Constitutional constraints.
    ConstraintCheck,
    /// Review by the alignment authority, when required.
    AlignmentReview,
    /// Delivery to the destination port.
    Dispatch,
    /// Append to the envelope log.
    Logging,
    /// Every stage passed.
    Complete,
}

impl fmt::Display for RouterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouterStage::Ingress => "INGRESS",
            RouterStage::RouteCheck => "ROUTE_CHECK",
            RouterStage::ConstraintCheck => "CONSTRAINT_CHECK",
            RouterStage::AlignmentReview => "ALIGNMENT_REVIEW",
            RouterStage::Dispatch => "DISPATCH",
            RouterStage::Logging => "LOGGING",
            RouterStage::Complete => "COMPLETE",
        };
        f.write_str(name)
    }
}

/// Outcome of routing one message or envelope.
///
/// `halted` marks a policy stop (constraints or alignment); an illegal
/// route or a failed dispatch is a failure without a halt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingResult {
    /// Every stage passed.
    pub success: bool,
    /// The destination port accepted the message.
    pub routed: bool,
    /// Stopped by policy.
    pub halted: bool,
    /// Stage reached: where the pipeline stopped, or `Complete`.
    pub stage: RouterStage,
    /// Failure detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
    /// Constraint evaluation, once that stage ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ConstraintReport>,
    /// Review ruling, once that stage ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<ReviewResult>,
    /// The message handed to dispatch, after any judge modification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Log position of the routed envelope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<AppendReceipt>,
}

impl RoutingResult {
    pub(crate) fn failed(stage: RouterStage, error: McpError) -> Self {
        Self {
            success: false,
            routed: false,
            halted: false,
            stage,
            error: Some(error),
            constraints: None,
            alignment: None,
            message: None,
            receipt: None,
        }
    }

    pub(crate) fn halted(stage: RouterStage, error: McpError) -> Self {
        Self {
            halted: true,
            ..Self::failed(stage, error)
        }
    }

    pub(crate) fn routed(message: Message) -> Self {
        Self {
            success: true,
            routed: true,
            halted: false,
            stage: RouterStage::Complete,
            error: None,
            constraints: None,
            alignment: None,
            message: Some(message),
            receipt: None,
        }
    }

    pub(crate) fn with_constraints(mut self, report: ConstraintReport) -> Self {
        self.constraints = Some(report);
        self
    }

    pub(crate) fn with_alignment(mut self, result: Option<ReviewResult>) -> Self {
        self.alignment = result;
        self
    }

    /// Error text, if any.
    pub fn explanation(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}
