//! # Proposal Apply Validation
//!
//! A PROPOSAL_APPLY message carries an extracted proposal bound for the
//! knowledge graph. Its content must be an object with a string `type`, a
//! `payload` and a `provenance`. Provenance is only checked for presence.

use serde::Serialize;
use serde_json::Value;
use shared_types::{ErrorCode, Intent, McpError, Message, MessageContext};
use thiserror::Error;

/// A proposal ready for the knowledge-graph apply layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProposal {
    /// Proposal type.
    #[serde(rename = "type")]
    pub proposal_type: String,
    /// Proposal body.
    pub payload: Value,
    /// Provenance, as supplied.
    pub provenance: Value,
    /// Context of the carrying message.
    pub context: MessageContext,
    /// Schema of the carrying message.
    pub schema: String,
    /// Schema version of the carrying message.
    pub schema_version: String,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalIssue {
    /// VALIDATION-class code.
    pub code: ErrorCode,
    /// Description.
    pub message: String,
    /// Offending field.
    pub field: &'static str,
}

impl ProposalIssue {
    fn new(code: ErrorCode, message: impl Into<String>, field: &'static str) -> Self {
        Self {
            code,
            message: message.into(),
            field,
        }
    }
}

/// Every finding for a rejected proposal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Proposal validation failed: {}", join_messages(.issues))]
pub struct ProposalRejection {
    /// Findings, in check order. Never empty.
    pub issues: Vec<ProposalIssue>,
}

fn join_messages(issues: &[ProposalIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ProposalRejection {
    fn single(issue: ProposalIssue) -> Self {
        Self { issues: vec![issue] }
    }

    /// Structured error coded by the first finding, listing all of them.
    pub fn to_mcp_error(&self, correlation_id: &str) -> McpError {
        let code = self
            .issues
            .first()
            .map_or(ErrorCode::MISSING_CONTENT_FIELD, |i| i.code);
        McpError::new(code, self.to_string(), correlation_id)
            .with_details(serde_json::json!({ "issues": self.issues }))
    }
}

/// Validates a PROPOSAL_APPLY message and normalizes its proposal.
pub fn validate_proposal(message: &Message) -> Result<NormalizedProposal, ProposalRejection> {
    if message.intent != Intent::ProposalApply {
        return Err(ProposalRejection::single(ProposalIssue::new(
            ErrorCode::WRONG_INTENT,
            format!(
                "Invalid intent: expected {}, got {}",
                Intent::ProposalApply,
                message.intent
            ),
            "intent",
        )));
    }

    let content = &message.payload.content;
    let Some(fields) = content.as_object() else {
        let mut issues = Vec::new();
        if content.is_null() {
            issues.push(ProposalIssue::new(
                ErrorCode::MISSING_CONTENT_FIELD,
                "Payload content is missing",
                "payload.content",
            ));
        }
        issues.push(ProposalIssue::new(
            ErrorCode::CONTENT_NOT_OBJECT,
            "Payload content must be an object",
            "payload.content",
        ));
        return Err(ProposalRejection { issues });
    };

    let mut issues = Vec::new();
    let proposal_type = fields
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty());
    if proposal_type.is_none() {
        issues.push(ProposalIssue::new(
            ErrorCode::MISSING_CONTENT_FIELD,
            "Proposal missing required 'type' field",
            "type",
        ));
    }
    for field in ["payload", "provenance"] {
        if !fields.contains_key(field) {
            issues.push(ProposalIssue::new(
                ErrorCode::MISSING_CONTENT_FIELD,
                format!("Proposal missing required '{field}' field"),
                field,
            ));
        }
    }
    if !issues.is_empty() {
        return Err(ProposalRejection { issues });
    }

    let provenance = fields.get("provenance").cloned().unwrap_or(Value::Null);
    if provenance.is_null() {
        return Err(ProposalRejection::single(ProposalIssue::new(
            ErrorCode::MISSING_CONTENT_FIELD,
            "Proposal missing required provenance field",
            "provenance",
        )));
    }

    Ok(NormalizedProposal {
        proposal_type: proposal_type.unwrap_or_default().to_string(),
        payload: fields.get("payload").cloned().unwrap_or(Value::Null),
        provenance,
        context: message.context.clone(),
        schema: message.payload.schema.clone(),
        schema_version: message.payload.schema_version.clone(),
    })
}
