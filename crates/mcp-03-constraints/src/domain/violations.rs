//! Violation kinds and the validation report.

use serde::{Deserialize, Serialize};
use shared_types::{ErrorCode, McpError};
use std::fmt;

/// A constitutional invariant that a message broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Coerces a node or strips permissions without consent.
    #[serde(rename = "NON_COERCION_VIOLATION")]
    NonCoercion,
    /// An external node tries to override local decisions.
    #[serde(rename = "LOCALITY_VIOLATION")]
    Locality,
    /// A state change that cannot be undone.
    #[serde(rename = "REVERSIBILITY_VIOLATION")]
    Reversibility,
    /// Missing audit trail.
    #[serde(rename = "OBSERVABILITY_VIOLATION")]
    Observability,
}

impl ViolationKind {
    /// Code in the shared error taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            ViolationKind::NonCoercion => ErrorCode::NON_COERCION,
            ViolationKind::Locality => ErrorCode::LOCALITY,
            ViolationKind::Reversibility => ErrorCode::REVERSIBILITY,
            ViolationKind::Observability => ErrorCode::OBSERVABILITY,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            ViolationKind::NonCoercion => "NON_COERCION_VIOLATION",
            ViolationKind::Locality => "LOCALITY_VIOLATION",
            ViolationKind::Reversibility => "REVERSIBILITY_VIOLATION",
            ViolationKind::Observability => "OBSERVABILITY_VIOLATION",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Outcome of evaluating every constraint against one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintReport {
    /// True iff no constraint was violated.
    pub valid: bool,
    /// Every violated constraint, in evaluation order, without duplicates.
    pub violations: Vec<ViolationKind>,
    /// `"Constitutional constraints violated: A, B"` when invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ConstraintReport {
    /// Report over the collected violations.
    pub fn from_violations(mut violations: Vec<ViolationKind>) -> Self {
        let mut seen = Vec::with_capacity(violations.len());
        violations.retain(|v| {
            let fresh = !seen.contains(v);
            seen.push(*v);
            fresh
        });
        let explanation = (!violations.is_empty()).then(|| {
            let kinds: Vec<String> = violations.iter().map(ToString::to_string).collect();
            format!("Constitutional constraints violated: {}", kinds.join(", "))
        });
        Self {
            valid: violations.is_empty(),
            violations,
            explanation,
        }
    }

    /// True if `kind` was violated.
    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations.contains(&kind)
    }

    /// Structured error for an invalid report, coded by its first violation
    /// and listing all of them in `details`. `None` when valid.
    pub fn to_mcp_error(&self, correlation_id: &str) -> Option<McpError> {
        let first = self.violations.first()?;
        let message = self.explanation.clone().unwrap_or_default();
        Some(
            McpError::new(first.code(), message, correlation_id)
                .with_details(serde_json::json!({ "violations": self.violations })),
        )
    }
}
