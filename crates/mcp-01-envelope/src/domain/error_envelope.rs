//! # Error Envelopes
//!
//! Turns a failure into a signed `MCP.ERROR` response addressed back to the
//! source of the envelope that caused it.

use crate::domain::builder::{build_envelope, EnvelopeParams};
use crate::domain::errors::EnvelopeError;
use crate::ports::outbound::EnvelopeSigner;
use shared_types::{
    Envelope, ErrorContext, Identity, McpError, MessageType, Priority, RiskLevel, RouteHop,
    Safety, Severity, Timestamp, ERROR_PAYLOAD_TYPE,
};

fn risk_for(severity: Severity) -> RiskLevel {
    match severity {
        Severity::Low => RiskLevel::Low,
        Severity::Medium => RiskLevel::Medium,
        Severity::High => RiskLevel::High,
        Severity::Critical => RiskLevel::Critical,
    }
}

/// Parameters of the error response to `original`.
///
/// The route is the original route plus a hop for `emitting`; the context
/// references end with the original envelope id.
pub fn error_envelope_params(
    original: &Envelope,
    emitting: &Identity,
    mut error: McpError,
    now: Timestamp,
) -> Result<EnvelopeParams, EnvelopeError> {
    if error.context.is_none() {
        error.context = Some(ErrorContext::from(emitting));
    }
    let risk = risk_for(error.severity);
    let payload =
        serde_json::to_value(&error).map_err(|e| EnvelopeError::Serialization(e.to_string()))?;

    let mut route = original.provenance.route.clone();
    route.push(RouteHop::from_identity(emitting, now));

    let mut context_refs = original.provenance.context_refs.clone().unwrap_or_default();
    context_refs.push(original.header.envelope_id.clone());

    let mut params = EnvelopeParams::new(
        original.header.layer,
        MessageType::Response,
        emitting.clone(),
        original.header.source.clone(),
        ERROR_PAYLOAD_TYPE,
        payload,
        now,
    );
    params.version = original.header.version.clone();
    params.priority = Some(original.header.priority.unwrap_or(Priority::Normal));
    params.route = route;
    params.context_refs = Some(context_refs);
    params.safety = Safety {
        snapshot_scope: original.safety.snapshot_scope.clone(),
        alignment_flags: None,
        risk_level: Some(risk),
    };
    Ok(params)
}

/// Builds and signs the error response to `original`.
pub async fn build_error_envelope(
    original: &Envelope,
    emitting: &Identity,
    error: McpError,
    now: Timestamp,
    signer: &dyn EnvelopeSigner,
) -> Result<Envelope, EnvelopeError> {
    let params = error_envelope_params(original, emitting, error, now)?;
    build_envelope(&params, signer).await
}
