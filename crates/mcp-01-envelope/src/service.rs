//! # Envelope Service
//!
//! Application service implementing [`EnvelopeApi`] over a signing
//! capability and an optional verification capability.

use crate::domain::builder::{append_hop, build_envelope, EnvelopeParams};
use crate::domain::error_envelope::build_error_envelope;
use crate::domain::errors::EnvelopeError;
use crate::domain::validation::{parse_envelope, validate_envelope};
use crate::ports::inbound::EnvelopeApi;
use crate::ports::outbound::{EnvelopeSigner, EnvelopeVerifier};
use serde_json::Value;
use shared_types::{Envelope, Identity, McpError, RouteHop, Timestamp};
use std::sync::Arc;
use tracing::{debug, warn};

/// Envelope engine.
///
/// Without a verifier only the content hash is checked on validation.
pub struct EnvelopeService {
    signer: Arc<dyn EnvelopeSigner>,
    verifier: Option<Arc<dyn EnvelopeVerifier>>,
}

impl EnvelopeService {
    /// Service that signs with `signer` and verifies with `verifier`.
    pub fn new(signer: Arc<dyn EnvelopeSigner>, verifier: Option<Arc<dyn EnvelopeVerifier>>) -> Self {
        Self { signer, verifier }
    }

    /// The configured verifier.
    pub fn verifier(&self) -> Option<&dyn EnvelopeVerifier> {
        self.verifier.as_deref()
    }
}

#[async_trait::async_trait]
impl EnvelopeApi for EnvelopeService {
    async fn build(&self, params: &EnvelopeParams) -> Result<Envelope, EnvelopeError> {
        let envelope = build_envelope(params, self.signer.as_ref()).await?;
        debug!(
            envelope_id = %envelope.id(),
            payload_type = %envelope.body.payload_type,
            "[Envelope] built"
        );
        Ok(envelope)
    }

    fn accept(&self, raw: &Value) -> Result<Envelope, EnvelopeError> {
        let envelope = parse_envelope(raw)?;
        self.validate(&envelope)?;
        Ok(envelope)
    }

    fn validate(&self, envelope: &Envelope) -> Result<(), EnvelopeError> {
        validate_envelope(envelope, self.verifier()).inspect_err(|e| {
            warn!(envelope_id = %envelope.id(), error = %e, "[Envelope] rejected");
        })
    }

    async fn forward(&self, envelope: &Envelope, hop: RouteHop) -> Result<Envelope, EnvelopeError> {
        append_hop(envelope, hop, self.signer.as_ref()).await
    }

    async fn error_response(
        &self,
        original: &Envelope,
        emitting: &Identity,
        error: McpError,
        now: Timestamp,
    ) -> Result<Envelope, EnvelopeError> {
        build_error_envelope(original, emitting, error, now, self.signer.as_ref()).await
    }
}
