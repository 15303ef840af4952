//! # Inbound Ports (Driving Ports / API)
//!
//! The envelope operations other subsystems call.

use crate::domain::builder::EnvelopeParams;
use crate::domain::errors::EnvelopeError;
use serde_json::Value;
use shared_types::{Envelope, Identity, McpError, RouteHop, Timestamp};

/// Envelope engine API.
#[async_trait::async_trait]
pub trait EnvelopeApi: Send + Sync {
    /// Build, sign and validate a new envelope.
    async fn build(&self, params: &EnvelopeParams) -> Result<Envelope, EnvelopeError>;

    /// Decode an envelope from JSON and validate it.
    fn accept(&self, raw: &Value) -> Result<Envelope, EnvelopeError>;

    /// Validate an already-decoded envelope.
    fn validate(&self, envelope: &Envelope) -> Result<(), EnvelopeError>;

    /// Forward `envelope` with one more provenance hop.
    async fn forward(&self, envelope: &Envelope, hop: RouteHop) -> Result<Envelope, EnvelopeError>;

    /// Signed error response to `original`.
    async fn error_response(
        &self,
        original: &Envelope,
        emitting: &Identity,
        error: McpError,
        now: Timestamp,
    ) -> Result<Envelope, EnvelopeError>;
}
