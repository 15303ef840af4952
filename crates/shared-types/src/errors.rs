//! # Error Taxonomy
//!
//! The cross-subsystem error classes, their codes, severities and retry
//! guidance. Every subsystem maps its domain errors into an [`McpError`].

use crate::entities::{Identity, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// CLASSES
// =============================================================================

/// Error class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Delivery or serialization failure.
    #[serde(rename = "ERROR.TRANSPORT")]
    Transport,
    /// Structural or schema failure.
    #[serde(rename = "ERROR.VALIDATION")]
    Validation,
    /// Signature or identity failure.
    #[serde(rename = "ERROR.AUTH")]
    Auth,
    /// Safety-layer breach.
    #[serde(rename = "ERROR.SAFETY")]
    Safety,
    /// Illegal route or no route.
    #[serde(rename = "ERROR.ROUTING")]
    Routing,
    /// Judge rejection or mediator halt.
    #[serde(rename = "ERROR.ALIGNMENT")]
    Alignment,
    /// Constitutional constraint violation.
    #[serde(rename = "ERROR.CONSTITUTIONAL")]
    Constitutional,
    /// Unexpected dispatch or store failure.
    #[serde(rename = "ERROR.INTERNAL")]
    Internal,
}

impl ErrorClass {
    /// Code prefix, e.g. `"ROUTING"`.
    pub fn prefix(&self) -> &'static str {
        match self {
            ErrorClass::Transport => "TRANSPORT",
            ErrorClass::Validation => "VALIDATION",
            ErrorClass::Auth => "AUTH",
            ErrorClass::Safety => "SAFETY",
            ErrorClass::Routing => "ROUTING",
            ErrorClass::Alignment => "ALIGNMENT",
            ErrorClass::Constitutional => "CONSTITUTIONAL",
            ErrorClass::Internal => "INTERNAL",
        }
    }

    /// Inclusive range of code numbers owned by the class.
    pub fn code_range(&self) -> (u16, u16) {
        match self {
            ErrorClass::Transport => (1001, 1005),
            ErrorClass::Validation => (2001, 2005),
            ErrorClass::Auth => (3001, 3005),
            ErrorClass::Safety => (4001, 4005),
            ErrorClass::Routing => (5001, 5004),
            ErrorClass::Alignment => (6001, 6004),
            ErrorClass::Constitutional => (7001, 7004),
            ErrorClass::Internal => (8001, 8005),
        }
    }

    /// First code of the class.
    pub fn default_code(&self) -> ErrorCode {
        ErrorCode {
            class: *self,
            number: self.code_range().0,
        }
    }

    /// Default severity.
    pub fn default_severity(&self) -> Severity {
        match self {
            ErrorClass::Validation => Severity::Low,
            ErrorClass::Transport | ErrorClass::Routing => Severity::Medium,
            ErrorClass::Auth | ErrorClass::Alignment | ErrorClass::Internal => Severity::High,
            ErrorClass::Safety | ErrorClass::Constitutional => Severity::Critical,
        }
    }

    /// Default retry guidance.
    pub fn default_retry(&self) -> RetryPolicy {
        match self {
            ErrorClass::Transport => RetryPolicy::retry_after(5, 3, BackoffStrategy::Exponential),
            ErrorClass::Routing => RetryPolicy::retry_after(2, 2, BackoffStrategy::Fixed),
            ErrorClass::Internal => RetryPolicy::retry_after(10, 1, BackoffStrategy::Fixed),
            _ => RetryPolicy::no_retry(),
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        [
            ErrorClass::Transport,
            ErrorClass::Validation,
            ErrorClass::Auth,
            ErrorClass::Safety,
            ErrorClass::Routing,
            ErrorClass::Alignment,
            ErrorClass::Constitutional,
            ErrorClass::Internal,
        ]
        .into_iter()
        .find(|c| c.prefix() == prefix)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR.{}", self.prefix())
    }
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Caller mistake.
    Low,
    /// Transient.
    Medium,
    /// Needs attention.
    High,
    /// Integrity or safety at stake.
    Critical,
}

// =============================================================================
// RETRY GUIDANCE
// =============================================================================

/// Backoff between retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffStrategy {
    /// Constant delay.
    Fixed,
    /// Delay doubles per attempt.
    Exponential,
}

/// Structured retry guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    /// Whether retrying can succeed.
    pub retryable: bool,
    /// Seconds before the first retry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    /// Maximum attempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    /// Backoff shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_strategy: Option<BackoffStrategy>,
}

impl RetryPolicy {
    /// Not retryable.
    pub fn no_retry() -> Self {
        Self {
            retryable: false,
            retry_after: None,
            max_retries: None,
            backoff_strategy: None,
        }
    }

    /// Retryable with the given delay, attempt cap and backoff.
    pub fn retry_after(seconds: u64, max_retries: u32, backoff: BackoffStrategy) -> Self {
        Self {
            retryable: true,
            retry_after: Some(seconds),
            max_retries: Some(max_retries),
            backoff_strategy: Some(backoff),
        }
    }

    /// Delay before retry `attempt` (zero-based), or `None` once exhausted.
    pub fn delay_for(&self, attempt: u32) -> Option<u64> {
        if !self.retryable || attempt >= self.max_retries.unwrap_or(0) {
            return None;
        }
        let base = self.retry_after.unwrap_or(0);
        match self.backoff_strategy.unwrap_or(BackoffStrategy::Fixed) {
            BackoffStrategy::Fixed => Some(base),
            BackoffStrategy::Exponential => Some(base.saturating_mul(1u64 << attempt.min(32))),
        }
    }
}

// =============================================================================
// CODES
// =============================================================================

/// Returned when a code does not belong to the class it was paired with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error code {code} does not match error class {class}")]
pub struct InvalidErrorCode {
    /// Offending code as written.
    pub code: String,
    /// Class it was paired with.
    pub class: ErrorClass,
}

/// A `<CLASS>_<nnnn>` error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ErrorCode {
    class: ErrorClass,
    number: u16,
}

impl ErrorCode {
    /// Envelope failed to serialize or deserialize.
    pub const SERIALIZATION_FAILED: ErrorCode = ErrorCode::known(ErrorClass::Transport, 1001);
    /// A required envelope section or field is missing or empty.
    pub const MISSING_FIELD: ErrorCode = ErrorCode::known(ErrorClass::Validation, 2001);
    /// A required payload content field is missing.
    pub const MISSING_CONTENT_FIELD: ErrorCode = ErrorCode::known(ErrorClass::Validation, 2002);
    /// The message carries the wrong intent for its handler.
    pub const WRONG_INTENT: ErrorCode = ErrorCode::known(ErrorClass::Validation, 2003);
    /// The payload content is not an object.
    pub const CONTENT_NOT_OBJECT: ErrorCode = ErrorCode::known(ErrorClass::Validation, 2004);
    /// Unsupported protocol version.
    pub const UNSUPPORTED_VERSION: ErrorCode = ErrorCode::known(ErrorClass::Validation, 2005);
    /// Identity rejected.
    pub const IDENTITY_REJECTED: ErrorCode = ErrorCode::known(ErrorClass::Auth, 3001);
    /// Stored hash does not match content.
    pub const HASH_MISMATCH: ErrorCode = ErrorCode::known(ErrorClass::Auth, 3002);
    /// Signature does not verify.
    pub const SIGNATURE_INVALID: ErrorCode = ErrorCode::known(ErrorClass::Auth, 3003);
    /// A required capability is not declared.
    pub const CAPABILITY_MISSING: ErrorCode = ErrorCode::known(ErrorClass::Auth, 3004);
    /// Signing failed.
    pub const SIGNING_FAILED: ErrorCode = ErrorCode::known(ErrorClass::Auth, 3005);
    /// An agent tried to spawn another agent outside router control.
    pub const RECURSIVE_SPAWN: ErrorCode = ErrorCode::known(ErrorClass::Safety, 4001);
    /// No route registered for a layer and payload type.
    pub const NO_ROUTE: ErrorCode = ErrorCode::known(ErrorClass::Routing, 5001);
    /// Route not present in the legal routing table.
    pub const ILLEGAL_ROUTE: ErrorCode = ErrorCode::known(ErrorClass::Routing, 5002);
    /// Peers cannot federate.
    pub const FEDERATION_INCOMPATIBLE: ErrorCode = ErrorCode::known(ErrorClass::Routing, 5003);
    /// Destination raised during dispatch.
    pub const DISPATCH_FAILED: ErrorCode = ErrorCode::known(ErrorClass::Routing, 5004);
    /// Judge rejected without modifications.
    pub const JUDGE_REJECTED: ErrorCode = ErrorCode::known(ErrorClass::Alignment, 6001);
    /// Mediator halted routing.
    pub const MEDIATOR_HALT: ErrorCode = ErrorCode::known(ErrorClass::Alignment, 6002);
    /// Non-coercion violated.
    pub const NON_COERCION: ErrorCode = ErrorCode::known(ErrorClass::Constitutional, 7001);
    /// Locality violated.
    pub const LOCALITY: ErrorCode = ErrorCode::known(ErrorClass::Constitutional, 7002);
    /// Reversibility violated.
    pub const REVERSIBILITY: ErrorCode = ErrorCode::known(ErrorClass::Constitutional, 7003);
    /// Observability violated.
    pub const OBSERVABILITY: ErrorCode = ErrorCode::known(ErrorClass::Constitutional, 7004);
    /// Log store integrity fault.
    pub const LOG_INTEGRITY: ErrorCode = ErrorCode::known(ErrorClass::Internal, 8001);
    /// Log store persistence failure.
    pub const LOG_PERSISTENCE: ErrorCode = ErrorCode::known(ErrorClass::Internal, 8002);

    const fn known(class: ErrorClass, number: u16) -> Self {
        Self { class, number }
    }

    /// Pairs `number` with `class`, rejecting numbers outside the class range.
    pub fn new(class: ErrorClass, number: u16) -> Result<Self, InvalidErrorCode> {
        let (lo, hi) = class.code_range();
        if (lo..=hi).contains(&number) {
            Ok(Self { class, number })
        } else {
            Err(InvalidErrorCode {
                code: format!("{}_{}", class.prefix(), number),
                class,
            })
        }
    }

    /// Owning class.
    pub fn class(&self) -> ErrorClass {
        self.class
    }

    /// Numeric part.
    pub fn number(&self) -> u16 {
        self.number
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.class.prefix(), self.number)
    }
}

impl FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, number) = s
            .rsplit_once('_')
            .ok_or_else(|| format!("malformed error code: {s}"))?;
        let class =
            ErrorClass::from_prefix(prefix).ok_or_else(|| format!("unknown error class: {s}"))?;
        let number = number
            .parse::<u16>()
            .map_err(|_| format!("malformed error code: {s}"))?;
        ErrorCode::new(class, number).map_err(|e| e.to_string())
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.to_string()
    }
}

// =============================================================================
// ERROR BODY
// =============================================================================

/// Which module or agent emitted an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    /// Emitting module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    /// Emitting agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl From<&Identity> for ErrorContext {
    fn from(identity: &Identity) -> Self {
        Self {
            module_id: identity.module_id.clone(),
            agent_id: identity.agent_id.clone(),
        }
    }
}

/// The error that caused this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCause {
    /// Code of the underlying error.
    pub error_code: ErrorCode,
    /// Message of the underlying error.
    pub message: String,
}

/// Structured, serialisable transport error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{error_code}: {message}")]
pub struct McpError {
    /// Error class.
    pub error_class: ErrorClass,
    /// Code within the class.
    pub error_code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Identifier of the envelope or message that failed.
    pub correlation_id: String,
    /// Severity.
    pub severity: Severity,
    /// When the error was raised.
    pub timestamp: Timestamp,
    /// Arbitrary structured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Emitting module or agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// Retry guidance.
    pub retry: RetryPolicy,
    /// Underlying error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<ErrorCause>,
}

impl McpError {
    /// Error with the class defaults for severity and retry guidance.
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        correlation_id: impl Into<String>,
    ) -> Self {
        let class = code.class();
        Self {
            error_class: class,
            error_code: code,
            message: message.into(),
            correlation_id: correlation_id.into(),
            severity: class.default_severity(),
            timestamp: chrono::Utc::now(),
            details: None,
            context: None,
            retry: class.default_retry(),
            cause: None,
        }
    }

    /// Attaches structured details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attaches the emitting context.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Attaches the underlying error.
    #[must_use]
    pub fn with_cause(mut self, cause: &McpError) -> Self {
        self.cause = Some(ErrorCause {
            error_code: cause.error_code,
            message: cause.message.clone(),
        });
        self
    }

    /// Overrides severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether a caller may retry.
    pub fn is_retryable(&self) -> bool {
        self.retry.retryable
    }
}
