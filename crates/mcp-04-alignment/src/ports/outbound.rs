//! # Outbound Ports (Driven Ports / SPI)
//!
//! The alignment authority itself lives outside the transport layer.

use crate::domain::review::{ReviewRequest, ReviewResult};
use async_trait::async_trait;

/// Third-party review of an in-flight message.
///
/// Implementations must answer; a reviewer that cannot decide should
/// return a rejection rather than approve.
#[async_trait]
pub trait ReviewCapability: Send + Sync {
    /// Reviews a message before dispatch.
    async fn review(&self, request: &ReviewRequest) -> ReviewResult;
}
