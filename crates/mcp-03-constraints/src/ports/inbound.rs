//! # Inbound Ports (Driving Ports / API)

use crate::domain::violations::ConstraintReport;
use shared_types::{Message, Subsystem};

/// Decides whether a message may travel from `from` to `to`.
///
/// The router depends only on this trait, so a policy engine can replace
/// the built-in predicates without touching routing control flow.
pub trait ConstraintPolicy: Send + Sync {
    /// Evaluates every constraint and reports all violations.
    fn evaluate(&self, message: &Message, from: Subsystem, to: Subsystem) -> ConstraintReport;
}
