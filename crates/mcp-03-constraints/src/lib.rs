//! # Constitutional Constraints (mcp-03)
//!
//! Four independent predicates every routed message must satisfy.
//!
//! | Constraint | Violated when |
//! |------------|---------------|
//! | Non-coercion | `force: true` aimed at the router, or `reducePermissions: true` on an update |
//! | Locality | An external caller sends `override` to the router or alignment on an update |
//! | Reversibility | A state-changing intent is neither `reversible: true` nor `constitutional: true` |
//! | Observability | Empty provenance, caller node, session, schema or schema version |
//!
//! Key names, guarded destinations and the local node id live in
//! [`ConstraintRules`], which deserialises from JSON.

#![warn(missing_docs)]

pub mod domain;
pub mod ports;

pub use domain::errors::ConstraintError;
pub use domain::rules::{ConstraintRules, LocalityRule, NonCoercionRule, ReversibilityRule};
pub use domain::validator::ConstraintValidator;
pub use domain::violations::{ConstraintReport, ViolationKind};
pub use ports::inbound::ConstraintPolicy;
