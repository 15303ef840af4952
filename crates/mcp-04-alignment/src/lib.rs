//! # Alignment Integration (mcp-04)
//!
//! Decides which messages need third-party review, interprets the rulings,
//! and guards agent execution requests.
//!
//! ## Review Roles
//!
//! | Actor | Meaning |
//! |-------|---------|
//! | Actor | Pass marker; no review was needed |
//! | Judge | Approves, rejects, or rejects with a patch that is applied |
//! | Mediator | May set `halt`, which always stops routing |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - review model, policy, ruling interpretation, agent guard
//! - `ports/` - `ReviewCapability` outbound
//! - `adapters/` - fail-closed reviewer
//! - `service.rs` - `AlignmentGate`

#![warn(missing_docs)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::FailClosedReviewer;
pub use domain::agents::{
    agent_execution_message, can_spawn_recursively, check_spawn, validate_agent_execution,
    AgentExecutionRequest, PROTECTED_TARGETS,
};
pub use domain::errors::{AgentGuardError, AlignmentError};
pub use domain::policy::ReviewPolicy;
pub use domain::review::{AlignmentActor, ReviewRequest, ReviewResult};
pub use domain::ruling::{apply_judge_ruling, interpret_ruling, is_mediator_halted, ReviewDecision};
pub use ports::outbound::ReviewCapability;
pub use service::{AlignmentGate, GateOutcome};
