//! # Constitutional Router (mcp-05)
//!
//! Orchestrates the checks every cross-subsystem message passes before it
//! reaches its destination.
//!
//! ## Pipeline
//!
//! | Stage | Failure | Halted |
//! |-------|---------|--------|
//! | Ingress (envelopes) | validation, capability or `ROUTING_5001` error | no |
//! | Route check | `ROUTING_5002` | no |
//! | Constraint check | `CONSTITUTIONAL_7xxx`, all violations listed | yes |
//! | Alignment review | `ALIGNMENT_6001` rejection, `ALIGNMENT_6002` halt | yes |
//! | Dispatch | `ROUTING_5004` | no |
//! | Logging (envelopes) | `INTERNAL_800x` | no |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - config, results, envelope lifting, proposal validation
//! - `ports/` - `RouterApi` inbound; one dispatch port per subsystem outbound
//! - `adapters/` - unwired placeholder port
//! - `service.rs` - `Router`

#![warn(missing_docs)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adapters::UnwiredPort;
pub use domain::config::RouterConfig;
pub use domain::lift::{lift_envelope, CAPABILITY_ACTION};
pub use domain::proposal::{validate_proposal, NormalizedProposal, ProposalIssue, ProposalRejection};
pub use domain::result::{RouterStage, RoutingResult};
pub use ports::inbound::RouterApi;
pub use ports::outbound::{
    AgentPort, AlignmentInboxPort, DispatchError, FederationPort, KnowledgeGraphPort,
    LandingPort, ProjectionPort, RouterInboxPort, SubsystemPorts, TransformPort,
};
pub use service::Router;
