//! # Adapter Implementations
//!
//! In-process implementations of the router's per-subsystem dispatch ports.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Router                              │
//! │      ROUTE_CHECK → CONSTRAINT_CHECK → ALIGNMENT_REVIEW       │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ SubsystemPorts::dispatch
//!        ┌──────────────┬────────┴───────┬──────────────────┐
//!        ↓              ↓                ↓                  ↓
//!   TracingSink    GuardedAgents    ProposalGraph    LoopbackFederation
//!   (LDS, TKD,     (agent guard)    (proposal        (handshake against
//!    inboxes)                        validation)      a local service)
//! ```

pub mod agents;
pub mod federation;
pub mod knowledge_graph;
pub mod sink;

pub use agents::GuardedAgents;
pub use federation::LoopbackFederation;
pub use knowledge_graph::ProposalGraph;
pub use sink::TracingSink;
