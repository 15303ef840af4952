//! # Subsystem Wiring
//!
//! Static wiring data for a node: which envelopes resolve to which
//! destination, and what the node declares to federation peers.
//!
//! ## Envelope Routes
//!
//! ```text
//! (layer, payloadType)                    → destination, intent
//! ───────────────────────────────────────────────────────────────────
//! (MCP-IO,         LDS.RECORD)            → TKD,        DATA_INGEST
//! (MCP-AGENT,      TKD.PROPOSAL)          → KG_STORE,   PROPOSAL_APPLY
//! (MCP-AGENT,      MCP.AGENT_TASK)        → AGENTS,     AGENT_EXECUTION
//! (MCP-FED,        FEDERATION.HANDSHAKE)  → FEDERATION, FEDERATION_HANDSHAKE
//! ```
//!
//! Anything else fails ingress with ROUTING_5001.

pub mod routes;

pub use routes::{
    declared_capabilities, route_table, AGENT_TASK_PAYLOAD_TYPE, PROPOSAL_PAYLOAD_TYPE,
    RECORD_PAYLOAD_TYPE,
};
