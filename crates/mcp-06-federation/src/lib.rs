//! # Federation Handshake (mcp-06)
//!
//! Identity verification and capability negotiation between two nodes.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Real peers only | Empty node ids and the reserved `local` id are refused |
//! | 2 | Alignment required | Both sides must submit to alignment review |
//! | 3 | Autonomy retained | A side at autonomy `NONE` cannot federate |
//! | 4 | Never full sync | `FULL` offers are dropped; the agreed type cannot express it |
//! | 5 | Lower autonomy wins | Negotiated autonomy is the minimum of both |
//! | 6 | Voluntary | Every agreement is marked voluntary |

#![warn(missing_docs)]

pub mod domain;
pub mod service;

pub use domain::capabilities::{
    negotiate_sync, AgreedSyncType, AutonomyLevel, NegotiatedCapabilities, NegotiatedSync,
    NodeCapabilities, SyncCapability, SyncType,
};
pub use domain::errors::{FederationError, IdentityRejection, NodeRole};
pub use domain::handshake::{
    handshake_envelope_params, handshake_message, negotiate_capabilities, perform_handshake,
    HandshakeOutcome, HandshakeRequest, SyncAgreement, HANDSHAKE_PAYLOAD_TYPE,
};
pub use domain::identity::verify_node_identity;
pub use service::FederationService;
