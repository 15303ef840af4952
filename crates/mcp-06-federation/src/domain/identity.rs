//! # Node Identity Verification
//!
//! Structural only: a peer must name a node, and may not claim the
//! reserved local id.

use crate::domain::errors::IdentityRejection;
use shared_types::{Identity, LOCAL_NODE_ID};

/// Checks that `identity` can stand for a peer node.
pub fn verify_node_identity(identity: &Identity) -> Result<(), IdentityRejection> {
    if identity.node_id.trim().is_empty() {
        return Err(IdentityRejection::MissingNodeId);
    }
    if identity.node_id == LOCAL_NODE_ID {
        return Err(IdentityRejection::ReservedLocal);
    }
    Ok(())
}
