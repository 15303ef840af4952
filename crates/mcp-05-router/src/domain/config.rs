//! # Router Configuration

use serde::{Deserialize, Serialize};
use shared_types::LOCAL_NODE_ID;

/// Router settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouterConfig {
    /// Identity of the node this router runs on.
    pub local_node_id: String,
    /// Check envelope signatures on ingress when a verifier is attached.
    pub verify_signatures: bool,
    /// Append successfully routed envelopes to the log.
    pub log_routed: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            local_node_id: LOCAL_NODE_ID.to_string(),
            verify_signatures: true,
            log_routed: true,
        }
    }
}
