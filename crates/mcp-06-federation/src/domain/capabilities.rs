//! # Node Capabilities
//!
//! What a node offers a peer, and the subset two nodes agree on.

use serde::{Deserialize, Serialize};
use shared_types::Intent;

/// How much a node governs itself. Ordered `None < Partial < Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutonomyLevel {
    /// All autonomy surrendered; cannot be federated with.
    None,
    /// Some decisions delegated.
    Partial,
    /// Fully self-governing.
    Full,
}

/// Sync type a node offers for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncType {
    /// Peer state is offered, never imposed.
    Voluntary,
    /// A bounded subset is kept in sync.
    Partial,
    /// Complete mirroring. Offered by some peers, never agreed to.
    Full,
}

/// Sync type two nodes may agree on. `Full` is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgreedSyncType {
    /// Voluntary sync.
    Voluntary,
    /// Partial sync.
    Partial,
}

impl AgreedSyncType {
    /// The agreed form of an offered type, if it may be agreed at all.
    pub fn from_offer(offer: SyncType) -> Option<Self> {
        match offer {
            SyncType::Voluntary => Some(AgreedSyncType::Voluntary),
            SyncType::Partial => Some(AgreedSyncType::Partial),
            SyncType::Full => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AgreedSyncType::Voluntary => "Voluntary",
            AgreedSyncType::Partial => "Partial",
        }
    }
}

/// A sync offer for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCapability {
    /// Resource name.
    pub resource: String,
    /// Offered sync type.
    pub sync_type: SyncType,
    /// Free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SyncCapability {
    /// Offer of `sync_type` for `resource`.
    pub fn new(resource: impl Into<String>, sync_type: SyncType) -> Self {
        Self {
            resource: resource.into(),
            sync_type,
            description: None,
        }
    }
}

/// A sync arrangement both nodes accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiatedSync {
    /// Resource name.
    pub resource: String,
    /// Agreed type.
    pub sync_type: AgreedSyncType,
    /// Generated description.
    pub description: String,
}

/// What a node declares about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCapabilities {
    /// Declaring node.
    pub node_id: String,
    /// Intents the node will accept from peers.
    pub supported_intents: Vec<Intent>,
    /// Whether the node submits to alignment review.
    pub alignment_compatible: bool,
    /// Self-governance level.
    pub autonomy_level: AutonomyLevel,
    /// Per-resource sync offers.
    #[serde(default)]
    pub sync_capabilities: Vec<SyncCapability>,
}

/// The terms two nodes settled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiatedCapabilities {
    /// Requesting node.
    pub node_id: String,
    /// Intents both sides support, in the requester's order.
    pub supported_intents: Vec<Intent>,
    /// Always true once negotiated.
    pub alignment_compatible: bool,
    /// Lower of the two declared levels.
    pub autonomy_level: AutonomyLevel,
    /// Resources both sides offered with the same non-full type.
    pub sync_capabilities: Vec<NegotiatedSync>,
}

/// Resources both sides offer with the same sync type, excluding `Full`.
pub fn negotiate_sync(requesting: &[SyncCapability], target: &[SyncCapability]) -> Vec<NegotiatedSync> {
    requesting
        .iter()
        .filter_map(|offer| {
            let counter = target.iter().find(|c| c.resource == offer.resource)?;
            if counter.sync_type != offer.sync_type {
                return None;
            }
            let agreed = AgreedSyncType::from_offer(offer.sync_type)?;
            Some(NegotiatedSync {
                resource: offer.resource.clone(),
                sync_type: agreed,
                description: format!("{} sync for {}", agreed.label(), offer.resource),
            })
        })
        .collect()
}
