//! # Core Domain Entities
//!
//! Value objects shared by every transport subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `Identity`, `RouteHop`
//! - **Topology**: `Subsystem`, `Layer`
//! - **Intent & Classification**: `Intent`, `MessageType`, `Priority`
//! - **Safety**: `RiskLevel`, `AlignmentFlag`, `SnapshotScope`
//! - **Capabilities**: `Capability`, `CapabilitySet`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wall-clock instant used for every timestamp on the wire.
pub type Timestamp = DateTime<Utc>;

/// Node id reserved for the node the router runs on.
///
/// A remote peer presenting this id is rejected by federation.
pub const LOCAL_NODE_ID: &str = "local";

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A (node, module, agent) triple naming a message source or target.
///
/// Identities are plain values: cloned freely, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Owning node.
    pub node_id: String,
    /// Module within the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    /// Agent within the module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl Identity {
    /// Identity naming a whole node.
    pub fn node(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            module_id: None,
            agent_id: None,
        }
    }

    /// Identity naming a module on a node.
    pub fn module(node_id: impl Into<String>, module_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            module_id: Some(module_id.into()),
            agent_id: None,
        }
    }

    /// Returns a copy narrowed to the given agent.
    #[must_use]
    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// True when this identity claims the reserved local node.
    pub fn is_local(&self) -> bool {
        self.node_id == LOCAL_NODE_ID
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node_id)?;
        if let Some(module) = &self.module_id {
            write!(f, "::{module}")?;
        }
        if let Some(agent) = &self.agent_id {
            write!(f, "::{agent}")?;
        }
        Ok(())
    }
}

/// One hop of a provenance route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteHop {
    /// Node that handled the message.
    pub node_id: String,
    /// Module that handled the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    /// Agent that handled the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// When the hop happened.
    pub timestamp: Timestamp,
}

impl RouteHop {
    /// Records `identity` as having handled a message at `timestamp`.
    pub fn from_identity(identity: &Identity, timestamp: Timestamp) -> Self {
        Self {
            node_id: identity.node_id.clone(),
            module_id: identity.module_id.clone(),
            agent_id: identity.agent_id.clone(),
            timestamp,
        }
    }

    /// The identity that performed this hop.
    pub fn identity(&self) -> Identity {
        Identity {
            node_id: self.node_id.clone(),
            module_id: self.module_id.clone(),
            agent_id: self.agent_id.clone(),
        }
    }
}

// =============================================================================
// CLUSTER B: TOPOLOGY
// =============================================================================

/// The closed set of cooperating subsystems a message can travel between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subsystem {
    /// Data-landing layer.
    #[serde(rename = "LDS")]
    Landing,
    /// Pattern and rule extraction layer.
    #[serde(rename = "TKD")]
    Transform,
    /// The router itself.
    #[serde(rename = "MCP")]
    Router,
    /// Knowledge-graph store.
    #[serde(rename = "KG_STORE", alias = "CRYSTALLINE")]
    KnowledgeGraph,
    /// Alignment and review authority.
    #[serde(rename = "ALIGNMENT")]
    Alignment,
    /// Autonomous agents.
    #[serde(rename = "AGENTS")]
    Agents,
    /// Projection and scenario generator.
    #[serde(rename = "PROJECTIONS")]
    Projections,
    /// Peer nodes over federation.
    #[serde(rename = "FEDERATION")]
    Federation,
}

impl Subsystem {
    /// Every subsystem, in declaration order.
    pub const ALL: [Subsystem; 8] = [
        Subsystem::Landing,
        Subsystem::Transform,
        Subsystem::Router,
        Subsystem::KnowledgeGraph,
        Subsystem::Alignment,
        Subsystem::Agents,
        Subsystem::Projections,
        Subsystem::Federation,
    ];

    /// Wire tag of the subsystem.
    pub fn tag(&self) -> &'static str {
        match self {
            Subsystem::Landing => "LDS",
            Subsystem::Transform => "TKD",
            Subsystem::Router => "MCP",
            Subsystem::KnowledgeGraph => "KG_STORE",
            Subsystem::Alignment => "ALIGNMENT",
            Subsystem::Agents => "AGENTS",
            Subsystem::Projections => "PROJECTIONS",
            Subsystem::Federation => "FEDERATION",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Transport layer an envelope travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Ingestion and output.
    #[serde(rename = "MCP-IO", alias = "IO")]
    Io,
    /// Agent coordination.
    #[serde(rename = "MCP-AGENT", alias = "AGENT")]
    Agent,
    /// Federation between nodes.
    #[serde(rename = "MCP-FED", alias = "FED")]
    Federation,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layer::Io => "MCP-IO",
            Layer::Agent => "MCP-AGENT",
            Layer::Federation => "MCP-FED",
        })
    }
}

// =============================================================================
// CLUSTER C: INTENT & CLASSIFICATION
// =============================================================================

/// Purpose tag of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Read-only analysis.
    Analysis,
    /// Pattern extraction over ingested data.
    PatternExtraction,
    /// Proposed mutation of the knowledge graph.
    KgMutationProposal,
    /// Request for alignment review.
    AlignmentReview,
    /// Agent task execution.
    AgentExecution,
    /// Federation handshake with a peer node.
    FederationHandshake,
    /// Projection or scenario generation.
    ProjectionGeneration,
    /// Raw data ingestion.
    DataIngest,
    /// Read query.
    Query,
    /// State update.
    Update,
    /// Application of an extracted proposal.
    #[serde(alias = "TKD_PROPOSAL_APPLY")]
    ProposalApply,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 11] = [
        Intent::Analysis,
        Intent::PatternExtraction,
        Intent::KgMutationProposal,
        Intent::AlignmentReview,
        Intent::AgentExecution,
        Intent::FederationHandshake,
        Intent::ProjectionGeneration,
        Intent::DataIngest,
        Intent::Query,
        Intent::Update,
        Intent::ProposalApply,
    ];

    /// Intents that change state and therefore must be reversible.
    pub const STATE_CHANGING: [Intent; 3] =
        [Intent::KgMutationProposal, Intent::Update, Intent::AgentExecution];
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Intent::Analysis => "ANALYSIS",
            Intent::PatternExtraction => "PATTERN_EXTRACTION",
            Intent::KgMutationProposal => "KG_MUTATION_PROPOSAL",
            Intent::AlignmentReview => "ALIGNMENT_REVIEW",
            Intent::AgentExecution => "AGENT_EXECUTION",
            Intent::FederationHandshake => "FEDERATION_HANDSHAKE",
            Intent::ProjectionGeneration => "PROJECTION_GENERATION",
            Intent::DataIngest => "DATA_INGEST",
            Intent::Query => "QUERY",
            Intent::Update => "UPDATE",
            Intent::ProposalApply => "PROPOSAL_APPLY",
        };
        f.write_str(tag)
    }
}

/// Envelope message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    /// Request expecting a response.
    Request,
    /// Response to a request.
    Response,
    /// Fire-and-forget event.
    Event,
    /// Imperative command.
    Command,
    /// Offer of an extracted pattern.
    PatternOffer,
    /// Offer of an immutable snapshot.
    SnapshotOffer,
    /// Incremental rule change.
    RuleDelta,
    /// Alert.
    Alert,
}

/// Delivery priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Background traffic.
    Low,
    /// Default priority.
    #[default]
    Normal,
    /// Expedited.
    High,
}

// =============================================================================
// CLUSTER D: SAFETY
// =============================================================================

/// Declared risk of acting on a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// No risk.
    None,
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
    /// Critical risk.
    Critical,
}

/// Concern raised against a message by an alignment authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlignmentFlag {
    /// Conflicts with declared values.
    ValueConflict,
    /// Drifts from the stated goal.
    GoalDrift,
    /// Contradicts known facts.
    Contradiction,
    /// Requests a high-risk action.
    HighRiskAction,
}

/// Whether a message refers to live state or to an immutable snapshot.
///
/// Serialized as the literal `"LIVE"` or the snapshot identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "String", from = "String")]
pub enum SnapshotScope {
    /// Live, mutable state.
    #[default]
    Live,
    /// A named immutable snapshot.
    Snapshot(String),
}

impl SnapshotScope {
    const LIVE: &'static str = "LIVE";
}

impl From<String> for SnapshotScope {
    fn from(value: String) -> Self {
        if value == Self::LIVE {
            SnapshotScope::Live
        } else {
            SnapshotScope::Snapshot(value)
        }
    }
}

impl From<SnapshotScope> for String {
    fn from(scope: SnapshotScope) -> Self {
        match scope {
            SnapshotScope::Live => SnapshotScope::LIVE.to_string(),
            SnapshotScope::Snapshot(id) => id,
        }
    }
}

// =============================================================================
// CLUSTER E: CAPABILITIES
// =============================================================================

/// A capability an endpoint declares or demands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Capability identifier, e.g. `"kg.write"`.
    pub id: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Capability {
    /// Capability with no description.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
        }
    }
}

/// Capabilities declared by the source and required of the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CapabilitySet {
    /// Capabilities the sender holds.
    pub declared: Vec<Capability>,
    /// Capabilities the sender must hold for this envelope to be accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<Capability>>,
}

impl CapabilitySet {
    /// True if a capability with this id is declared.
    pub fn declares(&self, id: &str) -> bool {
        self.declared.iter().any(|c| c.id == id)
    }

    /// Required capability ids that are not declared.
    pub fn missing(&self) -> Vec<String> {
        self.required
            .iter()
            .flatten()
            .filter(|r| !self.declares(&r.id))
            .map(|r| r.id.clone())
            .collect()
    }
}
