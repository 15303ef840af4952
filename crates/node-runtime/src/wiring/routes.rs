use mcp_02_routing::RouteTable;
use mcp_06_federation::{
    AutonomyLevel, NodeCapabilities, SyncCapability, SyncType, HANDSHAKE_PAYLOAD_TYPE,
};
use shared_types::{Intent, Layer, Subsystem};

/// Records landed by the data landing layer.
pub const RECORD_PAYLOAD_TYPE: &str = "LDS.RECORD";
/// Proposals extracted by the transform layer.
pub const PROPOSAL_PAYLOAD_TYPE: &str = "TKD.PROPOSAL";
/// Agent tasks issued by the router.
pub const AGENT_TASK_PAYLOAD_TYPE: &str = "MCP.AGENT_TASK";

/// The node's envelope route table.
pub fn route_table() -> RouteTable {
    RouteTable::new()
        .with_route(Layer::Io, RECORD_PAYLOAD_TYPE, Subsystem::Transform, Intent::DataIngest)
        .with_route(
            Layer::Agent,
            PROPOSAL_PAYLOAD_TYPE,
            Subsystem::KnowledgeGraph,
            Intent::ProposalApply,
        )
        .with_route(
            Layer::Agent,
            AGENT_TASK_PAYLOAD_TYPE,
            Subsystem::Agents,
            Intent::AgentExecution,
        )
        .with_route(
            Layer::Federation,
            HANDSHAKE_PAYLOAD_TYPE,
            Subsystem::Federation,
            Intent::FederationHandshake,
        )
}

/// What `node_id` offers federation peers.
pub fn declared_capabilities(node_id: &str) -> NodeCapabilities {
    NodeCapabilities {
        node_id: node_id.to_string(),
        supported_intents: vec![Intent::FederationHandshake, Intent::Query, Intent::Update],
        alignment_compatible: true,
        autonomy_level: AutonomyLevel::Full,
        sync_capabilities: vec![
            SyncCapability::new("constraint-rules", SyncType::Partial),
            SyncCapability::new("knowledge-graph", SyncType::Voluntary),
        ],
    }
}
