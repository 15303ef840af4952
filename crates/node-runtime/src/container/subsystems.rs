//! # Subsystem Container
//!
//! Holds every collaborator of a running node and wires them together.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Keyring, signer, verifier (no dependencies)
//! Level 1: Envelope engine, envelope log (depend on Level 0)
//! Level 2: Dispatch ports, constraint rules, route table
//! Level 3: Router (depends on Level 0-2)
//! ```
//!
//! Nothing is process-global: a test can build as many containers as it
//! needs.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use mcp_01_envelope::{EnvelopeService, EnvelopeVerifier, NodeSigner, NodeVerifier};
use mcp_03_constraints::{ConstraintRules, ConstraintValidator};
use mcp_05_router::{Router, RouterConfig, SubsystemPorts};
use mcp_06_federation::FederationService;
use mcp_07_log_store::{EnvelopeLog, LogStore};
use shared_crypto::{Ed25519KeyPair, Keyring};
use shared_types::{Identity, Subsystem};

use crate::adapters::{GuardedAgents, LoopbackFederation, ProposalGraph, TracingSink};
use crate::container::config::NodeConfig;
use crate::wiring::{declared_capabilities, route_table};

/// Node id of the in-process federation peer.
pub const LOOPBACK_PEER_ID: &str = "loopback-peer";

/// Central container holding all subsystem instances.
pub struct SubsystemContainer {
    /// Configuration the container was built from.
    pub config: NodeConfig,
    /// Node key registry.
    pub keyring: Arc<Keyring>,
    /// Envelope engine signing as this node.
    pub envelopes: Arc<EnvelopeService>,
    /// Append-only envelope log.
    pub log: Arc<LogStore>,
    /// Orchestrating router.
    pub router: Arc<Router>,
    /// Landing, transform and inbox destinations.
    pub sink: Arc<TracingSink>,
    /// Knowledge-graph destination.
    pub graph: Arc<ProposalGraph>,
    /// Federation destination.
    pub federation: Arc<LoopbackFederation>,
}

/// Constraint rules for `config`, bound to its node id.
pub fn load_rules(config: &NodeConfig) -> Result<ConstraintRules> {
    let rules = match &config.constraint_rules {
        Some(path) => ConstraintRules::from_file(path)
            .with_context(|| format!("Failed to load constraint rules {}", path.display()))?,
        None => ConstraintRules::default(),
    };
    Ok(rules.with_local_node(config.node_id.clone()))
}

/// Registers the signing key for `config.node_id`: the seed in
/// `config.node_key_file` when set, otherwise a key generated for this start.
pub fn install_node_key(keyring: &Keyring, config: &NodeConfig) -> Result<()> {
    match &config.node_key_file {
        Some(path) => {
            let seed = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read node key {}", path.display()))?;
            let keypair = Ed25519KeyPair::from_seed_hex(&seed)
                .with_context(|| format!("Invalid node key {}", path.display()))?;
            let public = keyring.register_keypair(&config.node_id, keypair);
            info!(public_key = %public.to_hex(), "[Node] node key loaded");
        }
        None => {
            let public = keyring.generate_node_keys(&config.node_id);
            warn!(
                public_key = %public.to_hex(),
                "[Node] ephemeral node key, envelopes signed now will not verify after restart"
            );
        }
    }
    Ok(())
}

impl SubsystemContainer {
    /// Wires a node that logs to the file named in `config`.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let log = LogStore::open_file(&config.log_path)
            .with_context(|| format!("Failed to open envelope log {}", config.log_path.display()))?;
        Self::with_log(config, log)
    }

    /// Wires a node around an already opened log.
    pub fn with_log(config: NodeConfig, log: LogStore) -> Result<Self> {
        config.validate()?;
        info!(node_id = %config.node_id, "[Node] wiring subsystems");

        // Level 0: keys
        let keyring = Arc::new(Keyring::new());
        install_node_key(&keyring, &config)?;
        let signer = Arc::new(NodeSigner::new(Arc::clone(&keyring), config.node_id.clone()));
        let verifier: Arc<dyn EnvelopeVerifier> = Arc::new(NodeVerifier::new(Arc::clone(&keyring)));

        // Level 1: envelope engine and log
        let envelopes = Arc::new(EnvelopeService::new(signer, Some(Arc::clone(&verifier))));
        let log = Arc::new(log);
        info!(entries = log.len(), head = ?log.head_hash(), "[Node] envelope log verified");

        // Level 2: destinations and policy
        let sink = Arc::new(TracingSink::new());
        let graph = Arc::new(ProposalGraph::new());
        let federation = Arc::new(LoopbackFederation::new(FederationService::new(
            declared_capabilities(LOOPBACK_PEER_ID),
        )));
        let ports = SubsystemPorts {
            landing: sink.clone(),
            transform: sink.clone(),
            router: sink.clone(),
            knowledge_graph: graph.clone(),
            alignment: sink.clone(),
            agents: Arc::new(GuardedAgents),
            projections: sink.clone(),
            federation: federation.clone(),
        };

        let rules = load_rules(&config)?;

        // Level 3: router
        let router_config = RouterConfig {
            local_node_id: config.node_id.clone(),
            verify_signatures: true,
            log_routed: true,
        };
        let router = Router::new(router_config, ports)
            .with_constraints(Arc::new(ConstraintValidator::new(rules)))
            .with_route_table(Arc::new(route_table()))
            .with_verifier(verifier)
            .with_log(log.clone());

        info!(routes = router.route_table().len(), "[Node] router ready");

        Ok(Self {
            config,
            keyring,
            envelopes,
            log,
            router: Arc::new(router),
            sink,
            graph,
            federation,
        })
    }

    /// Identity of `subsystem` on this node.
    pub fn identity_of(&self, subsystem: Subsystem) -> Identity {
        Identity::module(self.config.node_id.clone(), subsystem.tag())
    }
}
