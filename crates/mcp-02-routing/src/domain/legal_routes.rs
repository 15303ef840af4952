//! # Legal Routing Graph
//!
//! The static, default-deny table of permitted (source, destination, intent)
//! transitions. The table is asymmetric: a hop being legal says nothing about
//! its reverse.
//!
//! Every subsystem other than the router talks only to the router, with one
//! exception: the landing layer hands raw data straight to extraction.

use serde::Serialize;
use shared_types::{Intent, Subsystem};
use std::collections::HashMap;
use std::sync::LazyLock;

/// One permitted ordered subsystem pair and the intents it may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegalRoute {
    /// Source subsystem.
    pub from: Subsystem,
    /// Destination subsystem.
    pub to: Subsystem,
    /// Intents permitted on this hop.
    pub intents: &'static [Intent],
    /// Why the hop exists.
    pub rationale: &'static str,
}

impl LegalRoute {
    /// True if `intent` may travel on this hop.
    pub fn permits(&self, intent: Intent) -> bool {
        self.intents.contains(&intent)
    }
}

use Intent::*;
use Subsystem::*;

/// The complete legal routing table, loaded once and never mutated.
pub static LEGAL_ROUTES: &[LegalRoute] = &[
    // =========================================================================
    // Ingestion pipeline
    // =========================================================================
    LegalRoute {
        from: Landing,
        to: Transform,
        intents: &[DataIngest],
        rationale: "Landed records flow to pattern extraction",
    },
    LegalRoute {
        from: Transform,
        to: Router,
        intents: &[DataIngest, PatternExtraction, ProposalApply],
        rationale: "Extraction submits patterns and proposals for routing",
    },
    // =========================================================================
    // Router fan-out
    // =========================================================================
    LegalRoute {
        from: Router,
        to: KnowledgeGraph,
        intents: &[KgMutationProposal, Query, ProposalApply],
        rationale: "Only the router may propose graph mutations or query the graph",
    },
    LegalRoute {
        from: Router,
        to: Alignment,
        intents: &[AlignmentReview, Analysis],
        rationale: "Router forwards messages for review and analysis",
    },
    LegalRoute {
        from: Router,
        to: Agents,
        intents: &[AgentExecution],
        rationale: "Agents execute only tasks dispatched by the router",
    },
    LegalRoute {
        from: Router,
        to: Projections,
        intents: &[ProjectionGeneration],
        rationale: "Router requests projections",
    },
    LegalRoute {
        from: Router,
        to: Federation,
        intents: &[FederationHandshake],
        rationale: "Router initiates handshakes with peers",
    },
    // =========================================================================
    // Results back to the router
    // =========================================================================
    LegalRoute {
        from: Alignment,
        to: Router,
        intents: &[AlignmentReview],
        rationale: "Review rulings return to the router",
    },
    LegalRoute {
        from: Agents,
        to: Router,
        intents: &[AgentExecution],
        rationale: "Agent results return to the router",
    },
    LegalRoute {
        from: Projections,
        to: Router,
        intents: &[ProjectionGeneration],
        rationale: "Projection results return to the router",
    },
    LegalRoute {
        from: KnowledgeGraph,
        to: Router,
        intents: &[Query, KgMutationProposal],
        rationale: "Graph answers and mutation outcomes return to the router",
    },
    LegalRoute {
        from: Federation,
        to: Router,
        intents: &[FederationHandshake, Query, Update],
        rationale: "Peers answer handshakes and offer voluntary queries and updates",
    },
];

static ROUTE_INDEX: LazyLock<HashMap<(Subsystem, Subsystem), &'static LegalRoute>> =
    LazyLock::new(|| {
        LEGAL_ROUTES
            .iter()
            .map(|route| ((route.from, route.to), route))
            .collect()
    });

/// True iff the table has an entry for (`from`, `to`) permitting `intent`.
pub fn is_legal_route(from: Subsystem, to: Subsystem, intent: Intent) -> bool {
    ROUTE_INDEX
        .get(&(from, to))
        .is_some_and(|route| route.permits(intent))
}

/// The table entry for an ordered pair.
pub fn legal_route(from: Subsystem, to: Subsystem) -> Option<&'static LegalRoute> {
    ROUTE_INDEX.get(&(from, to)).copied()
}

/// Entries leaving `from`.
pub fn routes_from(from: Subsystem) -> Vec<&'static LegalRoute> {
    LEGAL_ROUTES.iter().filter(|r| r.from == from).collect()
}

/// Entries arriving at `to`.
pub fn routes_to(to: Subsystem) -> Vec<&'static LegalRoute> {
    LEGAL_ROUTES.iter().filter(|r| r.to == to).collect()
}
