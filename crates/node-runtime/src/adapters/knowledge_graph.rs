//! # Knowledge Graph Port
//!
//! Stands in for the graph store: proposals are validated and kept in
//! memory, queries and mutation proposals are acknowledged.

use async_trait::async_trait;
use mcp_05_router::{validate_proposal, DispatchError, KnowledgeGraphPort, NormalizedProposal};
use parking_lot::RwLock;
use shared_types::{Intent, Message, Subsystem};
use tracing::{debug, info, warn};

/// In-memory graph that accepts only well-formed proposals.
#[derive(Debug, Default)]
pub struct ProposalGraph {
    applied: RwLock<Vec<NormalizedProposal>>,
}

impl ProposalGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Proposals applied so far, oldest first.
    pub fn applied(&self) -> Vec<NormalizedProposal> {
        self.applied.read().clone()
    }
}

#[async_trait]
impl KnowledgeGraphPort for ProposalGraph {
    async fn apply(&self, message: &Message) -> Result<(), DispatchError> {
        if message.intent != Intent::ProposalApply {
            debug!(intent = %message.intent, "[KG] acknowledged");
            return Ok(());
        }

        match validate_proposal(message) {
            Ok(proposal) => {
                info!(proposal_type = %proposal.proposal_type, "[KG] proposal applied");
                self.applied.write().push(proposal);
                Ok(())
            }
            Err(rejection) => {
                warn!(issues = rejection.issues.len(), error = %rejection, "[KG] proposal refused");
                Err(DispatchError::failed(
                    Subsystem::KnowledgeGraph,
                    rejection.to_string(),
                ))
            }
        }
    }
}
