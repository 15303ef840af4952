//! # Review Policy
//!
//! Decides which routes need third-party review before dispatch.

use serde::{Deserialize, Serialize};
use shared_types::{Intent, Subsystem};

/// Routes and intents that must be reviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewPolicy {
    /// Intents reviewed regardless of destination.
    pub high_risk_intents: Vec<Intent>,
    /// Destinations reviewed regardless of intent.
    pub always_reviewed: Vec<Subsystem>,
    /// (destination, intent) pairs reviewed in addition.
    pub guarded_pairs: Vec<(Subsystem, Intent)>,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            high_risk_intents: vec![
                Intent::KgMutationProposal,
                Intent::AgentExecution,
                Intent::Update,
            ],
            always_reviewed: vec![Subsystem::Agents],
            guarded_pairs: vec![(Subsystem::KnowledgeGraph, Intent::KgMutationProposal)],
        }
    }
}

impl ReviewPolicy {
    /// True if a message with `intent` travelling to `to` must be reviewed.
    pub fn requires_review(&self, _from: Subsystem, to: Subsystem, intent: Intent) -> bool {
        self.always_reviewed.contains(&to)
            || self.guarded_pairs.contains(&(to, intent))
            || self.high_risk_intents.contains(&intent)
    }
}
