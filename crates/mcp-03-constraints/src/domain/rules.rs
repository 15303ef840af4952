//! # Constraint Rules
//!
//! The directive keys and guarded destinations each predicate matches on.
//! Defaults reproduce the established behaviour; deployments may load their
//! own rules from JSON.

use crate::domain::errors::ConstraintError;
use serde::{Deserialize, Serialize};
use shared_types::{Intent, Subsystem, LOCAL_NODE_ID};
use std::path::Path;

/// Non-coercion matching rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NonCoercionRule {
    /// Payload key that, when literally `true`, forces the destination.
    pub force_key: String,
    /// Destinations that may not be forced.
    pub unforceable: Vec<Subsystem>,
    /// Payload key that, when literally `true`, strips permissions.
    pub reduce_permissions_key: String,
    /// Intents on which permission stripping is checked.
    pub reduce_permissions_intents: Vec<Intent>,
}

impl Default for NonCoercionRule {
    fn default() -> Self {
        Self {
            force_key: "force".into(),
            unforceable: vec![Subsystem::Router],
            reduce_permissions_key: "reducePermissions".into(),
            reduce_permissions_intents: vec![Intent::Update],
        }
    }
}

/// Locality matching rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalityRule {
    /// Payload key whose mere presence is an override attempt.
    pub override_key: String,
    /// Destinations an external node may not override.
    pub guarded: Vec<Subsystem>,
    /// Intents on which overrides are checked.
    pub intents: Vec<Intent>,
}

impl Default for LocalityRule {
    fn default() -> Self {
        Self {
            override_key: "override".into(),
            guarded: vec![Subsystem::Router, Subsystem::Alignment],
            intents: vec![Intent::Update],
        }
    }
}

/// Reversibility matching rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReversibilityRule {
    /// Intents that change state.
    pub state_changing: Vec<Intent>,
    /// Payload key declaring the change reversible.
    pub reversible_key: String,
    /// Payload key declaring a constitutional change, which is exempt.
    pub constitutional_key: String,
}

impl Default for ReversibilityRule {
    fn default() -> Self {
        Self {
            state_changing: Intent::STATE_CHANGING.to_vec(),
            reversible_key: "reversible".into(),
            constitutional_key: "constitutional".into(),
        }
    }
}

/// Complete rule set for the four constitutional predicates.
///
/// Observability has no tunables: provenance, caller node, session, schema
/// and schema version are always required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstraintRules {
    /// Node id that counts as local for the locality check.
    pub local_node_id: String,
    /// Non-coercion.
    pub non_coercion: NonCoercionRule,
    /// Locality.
    pub locality: LocalityRule,
    /// Reversibility.
    pub reversibility: ReversibilityRule,
}

impl Default for ConstraintRules {
    fn default() -> Self {
        Self {
            local_node_id: LOCAL_NODE_ID.into(),
            non_coercion: NonCoercionRule::default(),
            locality: LocalityRule::default(),
            reversibility: ReversibilityRule::default(),
        }
    }
}

impl ConstraintRules {
    /// Parses rules from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConstraintError> {
        serde_json::from_str(json).map_err(|e| ConstraintError::InvalidRules(e.to_string()))
    }

    /// Reads rules from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConstraintError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConstraintError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    /// Same rules with a different local node id.
    #[must_use]
    pub fn with_local_node(mut self, node_id: impl Into<String>) -> Self {
        self.local_node_id = node_id.into();
        self
    }
}
