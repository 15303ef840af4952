//! # Node Configuration
//!
//! Runtime parameters of a transport node, read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MCP_NODE_ID` | `node-1` | Federation-facing node id |
//! | `MCP_LOG_PATH` | `./data/envelopes.jsonl` | Envelope log file |
//! | `MCP_LOG_LEVEL` | `info` | `tracing` filter directive |
//! | `MCP_CONSTRAINT_RULES` | unset | Optional constraint rules JSON file |
//! | `MCP_NODE_KEY_FILE` | unset | Optional hex Ed25519 seed for the node key |
//!
//! Without `MCP_NODE_KEY_FILE` the node signing key is generated at every
//! start, so envelopes signed before a restart no longer verify afterwards.
//! The persisted log still opens, since chain verification does not check
//! signatures.

use shared_types::LOCAL_NODE_ID;
use std::path::PathBuf;
use thiserror::Error;

/// Default node id.
pub const DEFAULT_NODE_ID: &str = "node-1";
/// Default envelope log location.
pub const DEFAULT_LOG_PATH: &str = "./data/envelopes.jsonl";
/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Node id this process speaks for.
    pub node_id: String,
    /// Envelope log file.
    pub log_path: PathBuf,
    /// `tracing` filter directive.
    pub log_level: String,
    /// Constraint rules to load instead of the defaults.
    pub constraint_rules: Option<PathBuf>,
    /// Seed file for a signing key stable across restarts. A fresh key is
    /// generated per start when unset.
    pub node_key_file: Option<PathBuf>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: DEFAULT_NODE_ID.to_string(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            constraint_rules: None,
            node_key_file: None,
        }
    }
}

impl NodeConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from `lookup`, falling back to defaults for
    /// unset or blank variables, then validates it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(node_id) = read("MCP_NODE_ID") {
            config.node_id = node_id.trim().to_string();
        }
        if let Some(path) = read("MCP_LOG_PATH") {
            config.log_path = PathBuf::from(path);
        }
        if let Some(level) = read("MCP_LOG_LEVEL") {
            config.log_level = level;
        }
        config.constraint_rules = read("MCP_CONSTRAINT_RULES").map(PathBuf::from);
        config.node_key_file = read("MCP_NODE_KEY_FILE").map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_id.trim().is_empty() {
            return Err(ConfigError::EmptyNodeId);
        }
        if self.node_id == LOCAL_NODE_ID {
            return Err(ConfigError::ReservedNodeId);
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyLogPath);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No node id.
    #[error("MCP_NODE_ID must not be empty")]
    EmptyNodeId,

    /// The reserved local id used as a federation-facing id.
    #[error("MCP_NODE_ID '{}' is reserved for in-process identities", LOCAL_NODE_ID)]
    ReservedNodeId,

    /// No log location.
    #[error("MCP_LOG_PATH must not be empty")]
    EmptyLogPath,
}
