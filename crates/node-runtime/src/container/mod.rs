//! # Subsystem Container
//!
//! Central container holding every subsystem instance of a node, built
//! from a validated [`NodeConfig`].

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig};
pub use subsystems::{load_rules, SubsystemContainer, LOOPBACK_PEER_ID};
