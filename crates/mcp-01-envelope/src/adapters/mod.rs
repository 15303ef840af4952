//! # Adapters
//!
//! Keyring-backed implementations of the signing and verification ports.

pub mod keyring;

pub use keyring::{NodeSigner, NodeVerifier};
