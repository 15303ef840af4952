//! # Envelope Engine (mcp-01)
//!
//! Builds, signs, hashes and validates the envelopes every subsystem
//! exchanges.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Deterministic hash | Same semantic content, same hash, regardless of key order |
//! | 2 | Hash exclusion | `envelopeId`, `hash` and `signature` never feed the hash |
//! | 3 | Derived identifier | Identifier is the hash unless explicitly supplied |
//! | 4 | Always signed | Every built envelope carries a signature over its hash |
//! | 5 | Append-only route | Forwarding pushes a hop; existing hops are untouched |
//! | 6 | No auto-correction | Structural, hash and signature failures are reported, never repaired |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - hashing, builder, validation, error envelopes
//! - `ports/` - `EnvelopeApi` inbound; `EnvelopeSigner`, `EnvelopeVerifier` outbound
//! - `adapters/` - keyring-backed signer and verifier
//! - `service.rs` - `EnvelopeService`

#![warn(missing_docs)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;


pub use adapters::{NodeSigner, NodeVerifier};
pub use domain::builder::{append_hop, build_envelope, EnvelopeParams};
pub use domain::error_envelope::{build_error_envelope, error_envelope_params};
pub use domain::errors::EnvelopeError;
pub use domain::hashing::{compute_envelope_hash, message_correlation_id};
pub use domain::validation::{
    enforce_capabilities, parse_envelope, validate_envelope, validate_integrity,
    validate_structure,
};
pub use ports::inbound::EnvelopeApi;
pub use ports::outbound::{EnvelopeSigner, EnvelopeVerifier, SignerError};
pub use service::EnvelopeService;
