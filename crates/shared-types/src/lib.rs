//! # Shared Types Crate
//!
//! Domain entities, the wire `Envelope`, the router-side `Message` and the
//! error taxonomy shared by every transport subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every cross-subsystem type is defined here.
//! - **One envelope model**: protocol evolution is carried by the
//!   `header.version` field, not by parallel type hierarchies.
//! - **Closed topology**: subsystems and intents are enumerations, so
//!   dispatch is checked for exhaustiveness at compile time.

#![warn(missing_docs)]

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod message;

pub use entities::*;
pub use envelope::{
    Body, Envelope, Header, Provenance, Safety, ERROR_PAYLOAD_TYPE, PROTOCOL_VERSION,
    SUPPORTED_MAJOR_VERSION,
};
pub use errors::*;
pub use message::*;
