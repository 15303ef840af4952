//! # Ports
//!
//! - `inbound` - the envelope API offered to other subsystems
//! - `outbound` - signing and verification capabilities consumed

pub mod inbound;
pub mod outbound;
