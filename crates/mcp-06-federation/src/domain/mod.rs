//! # Domain Layer

pub mod capabilities;
pub mod errors;
pub mod handshake;
pub mod identity;
