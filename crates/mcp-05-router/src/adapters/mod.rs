//! # Adapters

pub mod unwired;

pub use unwired::UnwiredPort;
