//! # Node Runtime Library
//!
//! Exposes the wiring of a transport node for the binary and for tests.
//! The main entry point is the `main.rs` binary.
//!
//! ## Modules
//!
//! - `container/` - configuration and the subsystem container
//! - `adapters/` - in-process dispatch port implementations
//! - `wiring/` - envelope route table and federation declaration
//! - `runtime` - envelope submission, error replies, sample traffic

#![warn(missing_docs)]

pub mod adapters;
pub mod container;
pub mod runtime;
pub mod wiring;

pub use container::{ConfigError, NodeConfig, SubsystemContainer};
pub use runtime::{Delivery, NodeRuntime};
