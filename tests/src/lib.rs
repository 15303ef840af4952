//! # Constitutional Transport Test Suite
//!
//! Unified test crate for scenarios that span more than one subsystem
//! crate. Per-crate behaviour is tested next to the code.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs            # Shared builders, recording ports, reviewers
//!     ├── envelope_integrity.rs  # Hash determinism, tamper sensitivity, exclusion
//!     ├── routing_policy.rs      # Default-deny topology, constitutional constraints
//!     ├── alignment_review.rs    # Judge and mediator rulings inside the router
//!     ├── log_chain.rs           # Hash chain integrity and durable replay
//!     ├── federation.rs          # Handshake negotiation end to end
//!     └── node_flow.rs           # Fully wired node with a file-backed log
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p transport-tests
//! cargo test -p transport-tests integration::log_chain::
//! ```
