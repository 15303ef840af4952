//! # Routing (mcp-02)
//!
//! Which subsystem may talk to which, for which intent, and where an
//! inbound envelope is headed.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Default deny | A triple not in the table is illegal |
//! | 2 | Static table | The legal table is loaded once and never mutated |
//! | 3 | Asymmetry | A legal hop implies nothing about its reverse |
//! | 4 | Closed targets | Envelope routes resolve to a `Subsystem`, never a handler name |

#![warn(missing_docs)]

pub mod domain;

pub use domain::errors::RoutingError;
pub use domain::legal_routes::{
    is_legal_route, legal_route, routes_from, routes_to, LegalRoute, LEGAL_ROUTES,
};
pub use domain::route_table::{RouteTable, RouteTarget};
