//! # Domain Layer

pub mod errors;
pub mod legal_routes;
pub mod route_table;
