//! # Domain Layer

pub mod agents;
pub mod errors;
pub mod policy;
pub mod review;
pub mod ruling;
