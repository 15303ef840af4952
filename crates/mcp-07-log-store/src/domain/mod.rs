//! # Domain Layer

pub mod chain;
pub mod entry;
pub mod errors;
