//! # Domain Layer
//!
//! Pure envelope logic: hashing, building, validation and error responses.

pub mod builder;
pub mod error_envelope;
pub mod errors;
pub mod hashing;
pub mod validation;
