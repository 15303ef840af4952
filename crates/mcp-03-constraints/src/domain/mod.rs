//! # Domain Layer

pub mod errors;
pub mod rules;
pub mod validator;
pub mod violations;
