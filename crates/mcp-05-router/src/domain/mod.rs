//! # Domain Layer

pub mod config;
pub mod lift;
pub mod proposal;
pub mod result;
