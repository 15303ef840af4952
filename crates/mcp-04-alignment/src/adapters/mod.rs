//! # Adapters

pub mod fail_closed;

pub use fail_closed::FailClosedReviewer;
