//! Verdict rules engine HTTP server library
//!
//! Exposes the REST API components for testing and reuse.

pub mod api;
pub mod config;
pub mod error;
