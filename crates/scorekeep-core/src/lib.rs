//! Core types and trait definitions for the scorekeep service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Every other crate in the workspace depends on it.

pub mod error;
pub mod record;
pub mod store;

pub use error::{Error, Result};
