//! Error types for `scorekeep-core`.

use thiserror::Error;

/// A value received at the service boundary failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("invalid wallet address: {0}")]
  InvalidWallet(&'static str),

  #[error("invalid score: {0}")]
  InvalidScore(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
