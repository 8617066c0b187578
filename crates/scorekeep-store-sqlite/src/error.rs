//! Error type for `scorekeep-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored row violates the score invariant.
  #[error("corrupt score for wallet {wallet}: {score}")]
  CorruptScore { wallet: String, score: f64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
