//! The `ScoreStore` trait.
//!
//! Implemented by storage backends (e.g. `scorekeep-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{Score, ScoreRecord, WalletAddress};

/// Abstraction over a score table keyed by wallet address.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ScoreStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up the record for `wallet`. Returns `None` if it was never written.
  fn get_score(
    &self,
    wallet: WalletAddress,
  ) -> impl Future<Output = Result<Option<ScoreRecord>, Self::Error>> + Send + '_;

  /// Insert a record for `wallet`, or replace its score if one exists, and
  /// return the stored record.
  ///
  /// Implementations must perform this as a single atomic conditional write.
  /// Concurrent calls for the same wallet must never produce two records.
  fn upsert_score(
    &self,
    wallet: WalletAddress,
    score: Score,
  ) -> impl Future<Output = Result<ScoreRecord, Self::Error>> + Send + '_;
}
