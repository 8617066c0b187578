//! [`SqliteStore`] — the SQLite implementation of [`ScoreStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use scorekeep_core::{
  record::{Score, ScoreRecord, WalletAddress},
  store::ScoreStore,
};

use crate::{
  encode::{encode_dt, RawRecord},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A score table backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  pub(crate) async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ScoreStore impl ─────────────────────────────────────────────────────────

impl ScoreStore for SqliteStore {
  type Error = crate::Error;

  async fn get_score(&self, wallet: WalletAddress) -> Result<Option<ScoreRecord>> {
    let wallet = wallet.into_inner();

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT wallet_address, score, updated_at
             FROM users WHERE wallet_address = ?1",
            rusqlite::params![wallet],
            RawRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn upsert_score(&self, wallet: WalletAddress, score: Score) -> Result<ScoreRecord> {
    let wallet = wallet.into_inner();
    let at_str = encode_dt(Utc::now());

    // A single statement: the primary key conflict clause makes the
    // insert-or-replace atomic, so no read precedes the write.
    let raw: RawRecord = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO users (wallet_address, score, updated_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (wallet_address)
           DO UPDATE SET score = excluded.score, updated_at = excluded.updated_at
           RETURNING wallet_address, score, updated_at",
          rusqlite::params![wallet, score.get(), at_str],
          RawRecord::from_row,
        )?)
      })
      .await?;

    raw.into_record()
  }
}
