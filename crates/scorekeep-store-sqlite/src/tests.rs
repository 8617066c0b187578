//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use scorekeep_core::{
  record::{Score, WalletAddress},
  store::ScoreStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn wallet(s: &str) -> WalletAddress { WalletAddress::parse(s).unwrap() }

fn score(n: f64) -> Score { Score::new(n).unwrap() }

async fn row_count(s: &SqliteStore, address: &str) -> i64 {
  let address = address.to_owned();
  s.conn
    .call(move |conn| {
      Ok(conn.query_row(
        "SELECT COUNT(*) FROM users WHERE wallet_address = ?1",
        rusqlite::params![address],
        |r| r.get(0),
      )?)
    })
    .await
    .unwrap()
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_unknown_wallet_returns_none() {
  let s = store().await;
  let result = s.get_score(wallet("0xunknown-wallet")).await.unwrap();
  assert!(result.is_none());
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_creates_record_then_get_returns_it() {
  let s = store().await;

  let stored = s.upsert_score(wallet("0xaaaaaaaaaa"), score(150.0)).await.unwrap();
  assert_eq!(stored.wallet_address, "0xaaaaaaaaaa");
  assert_eq!(stored.score.get(), 150.0);

  let fetched = s.get_score(wallet("0xaaaaaaaaaa")).await.unwrap().unwrap();
  assert_eq!(fetched, stored);
}

#[tokio::test]
async fn second_upsert_replaces_score_without_duplicating() {
  let s = store().await;

  s.upsert_score(wallet("0xbbbbbbbbbb"), score(10.0)).await.unwrap();
  let second = s.upsert_score(wallet("0xbbbbbbbbbb"), score(3.0)).await.unwrap();
  assert_eq!(second.score.get(), 3.0);

  let fetched = s.get_score(wallet("0xbbbbbbbbbb")).await.unwrap().unwrap();
  assert_eq!(fetched.score.get(), 3.0);
  assert_eq!(row_count(&s, "0xbbbbbbbbbb").await, 1);
}

#[tokio::test]
async fn upsert_refreshes_updated_at() {
  let s = store().await;

  let first = s.upsert_score(wallet("0xcccccccccc"), score(1.0)).await.unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  let second = s.upsert_score(wallet("0xcccccccccc"), score(2.0)).await.unwrap();

  assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn wallets_are_independent() {
  let s = store().await;

  s.upsert_score(wallet("0x1111111111"), score(1.0)).await.unwrap();
  s.upsert_score(wallet("0x2222222222"), score(2.0)).await.unwrap();

  let a = s.get_score(wallet("0x1111111111")).await.unwrap().unwrap();
  let b = s.get_score(wallet("0x2222222222")).await.unwrap().unwrap();
  assert_eq!((a.score.get(), b.score.get()), (1.0, 2.0));
}

#[tokio::test]
async fn zero_fractional_and_large_scores_round_trip() {
  let s = store().await;

  for value in [0.0, 0.25, 1234.5, 1e300] {
    s.upsert_score(wallet("0xdddddddddd"), score(value)).await.unwrap();
    let fetched = s.get_score(wallet("0xdddddddddd")).await.unwrap().unwrap();
    assert_eq!(fetched.score.get(), value);
  }
  assert_eq!(row_count(&s, "0xdddddddddd").await, 1);
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upserts_keep_one_record_per_wallet() {
  let s = Arc::new(store().await);

  let handles: Vec<_> = (0..32_u32)
    .map(|n| {
      let s = Arc::clone(&s);
      tokio::spawn(async move {
        s.upsert_score(wallet("0xconcurrent"), score(f64::from(n))).await.unwrap()
      })
    })
    .collect();

  let mut written = Vec::new();
  for h in handles {
    written.push(h.await.unwrap().score);
  }

  assert_eq!(row_count(&s, "0xconcurrent").await, 1);

  // Last write wins: the surviving score is one of the submitted values.
  let fetched = s.get_score(wallet("0xconcurrent")).await.unwrap().unwrap();
  assert!(written.contains(&fetched.score));
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn schema_rejects_negative_scores() {
  let s = store().await;

  let result = s
    .conn
    .call(|conn| {
      Ok(conn.execute(
        "INSERT INTO users (wallet_address, score, updated_at)
         VALUES ('0xnegative00', -1, '2024-01-01T00:00:00+00:00')",
        [],
      )?)
    })
    .await;
  assert!(result.is_err());
}

#[tokio::test]
async fn reopening_schema_is_idempotent() {
  let s = store().await;
  s.upsert_score(wallet("0xeeeeeeeeee"), score(9.0)).await.unwrap();

  s.init_schema().await.unwrap();

  let fetched = s.get_score(wallet("0xeeeeeeeeee")).await.unwrap().unwrap();
  assert_eq!(fetched.score.get(), 9.0);
}

#[tokio::test]
async fn corrupt_timestamp_surfaces_as_error() {
  let s = store().await;

  s.conn
    .call(|conn| {
      conn.execute(
        "INSERT INTO users (wallet_address, score, updated_at)
         VALUES ('0xbadtimestamp', 5, 'yesterday')",
        [],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let result = s.get_score(wallet("0xbadtimestamp")).await;
  assert!(matches!(result, Err(Error::DateParse(_))));
}

#[tokio::test]
async fn open_on_disk_persists_across_handles() {
  let dir = std::env::temp_dir().join(format!("scorekeep-test-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("scores.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert_score(wallet("0xpersisted0"), score(77.0)).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get_score(wallet("0xpersisted0")).await.unwrap().unwrap();
  assert_eq!(fetched.score.get(), 77.0);

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn negative_stored_score_surfaces_as_corrupt() {
  let s = store().await;

  s.conn
    .call(|conn| {
      conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO users (wallet_address, score, updated_at)
         VALUES ('0xnegativerow', -3.5, '2024-01-01T00:00:00+00:00');
         PRAGMA ignore_check_constraints = OFF;",
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let result = s.get_score(wallet("0xnegativerow")).await;
  let Err(Error::CorruptScore { wallet: bad_wallet, score: bad_score }) = &result else {
    panic!("expected CorruptScore, got {result:?}");
  };
  assert_eq!(bad_wallet, "0xnegativerow");
  assert_eq!(*bad_score, -3.5);
}
