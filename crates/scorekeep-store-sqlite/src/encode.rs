//! Conversions between domain types and the plain-text SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use scorekeep_core::record::{Score, ScoreRecord};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// A `users` row exactly as read from SQLite.
pub struct RawRecord {
  pub wallet_address: String,
  pub score:          f64,
  pub updated_at:     String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      wallet_address: row.get(0)?,
      score:          row.get(1)?,
      updated_at:     row.get(2)?,
    })
  }

  pub fn into_record(self) -> Result<ScoreRecord> {
    let Ok(score) = Score::new(self.score) else {
      return Err(Error::CorruptScore {
        wallet: self.wallet_address,
        score:  self.score,
      });
    };
    Ok(ScoreRecord {
      updated_at:     decode_dt(&self.updated_at)?,
      wallet_address: self.wallet_address,
      score,
    })
  }
}
