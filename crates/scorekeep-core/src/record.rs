//! Wallet addresses, scores, and the stored score record.
//!
//! `WalletAddress` and `Score` can only be built through their validating
//! constructors, so anything reaching a [`ScoreStore`](crate::store::ScoreStore)
//! has already passed the boundary checks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{Error, Result};

// ─── Wallet address ──────────────────────────────────────────────────────────

/// An opaque wallet identifier of at least [`WalletAddress::MIN_LEN`]
/// UTF-16 code units, the unit browser clients measure strings in. Not parsed
/// for structure and never trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
  pub const MIN_LEN: usize = 10;

  pub fn parse(raw: impl Into<String>) -> Result<Self> {
    let raw = raw.into();
    if raw.encode_utf16().count() < Self::MIN_LEN {
      return Err(Error::InvalidWallet("shorter than 10 characters"));
    }
    Ok(Self(raw))
  }

  /// Validate a wallet taken from an untyped JSON body.
  pub fn from_json(value: &Value) -> Result<Self> {
    match value {
      Value::String(s) => Self::parse(s.as_str()),
      _ => Err(Error::InvalidWallet("not a string")),
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_inner(self) -> String { self.0 }
}

impl fmt::Display for WalletAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Score ───────────────────────────────────────────────────────────────────

/// A non-negative, finite score. Fractions are allowed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Score(f64);

impl Score {
  pub const ZERO: Score = Score(0.0);

  pub fn new(value: f64) -> Result<Self> {
    if !value.is_finite() {
      return Err(Error::InvalidScore("not a finite number"));
    }
    if value < 0.0 {
      return Err(Error::InvalidScore("negative"));
    }
    // Normalise -0.0 so it renders as 0.
    Ok(Self(value + 0.0))
  }

  /// Validate a score taken from an untyped JSON body.
  pub fn from_json(value: &Value) -> Result<Self> {
    match value {
      Value::Number(n) => match n.as_f64() {
        Some(f) => Self::new(f),
        None => Err(Error::InvalidScore("not a finite number")),
      },
      _ => Err(Error::InvalidScore("not a number")),
    }
  }

  pub fn get(self) -> f64 { self.0 }

  /// Whole scores that fit in a `u64`, rendered without a fractional part.
  fn as_whole(self) -> Option<u64> {
    // 2^64 is the first float past u64::MAX.
    (self.0.fract() == 0.0 && self.0 < u64::MAX as f64).then_some(self.0 as u64)
  }
}

/// Whole scores serialise as JSON integers (`250`, not `250.0`).
impl Serialize for Score {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match self.as_whole() {
      Some(n) => serializer.serialize_u64(n),
      None => serializer.serialize_f64(self.0),
    }
  }
}

impl fmt::Display for Score {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.as_whole() {
      Some(n) => write!(f, "{n}"),
      None => write!(f, "{}", self.0),
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One row of the score table. At most one exists per wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
  pub wallet_address: String,
  pub score:          Score,
  /// Server-assigned time of the last write.
  pub updated_at:     DateTime<Utc>,
}
