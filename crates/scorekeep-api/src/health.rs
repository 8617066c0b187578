//! Handler for `GET /health`.
//!
//! Liveness only; never touches the store.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status:    &'static str,
  /// RFC 3339, UTC, millisecond precision.
  pub timestamp: String,
}

/// `GET /health`
pub async fn handler() -> Json<HealthResponse> {
  Json(HealthResponse {
    status:    "healthy",
    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
  })
}
