//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("invalid wallet address: {0}")]
  InvalidWallet(String),

  #[error("invalid score value: {0}")]
  InvalidScore(String),

  #[error("invalid request body: {0}")]
  InvalidBody(String),

  /// The wallet has no record. Clients treat this as a score of zero.
  #[error("user not found")]
  NotFound,

  #[error("endpoint not found")]
  EndpointNotFound,

  #[error("store error: {source}")]
  Store {
    #[source]
    source:         Box<dyn std::error::Error + Send + Sync>,
    /// Include the store error message in the response body.
    expose_details: bool,
  },
}

impl ApiError {
  pub fn store<E>(err: E, expose_details: bool) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store { source: Box::new(err), expose_details }
  }
}

impl From<scorekeep_core::Error> for ApiError {
  fn from(err: scorekeep_core::Error) -> Self {
    match err {
      scorekeep_core::Error::InvalidWallet(m) => ApiError::InvalidWallet(m.to_owned()),
      scorekeep_core::Error::InvalidScore(m) => ApiError::InvalidScore(m.to_owned()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if !matches!(self, ApiError::Store { .. }) {
      tracing::debug!(error = %self, "rejecting request");
    }
    let (status, body) = match &self {
      ApiError::InvalidWallet(_) => (
        StatusCode::BAD_REQUEST,
        json!({
          "success": false,
          "error":   "Invalid wallet address",
          "details": "Wallet address must be a valid string",
        }),
      ),
      ApiError::InvalidScore(_) => (
        StatusCode::BAD_REQUEST,
        json!({
          "success": false,
          "error":   "Invalid score value",
          "details": "Score must be a non-negative number",
        }),
      ),
      ApiError::InvalidBody(m) => (
        StatusCode::BAD_REQUEST,
        json!({
          "success": false,
          "error":   "Invalid request body",
          "details": m,
        }),
      ),
      ApiError::NotFound => (
        StatusCode::NOT_FOUND,
        json!({
          "success": false,
          "error":   "User not found",
          "message": "Starting from score 0",
        }),
      ),
      ApiError::EndpointNotFound => (
        StatusCode::NOT_FOUND,
        json!({ "success": false, "error": "Endpoint not found" }),
      ),
      ApiError::Store { source, expose_details } => {
        tracing::error!(error = %source, "store failure");
        let mut body = json!({ "success": false, "error": "Internal server error" });
        if *expose_details {
          body["details"] = json!(source.to_string());
        }
        (StatusCode::INTERNAL_SERVER_ERROR, body)
      }
    };
    (status, Json(body)).into_response()
  }
}
