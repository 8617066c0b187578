//! JSON HTTP API for the scorekeep service.
//!
//! Exposes an axum [`Router`] backed by any [`ScoreStore`]. The listener,
//! configuration loading, and store construction belong to the binary.

pub mod cors;
pub mod error;
pub mod health;
pub mod scores;

use std::sync::Arc;

use axum::{
  Router,
  http::header::InvalidHeaderValue,
  routing::{get, post},
};
use scorekeep_core::store::ScoreStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ScoreStore> {
  pub store:                Arc<S>,
  /// Add store error messages to 500 responses. Development only.
  pub expose_error_details: bool,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the bare API router for `state`, without HTTP middleware.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ScoreStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/get-score", get(scores::get_score::<S>))
    .route("/update-score", post(scores::update_score::<S>))
    .route("/health", get(health::handler))
    .fallback(endpoint_not_found)
    .method_not_allowed_fallback(endpoint_not_found)
    .with_state(state)
}

/// Build the router wrapped in the CORS and request-tracing layers.
///
/// An empty `allowed_origins` list allows any origin.
pub fn app<S>(
  state: AppState<S>,
  allowed_origins: &[String],
) -> Result<Router, InvalidHeaderValue>
where
  S: ScoreStore + Clone + Send + Sync + 'static,
{
  let cors = cors::layer(allowed_origins)?;
  Ok(
    router(state)
      .layer(cors)
      .layer(TraceLayer::new_for_http()),
  )
}

async fn endpoint_not_found() -> ApiError { ApiError::EndpointNotFound }
