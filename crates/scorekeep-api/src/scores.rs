//! Handlers for the score endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/get-score` | `?wallet` required; 404 if the wallet was never written |
//! | `POST` | `/update-score` | Body: `{"wallet": "...", "score": 42.5}`; upserts |

use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
};
use scorekeep_core::{
  record::{Score, WalletAddress},
  store::ScoreStore,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AppState, error::ApiError};

// ─── Get ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GetScoreParams {
  pub wallet: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GetScoreResponse {
  pub success: bool,
  pub wallet:  String,
  pub score:   Score,
}

/// `GET /get-score?wallet=<address>`
pub async fn get_score<S>(
  State(state): State<AppState<S>>,
  params: Result<Query<GetScoreParams>, QueryRejection>,
) -> Result<Json<GetScoreResponse>, ApiError>
where
  S: ScoreStore,
{
  let raw = match params {
    Ok(Query(GetScoreParams { wallet: Some(w) })) => w,
    Ok(_) => return Err(ApiError::InvalidWallet("missing".into())),
    Err(rejection) => return Err(ApiError::InvalidWallet(rejection.body_text())),
  };
  let wallet = WalletAddress::parse(raw)?;

  let record = state
    .store
    .get_score(wallet)
    .await
    .map_err(|e| ApiError::store(e, state.expose_error_details))?
    .ok_or(ApiError::NotFound)?;

  Ok(Json(GetScoreResponse {
    success: true,
    wallet:  record.wallet_address,
    score:   record.score,
  }))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreResponse {
  pub success:   bool,
  pub wallet:    String,
  pub new_score: Score,
  pub message:   &'static str,
}

/// `POST /update-score` — body: `{"wallet": "...", "score": <number>}`
///
/// The body is taken as untyped JSON and validated field by field, so a
/// mistyped field is reported as the matching 400 rather than a generic
/// deserialisation failure.
pub async fn update_score<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateScoreResponse>, ApiError>
where
  S: ScoreStore,
{
  let Json(body) = body.map_err(|r| ApiError::InvalidBody(r.body_text()))?;
  let Value::Object(mut fields) = body else {
    return Err(ApiError::InvalidBody("expected a JSON object".into()));
  };

  let raw_wallet = fields.remove("wallet").unwrap_or(Value::Null);
  let raw_score = fields.remove("score").unwrap_or(Value::Null);
  tracing::info!(wallet = %raw_wallet, score = %raw_score, "update request");

  let wallet = WalletAddress::from_json(&raw_wallet)?;
  let score = Score::from_json(&raw_score)?;

  let record = state
    .store
    .upsert_score(wallet, score)
    .await
    .map_err(|e| ApiError::store(e, state.expose_error_details))?;

  Ok(Json(UpdateScoreResponse {
    success:   true,
    wallet:    record.wallet_address,
    new_score: record.score,
    message:   "Score updated successfully",
  }))
}
