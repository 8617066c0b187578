//! CORS policy built from the configured origin allow-list.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// The configured origins with blank entries dropped, or `None` when any
/// origin is allowed (no entries left, or a `*` entry).
pub fn restricted_origins(origins: &[String]) -> Option<Vec<&str>> {
  let listed: Vec<&str> = origins
    .iter()
    .map(|o| o.trim())
    .filter(|o| !o.is_empty())
    .collect();

  if listed.is_empty() || listed.contains(&"*") {
    None
  } else {
    Some(listed)
  }
}

/// Build a [`CorsLayer`] for the configured origins; see
/// [`restricted_origins`]. Fails on an origin that is not a valid header value.
pub fn layer(origins: &[String]) -> Result<CorsLayer, header::InvalidHeaderValue> {
  let allow_origin = match restricted_origins(origins) {
    None => AllowOrigin::any(),
    Some(listed) => AllowOrigin::list(
      listed
        .into_iter()
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()?,
    ),
  };

  Ok(
    CorsLayer::new()
      .allow_origin(allow_origin)
      .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
      .allow_headers([header::CONTENT_TYPE]),
  )
}
