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
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("Query failed: {0}")]
  Report(String),

  #[error("store error: {0}")]
  Store(#[source] foodshare_core::Error),
}

impl From<foodshare_core::Error> for ApiError {
  fn from(e: foodshare_core::Error) -> Self {
    use foodshare_core::Error as E;
    match e {
      E::InvalidInput(m) => ApiError::BadRequest(m),
      E::UnknownReport(key) => ApiError::NotFound(format!("report {key:?} not found")),
      other @ E::ShapeMismatch { .. } => ApiError::Report(other.to_string()),
      other @ E::Store(_) => ApiError::Store(other),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Report(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match &self {
      ApiError::NotFound(m) | ApiError::BadRequest(m) => m.clone(),
      other => other.to_string(),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
