//! Handlers for the report catalog.
//!
//! Reports always run against the store, never the cached snapshot.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use foodshare_core::{
  Error,
  report::{CATALOG, ReportOutcome, ReportSpec},
  session::Session,
  store::DonationStore,
  table::Table,
};

use crate::error::ApiError;

/// `GET /reports`: the catalog entries (key, title, columns).
pub async fn catalog() -> Json<&'static [ReportSpec]> { Json(CATALOG) }

/// `GET /reports/{key}`: 404 for an unknown key; a failing query is a 500
/// carrying the underlying error text.
pub async fn run_one<S>(
  State(session): State<Arc<Session<S>>>,
  Path(key): Path<String>,
) -> Result<Json<Table>, ApiError>
where
  S: DonationStore,
{
  match session.run_report(&key).await {
    Ok(table) => Ok(Json(table)),
    Err(e @ Error::UnknownReport(_)) => Err(e.into()),
    Err(e) => Err(ApiError::Report(e.to_string())),
  }
}

/// `GET /reports/run-all`: every report, each with its own status.
pub async fn run_all<S>(State(session): State<Arc<Session<S>>>) -> Json<Vec<ReportOutcome>>
where
  S: DonationStore,
{
  Json(session.run_all_reports().await)
}
