//! Raw snapshot access and manual refresh.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use foodshare_core::{load::Snapshot, session::Session, store::DonationStore};

/// `GET /tables`: every table with its load status.
pub async fn raw<S>(State(session): State<Arc<Session<S>>>) -> Json<Snapshot>
where
  S: DonationStore,
{
  Json(Snapshot::clone(&*session.snapshot().await))
}

/// `POST /refresh`: drop the cached snapshot.
pub async fn refresh<S>(State(session): State<Arc<Session<S>>>) -> StatusCode
where
  S: DonationStore,
{
  session.invalidate().await;
  StatusCode::NO_CONTENT
}
