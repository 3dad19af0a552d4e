//! `GET /dashboard`: aggregate series for the charts.

use std::sync::Arc;

use axum::{Json, extract::State};
use foodshare_core::{aggregate::DashboardView, session::Session, store::DonationStore};

pub async fn show<S>(State(session): State<Arc<Session<S>>>) -> Json<DashboardView>
where
  S: DonationStore,
{
  Json(session.dashboard().await)
}
