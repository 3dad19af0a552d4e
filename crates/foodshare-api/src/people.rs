//! Handlers for `/providers` and `/receivers`.
//!
//! `GET` returns the table from the current snapshot; `POST` appends a row and
//! returns it with its assigned identity.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use foodshare_core::{
  entity::{NewProvider, NewReceiver},
  session::Session,
  store::DonationStore,
  table::{Table, TableName},
};

use crate::error::ApiError;

async fn snapshot_table<S: DonationStore>(session: &Session<S>, name: TableName) -> Table {
  session.snapshot().await.table(name).clone()
}

/// `GET /providers`
pub async fn list_providers<S>(State(session): State<Arc<Session<S>>>) -> Json<Table>
where
  S: DonationStore,
{
  Json(snapshot_table(&session, TableName::Providers).await)
}

/// `POST /providers`, body `{"name":..,"type":..,"address":..,"city":..,"contact":..}`
pub async fn create_provider<S>(
  State(session): State<Arc<Session<S>>>,
  Json(body): Json<NewProvider>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DonationStore,
{
  let provider = session.add_provider(body).await?;
  Ok((StatusCode::CREATED, Json(provider)))
}

/// `GET /receivers`
pub async fn list_receivers<S>(State(session): State<Arc<Session<S>>>) -> Json<Table>
where
  S: DonationStore,
{
  Json(snapshot_table(&session, TableName::Receivers).await)
}

/// `POST /receivers`, body `{"name":..,"type":..,"city":..,"contact":..}`
pub async fn create_receiver<S>(
  State(session): State<Arc<Session<S>>>,
  Json(body): Json<NewReceiver>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DonationStore,
{
  let receiver = session.add_receiver(body).await?;
  Ok((StatusCode::CREATED, Json(receiver)))
}
