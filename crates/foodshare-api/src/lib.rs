//! JSON HTTP API for the food donation dashboard.
//!
//! Exposes an axum [`Router`] over a [`Session`]; one route group per
//! dashboard view. Rendering is the client's concern.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let session = Arc::new(Session::new(store, ttl));
//! axum::serve(listener, foodshare_api::api_router(session)).await?;
//! ```

pub mod dashboard;
pub mod error;
pub mod listings;
pub mod people;
pub mod reports;
pub mod tables;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use foodshare_core::{session::Session, store::DonationStore};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build the API router for `session`.
pub fn api_router<S>(session: Arc<Session<S>>) -> Router<()>
where
  S: DonationStore + 'static,
{
  Router::new()
    // Dashboard
    .route("/dashboard", get(dashboard::show::<S>))
    // Listings and claims
    .route("/listings", get(listings::list::<S>))
    .route("/listings/options", get(listings::options::<S>))
    .route("/claims", post(listings::claim::<S>))
    // Providers and receivers
    .route("/providers", get(people::list_providers::<S>).post(people::create_provider::<S>))
    .route("/receivers", get(people::list_receivers::<S>).post(people::create_receiver::<S>))
    // Reports
    .route("/reports", get(reports::catalog))
    .route("/reports/run-all", get(reports::run_all::<S>))
    .route("/reports/{key}", get(reports::run_one::<S>))
    // Raw tables
    .route("/tables", get(tables::raw::<S>))
    .route("/refresh", post(tables::refresh::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(session)
}
