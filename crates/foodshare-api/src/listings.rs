//! Handlers for listings and claims.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/listings` | `?city=&provider_type=&food_type=&meal_type=`; absent or `All` is unconstrained |
//! | `GET`  | `/listings/options` | Distinct values per filter column |
//! | `POST` | `/claims` | Body: `{"food_id":3,"receiver_id":7}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use foodshare_core::{
  entity::NewClaim,
  filter::{FilterOptions, ListingFilter, Selection},
  session::{ListingsView, Session},
  store::DonationStore,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub city:          Option<String>,
  pub provider_type: Option<String>,
  pub food_type:     Option<String>,
  pub meal_type:     Option<String>,
}

impl ListParams {
  fn to_filter(&self) -> ListingFilter {
    ListingFilter {
      city:          Selection::from(self.city.as_deref()),
      provider_type: Selection::from(self.provider_type.as_deref()),
      food_type:     Selection::from(self.food_type.as_deref()),
      meal_type:     Selection::from(self.meal_type.as_deref()),
    }
  }
}

/// `GET /listings`
pub async fn list<S>(
  State(session): State<Arc<Session<S>>>,
  Query(params): Query<ListParams>,
) -> Json<ListingsView>
where
  S: DonationStore,
{
  Json(session.listings(&params.to_filter()).await)
}

/// `GET /listings/options`
pub async fn options<S>(State(session): State<Arc<Session<S>>>) -> Json<FilterOptions>
where
  S: DonationStore,
{
  Json(session.filter_options().await)
}

// ─── Claim ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ClaimBody {
  pub food_id:     i64,
  pub receiver_id: i64,
}

/// `POST /claims`: 400 if either id is below 1.
pub async fn claim<S>(
  State(session): State<Arc<Session<S>>>,
  Json(body): Json<ClaimBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DonationStore,
{
  let input = NewClaim::new(body.food_id, body.receiver_id)?;
  let claim = session.submit_claim(input).await?;
  Ok((StatusCode::CREATED, Json(claim)))
}
