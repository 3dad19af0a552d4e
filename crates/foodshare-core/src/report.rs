//! The report catalog: named, parameterless queries run against the store.
//!
//! Reports bypass the snapshot cache and always see the latest committed
//! state. Each catalog entry declares the columns its query returns; a result
//! with any other shape is rejected. New reports are added as catalog entries
//! only.

use serde::Serialize;

use crate::{Error, Result, store::DonationStore, table::Table};

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSpec {
  /// Stable identifier used in URLs and on the command line.
  pub key:     &'static str,
  pub title:   &'static str,
  #[serde(skip)]
  pub sql:     &'static str,
  pub columns: &'static [&'static str],
}

pub const CATALOG: &[ReportSpec] = &[
  ReportSpec {
    key:     "city-counts",
    title:   "Providers and receivers count per city",
    sql:     "SELECT city,
                (SELECT COUNT(1) FROM providers p WHERE p.city = city_table.city) AS providers_count,
                (SELECT COUNT(1) FROM receivers r WHERE r.city = city_table.city) AS receivers_count
              FROM (SELECT city FROM providers UNION SELECT city FROM receivers) AS city_table",
    columns: &["city", "providers_count", "receivers_count"],
  },
  ReportSpec {
    key:     "provider-type-contribution",
    title:   "Total quantity contributed per provider type",
    sql:     "SELECT provider_type AS provider_type, SUM(quantity) AS total_quantity
              FROM food_listings
              GROUP BY provider_type
              ORDER BY total_quantity DESC, provider_type",
    columns: &["provider_type", "total_quantity"],
  },
  ReportSpec {
    key:     "top-receivers-by-claims",
    title:   "Receivers with the most claims",
    sql:     "SELECT r.receiver_id AS receiver_id, r.name AS name, COUNT(c.claim_id) AS claims_count
              FROM receivers r
              JOIN claims c ON c.receiver_id = r.receiver_id
              GROUP BY r.receiver_id, r.name
              ORDER BY claims_count DESC, r.receiver_id
              LIMIT 10",
    columns: &["receiver_id", "name", "claims_count"],
  },
  ReportSpec {
    key:     "listings-per-city",
    title:   "Food listings per city",
    sql:     "SELECT location AS location, COUNT(1) AS listings_count
              FROM food_listings
              GROUP BY location
              ORDER BY listings_count DESC, location",
    columns: &["location", "listings_count"],
  },
  ReportSpec {
    key:     "total-quantity",
    title:   "Total quantity available",
    sql:     "SELECT SUM(quantity) AS total_quantity FROM food_listings",
    columns: &["total_quantity"],
  },
  ReportSpec {
    key:     "common-food-types",
    title:   "Most common food types",
    sql:     "SELECT food_type AS food_type, COUNT(1) AS listings_count
              FROM food_listings
              GROUP BY food_type
              ORDER BY listings_count DESC, food_type",
    columns: &["food_type", "listings_count"],
  },
  ReportSpec {
    key:     "claims-per-food",
    title:   "Claims per food item",
    sql:     "SELECT f.food_id AS food_id, f.food_name AS food_name, COUNT(c.claim_id) AS claims_count
              FROM food_listings f
              JOIN claims c ON c.food_id = f.food_id
              GROUP BY f.food_id, f.food_name
              ORDER BY claims_count DESC, f.food_id",
    columns: &["food_id", "food_name", "claims_count"],
  },
  ReportSpec {
    key:     "completed-claims-by-provider",
    title:   "Providers with the most completed claims",
    sql:     "SELECT p.provider_id AS provider_id, p.name AS name, COUNT(c.claim_id) AS completed_claims
              FROM claims c
              JOIN food_listings f ON f.food_id = c.food_id
              JOIN providers p ON p.provider_id = f.provider_id
              WHERE c.status = 'Completed'
              GROUP BY p.provider_id, p.name
              ORDER BY completed_claims DESC, p.provider_id",
    columns: &["provider_id", "name", "completed_claims"],
  },
  ReportSpec {
    key:     "claim-status-distribution",
    title:   "Claim status distribution",
    sql:     "SELECT status AS status, COUNT(1) AS count FROM claims GROUP BY status",
    columns: &["status", "count"],
  },
  ReportSpec {
    key:     "claims-per-meal-type",
    title:   "Claims per meal type",
    sql:     "SELECT f.meal_type AS meal_type, COUNT(c.claim_id) AS claims_count
              FROM claims c
              JOIN food_listings f ON f.food_id = c.food_id
              GROUP BY f.meal_type
              ORDER BY claims_count DESC, f.meal_type",
    columns: &["meal_type", "claims_count"],
  },
  ReportSpec {
    key:     "quantity-per-provider",
    title:   "Total quantity donated per provider",
    sql:     "SELECT p.provider_id AS provider_id, p.name AS name, SUM(f.quantity) AS total_quantity
              FROM providers p
              JOIN food_listings f ON f.provider_id = p.provider_id
              GROUP BY p.provider_id, p.name
              ORDER BY total_quantity DESC, p.provider_id",
    columns: &["provider_id", "name", "total_quantity"],
  },
];

pub fn find_report(key: &str) -> Option<&'static ReportSpec> {
  CATALOG.iter().find(|r| r.key == key)
}

// ─── Execution ───────────────────────────────────────────────────────────────

/// Run one report directly against `store`.
pub async fn run_report<S: DonationStore>(store: &S, spec: &ReportSpec) -> Result<Table> {
  let table = store.query(spec.sql).await.map_err(Error::store)?;

  if table.columns.iter().map(String::as_str).ne(spec.columns.iter().copied()) {
    return Err(Error::ShapeMismatch {
      key:      spec.key,
      expected: spec.columns.iter().map(|c| c.to_string()).collect(),
      actual:   table.columns,
    });
  }
  Ok(table)
}

/// Outcome of one catalog entry when running the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOutcome {
  pub key:    &'static str,
  pub title:  &'static str,
  #[serde(flatten)]
  pub status: ReportStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportStatus {
  Ok { table: Table },
  Failed { message: String },
}

/// Run every catalog entry. A failing report is recorded with its error
/// message and the remaining reports still run.
pub async fn run_catalog<S: DonationStore>(store: &S) -> Vec<ReportOutcome> {
  let mut outcomes = Vec::with_capacity(CATALOG.len());
  for spec in CATALOG {
    let status = match run_report(store, spec).await {
      Ok(table) => ReportStatus::Ok { table },
      Err(e) => {
        tracing::info!(report = spec.key, error = %e, "report failed");
        ReportStatus::Failed { message: e.to_string() }
      }
    };
    outcomes.push(ReportOutcome { key: spec.key, title: spec.title, status });
  }
  outcomes
}
