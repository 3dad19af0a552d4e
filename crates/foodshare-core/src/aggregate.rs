//! Grouped counts and sums over the listings snapshot, for charting.
//!
//! Every function here is pure and deterministic: equal inputs give equal
//! outputs regardless of row order.

use std::{
  cmp::Ordering,
  collections::{BTreeMap, HashMap},
};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
  entity::columns,
  load::Snapshot,
  table::{Cell, Table},
};

/// Number of providers shown in the quantity chart.
pub const TOP_PROVIDER_LIMIT: usize = 10;

// ─── Group counts ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
  pub key:   String,
  pub count: usize,
}

/// Count rows per non-null value of `column`, most frequent first, ties by
/// key ascending.
pub fn count_by(listings: &Table, column: &str) -> Vec<GroupCount> {
  let Some(cells) = listings.column(column) else { return Vec::new() };

  let mut counts: HashMap<String, usize> = HashMap::new();
  for key in cells.filter_map(Cell::key_text) {
    *counts.entry(key).or_default() += 1;
  }

  let mut groups: Vec<GroupCount> = counts
    .into_iter()
    .map(|(key, count)| GroupCount { key, count })
    .collect();
  groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
  groups
}

pub fn count_by_food_type(listings: &Table) -> Vec<GroupCount> {
  count_by(listings, columns::FOOD_TYPE)
}

pub fn count_by_city(listings: &Table) -> Vec<GroupCount> {
  count_by(listings, columns::LOCATION)
}

// ─── Provider quantities ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderQuantity {
  pub provider_id:    Cell,
  pub total_quantity: f64,
}

/// Map key ordering cells by [`Cell::total_cmp`], so `1` and `1.0` group
/// together.
struct CellKey(Cell);

impl PartialEq for CellKey {
  fn eq(&self, other: &Self) -> bool { self.cmp(other).is_eq() }
}

impl Eq for CellKey {}

impl PartialOrd for CellKey {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for CellKey {
  fn cmp(&self, other: &Self) -> Ordering { self.0.total_cmp(&other.0) }
}

/// Sum `quantity` per non-null `provider_id` and keep the `limit` largest.
///
/// Ordered by descending total; equal totals are ordered by provider id
/// ascending so truncation is deterministic. Non-numeric quantities count as
/// zero.
pub fn top_providers_by_quantity(listings: &Table, limit: usize) -> Vec<ProviderQuantity> {
  let Some(id_idx) = listings.column_index(columns::PROVIDER_ID) else { return Vec::new() };
  let qty_idx = listings.column_index(columns::QUANTITY);

  let mut sums: BTreeMap<CellKey, f64> = BTreeMap::new();
  for row in &listings.rows {
    let Some(id) = row.get(id_idx).filter(|c| !c.is_null()) else { continue };
    let qty = qty_idx
      .and_then(|i| row.get(i))
      .and_then(Cell::as_f64)
      .unwrap_or(0.0);

    *sums.entry(CellKey(id.clone())).or_default() += qty;
  }

  let mut totals: Vec<ProviderQuantity> = sums
    .into_iter()
    .map(|(CellKey(provider_id), total_quantity)| ProviderQuantity { provider_id, total_quantity })
    .collect();
  totals.sort_by(|a, b| {
    b.total_quantity
      .total_cmp(&a.total_quantity)
      .then_with(|| a.provider_id.total_cmp(&b.provider_id))
  });
  totals.truncate(limit);
  totals
}

// ─── Expiry distribution ─────────────────────────────────────────────────────

const DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a date-like text cell to its calendar day. Non-text cells and
/// unrecognised text yield `None`.
pub fn parse_expiry(cell: &Cell) -> Option<NaiveDate> {
  let s = cell.as_str()?.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.date_naive());
  }
  DATETIME_FORMATS
    .iter()
    .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    .map(|dt| dt.date())
    .or_else(|| DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(s, f).ok()))
}

/// Count listings per expiry day, chronologically. Unparseable expiry values
/// are dropped silently.
pub fn expiry_distribution(listings: &Table) -> BTreeMap<NaiveDate, usize> {
  let mut out = BTreeMap::new();
  if let Some(cells) = listings.column(columns::EXPIRY_DATE) {
    for day in cells.filter_map(parse_expiry) {
      *out.entry(day).or_default() += 1;
    }
  }
  out
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Every chart series on the dashboard, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
  pub total_listings:      usize,
  pub has_listings:        bool,
  pub food_types:          Vec<GroupCount>,
  pub cities:              Vec<GroupCount>,
  pub top_providers:       Vec<ProviderQuantity>,
  pub expiry_distribution: BTreeMap<NaiveDate, usize>,
}

pub fn dashboard(snapshot: &Snapshot) -> DashboardView {
  let listings = snapshot.listings();
  DashboardView {
    total_listings:      listings.len(),
    has_listings:        !listings.is_empty(),
    food_types:          count_by_food_type(listings),
    cities:              count_by_city(listings),
    top_providers:       top_providers_by_quantity(listings, TOP_PROVIDER_LIMIT),
    expiry_distribution: expiry_distribution(listings),
  }
}
