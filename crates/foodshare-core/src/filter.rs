//! Equality filters over the listings table.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{entity::columns, table::Table};

/// Sentinel the shells use for "no constraint".
pub const ALL: &str = "All";

// ─── Selection ───────────────────────────────────────────────────────────────

/// One filter parameter: either unconstrained or an exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
  #[default]
  All,
  Only(String),
}

impl Selection {
  /// Interpret user input. `"All"` and the empty string mean no constraint.
  pub fn parse(value: &str) -> Self {
    if value.is_empty() || value == ALL {
      Self::All
    } else {
      Self::Only(value.to_owned())
    }
  }
}

impl From<Option<&str>> for Selection {
  fn from(value: Option<&str>) -> Self { value.map_or(Self::All, Self::parse) }
}

// ─── ListingFilter ───────────────────────────────────────────────────────────

/// The four listing predicates, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
  /// Matched against the `location` column.
  pub city:          Selection,
  pub provider_type: Selection,
  pub food_type:     Selection,
  pub meal_type:     Selection,
}

impl ListingFilter {
  fn predicates(&self) -> [(&'static str, &Selection); 4] {
    [
      (columns::LOCATION, &self.city),
      (columns::PROVIDER_TYPE, &self.provider_type),
      (columns::FOOD_TYPE, &self.food_type),
      (columns::MEAL_TYPE, &self.meal_type),
    ]
  }
}

/// Keep the listings matching every constrained predicate.
///
/// Row order and columns are preserved. A constraint on a column the table
/// lacks matches nothing; NULL cells never match.
pub fn filter_listings(listings: &Table, filter: &ListingFilter) -> Table {
  let mut constraints = Vec::new();
  for (column, selection) in filter.predicates() {
    let Selection::Only(value) = selection else { continue };
    match listings.column_index(column) {
      Some(idx) => constraints.push((idx, value.as_str())),
      None => return Table::new(listings.columns.clone(), Vec::new()),
    }
  }

  listings.retain_rows(|row| {
    constraints.iter().all(|&(idx, value)| {
      row
        .get(idx)
        .and_then(|cell| cell.key_text())
        .is_some_and(|text| text == value)
    })
  })
}

// ─── Options ─────────────────────────────────────────────────────────────────

/// Distinct non-null values per filter column, sorted. Computed from the
/// unfiltered listings; shells prepend [`ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
  pub cities:         Vec<String>,
  pub provider_types: Vec<String>,
  pub food_types:     Vec<String>,
  pub meal_types:     Vec<String>,
}

pub fn filter_options(listings: &Table) -> FilterOptions {
  let distinct = |column: &str| -> Vec<String> {
    listings
      .column(column)
      .map(|cells| cells.filter_map(|c| c.key_text()).collect::<BTreeSet<_>>())
      .unwrap_or_default()
      .into_iter()
      .collect()
  };

  FilterOptions {
    cities:         distinct(columns::LOCATION),
    provider_types: distinct(columns::PROVIDER_TYPE),
    food_types:     distinct(columns::FOOD_TYPE),
    meal_types:     distinct(columns::MEAL_TYPE),
  }
}
