//! Snapshot loading with per-table failure isolation.
//!
//! A failed table never aborts the load. It is recorded as
//! [`LoadOutcome::Failed`] and reads as an empty table, so callers keep
//! rendering with partial data while still being able to tell a failed load
//! from a table that simply has no rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  store::DonationStore,
  table::{Table, TableName},
};

static EMPTY_TABLE: Table = Table::empty();

// ─── LoadOutcome ─────────────────────────────────────────────────────────────

/// Result of loading one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
  Loaded { table: Table },
  Failed { reason: String },
}

impl LoadOutcome {
  /// The loaded table, or an empty one if the load failed.
  pub fn table(&self) -> &Table {
    match self {
      Self::Loaded { table } => table,
      Self::Failed { .. } => &EMPTY_TABLE,
    }
  }

  pub fn is_failed(&self) -> bool { matches!(self, Self::Failed { .. }) }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// In-memory copy of all four tables taken at `loaded_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  pub loaded_at: DateTime<Utc>,
  pub tables:    BTreeMap<TableName, LoadOutcome>,
}

impl Snapshot {
  pub fn outcome(&self, name: TableName) -> Option<&LoadOutcome> { self.tables.get(&name) }

  /// The named table; empty if it failed to load or is missing.
  pub fn table(&self, name: TableName) -> &Table {
    self.outcome(name).map_or(&EMPTY_TABLE, LoadOutcome::table)
  }

  pub fn listings(&self) -> &Table { self.table(TableName::FoodListings) }
}

/// Load every known table from `store`.
///
/// Each table is read independently; a failure is logged and recorded for
/// that table only.
pub async fn load_snapshot<S: DonationStore>(store: &S) -> Snapshot {
  let mut tables = BTreeMap::new();

  for name in TableName::ALL {
    let outcome = match store.load_table(name).await {
      Ok(table) => LoadOutcome::Loaded { table },
      Err(e) => {
        tracing::warn!(table = %name, error = %e, "table load failed; using empty table");
        LoadOutcome::Failed { reason: e.to_string() }
      }
    };
    tables.insert(name, outcome);
  }

  Snapshot { loaded_at: Utc::now(), tables }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::table::Cell;

  #[test]
  fn failed_outcome_reads_as_empty_table() {
    let failed = LoadOutcome::Failed { reason: "no such table: claims".into() };
    assert!(failed.is_failed());
    assert!(failed.table().is_empty());

    let empty = LoadOutcome::Loaded { table: Table::new(vec!["a".into()], vec![]) };
    assert!(!empty.is_failed());
    assert!(empty.table().is_empty());
  }

  #[test]
  fn snapshot_missing_table_is_empty() {
    let mut tables = BTreeMap::new();
    tables.insert(TableName::Providers, LoadOutcome::Loaded {
      table: Table::new(vec!["provider_id".into()], vec![vec![Cell::Integer(1)]]),
    });
    let snap = Snapshot { loaded_at: Utc::now(), tables };

    assert_eq!(snap.table(TableName::Providers).len(), 1);
    assert!(snap.listings().is_empty());
    assert!(snap.outcome(TableName::Claims).is_none());
  }
}
