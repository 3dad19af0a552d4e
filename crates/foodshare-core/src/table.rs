//! Dynamically-typed tables as read from the store.
//!
//! Tables are loaded verbatim: whatever columns the store returns are kept, in
//! order, and every value is one of the SQLite storage classes. Engines look
//! columns up by name and never assume a fixed schema.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A single value in a [`Table`].
///
/// Serialises as a bare JSON scalar (`null`, number, string) so rows render
/// naturally in API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
  Blob(Vec<u8>),
}

impl Cell {
  pub fn is_null(&self) -> bool { matches!(self, Self::Null) }

  /// Numeric value of an integer or real cell.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Self::Integer(i) => Some(*i as f64),
      Self::Real(r) => Some(*r),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Text(s) => Some(s),
      _ => None,
    }
  }

  /// Display text used for equality filters and grouping keys. `None` for
  /// NULL.
  pub fn key_text(&self) -> Option<String> {
    match self {
      Self::Null => None,
      other => Some(other.to_string()),
    }
  }

  fn rank(&self) -> u8 {
    match self {
      Self::Null => 0,
      Self::Integer(_) | Self::Real(_) => 1,
      Self::Text(_) => 2,
      Self::Blob(_) => 3,
    }
  }

  /// Total order over cells, following SQLite's cross-class ordering:
  /// NULL < numbers < text < blobs.
  pub fn total_cmp(&self, other: &Self) -> Ordering {
    match (self, other) {
      (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
      (Self::Text(a), Self::Text(b)) => a.cmp(b),
      (Self::Blob(a), Self::Blob(b)) => a.cmp(b),
      (a, b) if a.rank() == 1 && b.rank() == 1 => {
        let (x, y) = (a.as_f64().unwrap_or_default(), b.as_f64().unwrap_or_default());
        x.total_cmp(&y)
      }
      (a, b) => a.rank().cmp(&b.rank()),
    }
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Null => Ok(()),
      Self::Integer(i) => write!(f, "{i}"),
      Self::Real(r) => write!(f, "{r}"),
      Self::Text(s) => f.write_str(s),
      Self::Blob(b) => write!(f, "<{} bytes>", b.len()),
    }
  }
}

impl From<&str> for Cell {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for Cell {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<i64> for Cell {
  fn from(i: i64) -> Self { Self::Integer(i) }
}

impl From<f64> for Cell {
  fn from(r: f64) -> Self { Self::Real(r) }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// Column names plus rows of cells. Every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
  pub columns: Vec<String>,
  pub rows:    Vec<Vec<Cell>>,
}

impl Table {
  pub const fn empty() -> Self {
    Self { columns: Vec::new(), rows: Vec::new() }
  }

  pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
    Self { columns, rows }
  }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  pub fn column_index(&self, name: &str) -> Option<usize> {
    self.columns.iter().position(|c| c == name)
  }

  /// Iterate one column's cells, or `None` if the column is absent.
  pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Cell> + 'a> {
    let idx = self.column_index(name)?;
    Some(self.rows.iter().filter_map(move |row| row.get(idx)))
  }

  /// A table with the same columns and only the rows `keep` accepts.
  pub fn retain_rows(&self, mut keep: impl FnMut(&[Cell]) -> bool) -> Self {
    Self {
      columns: self.columns.clone(),
      rows:    self.rows.iter().filter(|r| keep(r)).cloned().collect(),
    }
  }
}

// ─── Table names ─────────────────────────────────────────────────────────────

/// The four tables the dashboard knows about, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
  Providers,
  Receivers,
  FoodListings,
  Claims,
}

impl TableName {
  pub const ALL: [TableName; 4] = [
    TableName::Providers,
    TableName::Receivers,
    TableName::FoodListings,
    TableName::Claims,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Providers => "providers",
      Self::Receivers => "receivers",
      Self::FoodListings => "food_listings",
      Self::Claims => "claims",
    }
  }
}

impl fmt::Display for TableName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cells_serialise_as_bare_scalars() {
    let row = vec![Cell::Null, Cell::Integer(3), Cell::Real(1.5), Cell::from("x")];
    let json = serde_json::to_string(&row).unwrap();
    assert_eq!(json, r#"[null,3,1.5,"x"]"#);

    let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, row);
  }

  #[test]
  fn total_cmp_orders_across_storage_classes() {
    let mut cells = vec![
      Cell::from("b"),
      Cell::Integer(2),
      Cell::Null,
      Cell::Real(1.5),
      Cell::from("a"),
    ];
    cells.sort_by(Cell::total_cmp);
    assert_eq!(cells, vec![
      Cell::Null,
      Cell::Real(1.5),
      Cell::Integer(2),
      Cell::from("a"),
      Cell::from("b"),
    ]);
  }

  #[test]
  fn missing_column_is_none() {
    let t = Table::new(vec!["a".into()], vec![vec![Cell::Integer(1)]]);
    assert!(t.column("b").is_none());
    assert_eq!(t.column("a").unwrap().count(), 1);
  }
}
