//! Plain-text rendering for terminal output.

use std::fmt::Write as _;

use foodshare_core::{
  aggregate::{DashboardView, GroupCount},
  filter::{ALL, FilterOptions},
  table::Table,
};

/// Render `table` with left-aligned, space-padded columns and a dashed rule
/// under the header.
pub fn table(table: &Table) -> String {
  if table.columns.is_empty() {
    return "(no columns)\n".to_string();
  }

  let cells: Vec<Vec<String>> = table
    .rows
    .iter()
    .map(|row| row.iter().map(ToString::to_string).collect())
    .collect();

  let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
  for row in &cells {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  push_line(&mut out, table.columns.iter().map(String::as_str), &widths);
  let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
  push_line(&mut out, rule.iter().map(String::as_str), &widths);
  for row in &cells {
    push_line(&mut out, row.iter().map(String::as_str), &widths);
  }
  if cells.is_empty() {
    out.push_str("(no rows)\n");
  }
  out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
  let line = cells
    .zip(widths)
    .map(|(c, &w)| format!("{c:<w$}"))
    .collect::<Vec<_>>()
    .join("  ");
  out.push_str(line.trim_end());
  out.push('\n');
}

fn group_counts(out: &mut String, heading: &str, groups: &[GroupCount]) {
  let _ = writeln!(out, "{heading}");
  for g in groups {
    let _ = writeln!(out, "  {:<24} {}", g.key, g.count);
  }
}

pub fn dashboard(view: &DashboardView) -> String {
  if !view.has_listings {
    return "No food listings available. Populate the database first.\n".to_string();
  }

  let mut out = String::new();
  let _ = writeln!(out, "Total listings: {}\n", view.total_listings);
  group_counts(&mut out, "Top food types", &view.food_types);
  group_counts(&mut out, "\nListings per city", &view.cities);

  let _ = writeln!(out, "\nQuantity per provider (top {})", view.top_providers.len());
  for p in &view.top_providers {
    let _ = writeln!(out, "  {:<24} {}", p.provider_id.to_string(), p.total_quantity);
  }

  let _ = writeln!(out, "\nExpiry dates distribution");
  for (day, count) in &view.expiry_distribution {
    let _ = writeln!(out, "  {day}  {count}");
  }
  out
}

pub fn filter_options(opts: &FilterOptions) -> String {
  let mut out = String::new();
  for (label, values) in [
    ("City", &opts.cities),
    ("Provider Type", &opts.provider_types),
    ("Food Type", &opts.food_types),
    ("Meal Type", &opts.meal_types),
  ] {
    let choices: Vec<&str> = std::iter::once(ALL).chain(values.iter().map(String::as_str)).collect();
    let _ = writeln!(out, "{label}: {}", choices.join(", "));
  }
  out
}

#[cfg(test)]
mod tests {
  use foodshare_core::table::Cell;

  use super::*;

  #[test]
  fn columns_are_padded_to_widest_cell() {
    let t = Table::new(vec!["id".into(), "name".into()], vec![
      vec![Cell::Integer(1), Cell::from("Green Bistro")],
      vec![Cell::Integer(22), Cell::Null],
    ]);
    assert_eq!(
      table(&t),
      "id  name\n--  ------------\n1   Green Bistro\n22\n"
    );
  }

  #[test]
  fn empty_tables_say_so() {
    assert_eq!(table(&Table::empty()), "(no columns)\n");
    let t = Table::new(vec!["status".into()], vec![]);
    assert!(table(&t).ends_with("(no rows)\n"));
  }

  #[test]
  fn empty_dashboard_shows_hint() {
    let view = DashboardView {
      total_listings:      0,
      has_listings:        false,
      food_types:          vec![],
      cities:              vec![],
      top_providers:       vec![],
      expiry_distribution: Default::default(),
    };
    assert!(dashboard(&view).starts_with("No food listings"));
  }
}
