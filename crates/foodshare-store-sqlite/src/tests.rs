//! Integration tests for `SqliteStore` and `Session` against an in-memory
//! database.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, SubsecRound as _};
use foodshare_core::{
  Error as CoreError,
  entity::{NewClaim, NewProvider, NewReceiver},
  filter::{ListingFilter, Selection},
  load::{LoadOutcome, load_snapshot},
  report::{CATALOG, ReportStatus, run_catalog},
  session::Session,
  store::DonationStore,
  table::{Cell, TableName},
};

use crate::{SqliteStore, TIMESTAMP_FORMAT};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

const SEED: &str = "
INSERT INTO providers (provider_id, name, type, address, city, contact) VALUES
  (1, 'Green Bistro',  'Restaurant',    '1 Elm St',  'Springfield', '555-0001'),
  (2, 'Corner Market', 'Grocery Store', '2 Oak St',  'Shelbyville', '555-0002'),
  (3, 'Big Mart',      'Supermarket',   '3 Pine St', 'Springfield', '555-0003');

INSERT INTO receivers (receiver_id, name, type, city, contact) VALUES
  (1, 'Hope Shelter', 'Shelter',   'Springfield', '555-1001'),
  (2, 'Food Bank',    'NGO',       'Capital City', '555-1002');

INSERT INTO food_listings
  (food_id, food_name, quantity, expiry_date, provider_id, provider_type, location, food_type, meal_type)
VALUES
  (1, 'Bread',  10, '2024-01-01', 1, 'Restaurant',    'Springfield', 'Vegetarian',     'Breakfast'),
  (2, 'Soup',   25, '2024-01-01', 1, 'Restaurant',    'Springfield', 'Vegan',          'Lunch'),
  (3, 'Apples', 40, '2024-01-02', 2, 'Grocery Store', 'Shelbyville', 'Vegan',          'Snacks'),
  (4, 'Chicken', 5, 'bad-date',   3, 'Supermarket',   'Springfield', 'Non-Vegetarian', 'Dinner');

INSERT INTO claims (claim_id, food_id, receiver_id, status, timestamp) VALUES
  (1, 2, 1, 'Completed', '2024-01-01 09:00:00.000000'),
  (2, 3, 1, 'Pending',   '2024-01-01 10:00:00.000000'),
  (3, 3, 2, 'Cancelled', '2024-01-01 11:00:00.000000');
";

async fn seeded() -> SqliteStore {
  let s = store().await;
  s.execute_batch(SEED).await.expect("seed");
  s
}

fn session(store: SqliteStore) -> Session<SqliteStore> {
  Session::new(store, Duration::from_secs(3600))
}

fn town_provider() -> NewProvider {
  NewProvider {
    name:    "A".into(),
    kind:    "Restaurant".into(),
    address: "1 Main St".into(),
    city:    "Town".into(),
    contact: "555-0100".into(),
  }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_loads_every_table_empty() {
  let s = store().await;
  let snap = load_snapshot(&s).await;

  for name in TableName::ALL {
    let outcome = snap.outcome(name).expect("table present");
    assert!(!outcome.is_failed(), "{name} failed to load");
    assert!(outcome.table().is_empty());
    assert!(!outcome.table().columns.is_empty());
  }
}

#[tokio::test]
async fn missing_table_fails_in_isolation() {
  let s = seeded().await;
  s.execute_batch("DROP TABLE claims;").await.unwrap();

  let snap = load_snapshot(&s).await;
  let claims = snap.outcome(TableName::Claims).unwrap();
  assert!(matches!(claims, LoadOutcome::Failed { reason } if reason.contains("claims")));
  assert!(snap.table(TableName::Claims).is_empty());

  assert_eq!(snap.table(TableName::Providers).len(), 3);
  assert_eq!(snap.listings().len(), 4);
}

#[tokio::test]
async fn load_keeps_store_columns_in_order() {
  let s = seeded().await;
  let t = s.load_table(TableName::Providers).await.unwrap();
  assert_eq!(t.columns, ["provider_id", "name", "type", "address", "city", "contact"]);
  assert_eq!(t.rows[0][0], Cell::Integer(1));
  assert_eq!(t.rows[0][1], Cell::from("Green Bistro"));
}

// ─── Inserts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn inserted_provider_appears_on_reload() {
  let s = store().await;
  let provider = s.insert_provider(town_provider()).await.unwrap();
  assert!(provider.provider_id >= 1);

  let t = s.load_table(TableName::Providers).await.unwrap();
  assert_eq!(t.len(), 1);
  assert_eq!(t.rows[0], vec![
    Cell::Integer(provider.provider_id),
    Cell::from("A"),
    Cell::from("Restaurant"),
    Cell::from("1 Main St"),
    Cell::from("Town"),
    Cell::from("555-0100"),
  ]);
}

#[tokio::test]
async fn inserted_receiver_gets_identity() {
  let s = seeded().await;
  let receiver = s
    .insert_receiver(NewReceiver {
      name:    "Night Kitchen".into(),
      kind:    "Charity".into(),
      city:    "Springfield".into(),
      contact: String::new(),
    })
    .await
    .unwrap();
  assert_eq!(receiver.receiver_id, 3);
  assert_eq!(s.load_table(TableName::Receivers).await.unwrap().len(), 3);
}

#[tokio::test]
async fn claim_is_pending_and_timestamped_now() {
  let s = store().await;
  let before = Local::now().naive_local().trunc_subsecs(6);
  let claim = s.insert_claim(NewClaim::new(3, 7).unwrap()).await.unwrap();
  let after = Local::now().naive_local();

  assert_eq!(claim.status, "Pending");
  assert_eq!((claim.food_id, claim.receiver_id), (3, 7));
  assert!(before <= claim.timestamp && claim.timestamp <= after);

  let t = s.load_table(TableName::Claims).await.unwrap();
  let row = &t.rows[0];
  let status = t.column_index("status").unwrap();
  let ts = t.column_index("timestamp").unwrap();
  assert_eq!(row[status], Cell::from("Pending"));

  let stored = NaiveDateTime::parse_from_str(row[ts].as_str().unwrap(), TIMESTAMP_FORMAT).unwrap();
  assert_eq!(stored, claim.timestamp);
}

#[tokio::test]
async fn claim_with_dangling_references_is_accepted() {
  let s = seeded().await;
  let claim = s.insert_claim(NewClaim::new(999, 999).unwrap()).await.unwrap();
  assert_eq!(claim.food_id, 999);
}

#[tokio::test]
async fn insert_into_missing_table_errors() {
  let s = store().await;
  s.execute_batch("DROP TABLE providers;").await.unwrap();
  assert!(s.insert_provider(town_provider()).await.is_err());
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn every_report_runs_on_seeded_store() {
  let s = seeded().await;
  let outcomes = run_catalog(&s).await;
  assert_eq!(outcomes.len(), CATALOG.len());

  for outcome in &outcomes {
    assert!(
      matches!(outcome.status, ReportStatus::Ok { .. }),
      "{} failed: {:?}",
      outcome.key,
      outcome.status
    );
  }
}

#[tokio::test]
async fn report_values_reflect_store() {
  let session = session(seeded().await);

  let total = session.run_report("total-quantity").await.unwrap();
  assert_eq!(total.rows, vec![vec![Cell::Integer(80)]]);

  let statuses = session.run_report("claim-status-distribution").await.unwrap();
  assert_eq!(statuses.len(), 3);

  let completed = session.run_report("completed-claims-by-provider").await.unwrap();
  assert_eq!(completed.rows, vec![vec![
    Cell::Integer(1),
    Cell::from("Green Bistro"),
    Cell::Integer(1),
  ]]);

  let cities = session.run_report("city-counts").await.unwrap();
  let springfield = cities
    .rows
    .iter()
    .find(|r| r[0] == Cell::from("Springfield"))
    .unwrap();
  assert_eq!(springfield[1..], [Cell::Integer(2), Cell::Integer(1)]);
}

#[tokio::test]
async fn report_failure_is_isolated() {
  let s = seeded().await;
  s.execute_batch("DROP TABLE claims;").await.unwrap();

  let outcomes = run_catalog(&s).await;
  let status_of = |key: &str| &outcomes.iter().find(|o| o.key == key).unwrap().status;

  assert!(matches!(
    status_of("claim-status-distribution"),
    ReportStatus::Failed { message } if message.contains("claims")
  ));
  assert!(matches!(status_of("total-quantity"), ReportStatus::Ok { .. }));
  assert!(matches!(status_of("city-counts"), ReportStatus::Ok { .. }));
  assert!(matches!(status_of("quantity-per-provider"), ReportStatus::Ok { .. }));
}

#[tokio::test]
async fn query_refuses_statements_that_write() {
  let s = seeded().await;

  for sql in ["DROP TABLE claims", "DELETE FROM providers", "UPDATE claims SET status = 'Completed'"] {
    assert!(matches!(s.query(sql).await, Err(crate::Error::NotReadOnly(_))), "{sql}");
  }

  let claims = s.load_table(TableName::Claims).await.unwrap();
  assert_eq!(claims.len(), 3);
  assert_eq!(claims.column("status").unwrap().filter(|c| c.as_str() == Some("Completed")).count(), 1);
  assert_eq!(s.load_table(TableName::Providers).await.unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_report_is_rejected() {
  let session = session(store().await);
  assert!(matches!(session.run_report("nope").await, Err(CoreError::UnknownReport(_))));
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_mutation_invalidates_cache() {
  let session = session(store().await);
  assert!(session.snapshot().await.table(TableName::Providers).is_empty());

  session.add_provider(town_provider()).await.unwrap();
  assert_eq!(session.snapshot().await.table(TableName::Providers).len(), 1);

  session.add_receiver(NewReceiver::default()).await.unwrap();
  assert_eq!(session.snapshot().await.table(TableName::Receivers).len(), 1);

  session.submit_claim(NewClaim::new(1, 1).unwrap()).await.unwrap();
  assert_eq!(session.snapshot().await.table(TableName::Claims).len(), 1);
}

#[tokio::test]
async fn session_serves_cached_snapshot_until_reload() {
  let session = session(store().await);
  let first = session.snapshot().await;

  // Written behind the session's back: the cache does not know.
  session.store().insert_provider(town_provider()).await.unwrap();
  let cached = session.snapshot().await;
  assert_eq!(cached.loaded_at, first.loaded_at);
  assert!(cached.table(TableName::Providers).is_empty());

  // Reports bypass the cache.
  let counts = session.run_report("city-counts").await.unwrap();
  assert_eq!(counts.len(), 1);

  let fresh = session.reload().await;
  assert_eq!(fresh.table(TableName::Providers).len(), 1);
}

#[tokio::test]
async fn zero_ttl_session_always_reloads() {
  let session = Session::new(store().await, Duration::ZERO);
  session.snapshot().await;
  session.store().insert_provider(town_provider()).await.unwrap();
  assert_eq!(session.snapshot().await.table(TableName::Providers).len(), 1);
}

#[tokio::test]
async fn session_listings_and_dashboard() {
  let session = session(seeded().await);

  let view = session
    .listings(&ListingFilter {
      city: Selection::parse("Springfield"),
      food_type: Selection::parse("Vegan"),
      ..Default::default()
    })
    .await;
  assert_eq!(view.total, 4);
  assert_eq!(view.filtered.len(), 1);

  let opts = session.filter_options().await;
  assert_eq!(opts.cities, vec!["Shelbyville", "Springfield"]);

  let dash = session.dashboard().await;
  assert_eq!(dash.total_listings, 4);
  assert_eq!(dash.food_types[0].key, "Vegan");
  assert_eq!(dash.food_types[0].count, 2);
  assert_eq!(dash.top_providers[0].provider_id, Cell::Integer(2));
  assert_eq!(dash.top_providers[0].total_quantity, 40.0);
  assert_eq!(dash.top_providers[1].provider_id, Cell::Integer(1));
  assert_eq!(dash.expiry_distribution.values().sum::<usize>(), 3);
}
