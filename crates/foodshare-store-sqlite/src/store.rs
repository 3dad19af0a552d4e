//! [`SqliteStore`], the SQLite implementation of [`DonationStore`].

use std::path::Path;

use chrono::{Local, SubsecRound as _};
use foodshare_core::{
  entity::{
    CLAIM_STATUS_PENDING, Claim, NewClaim, NewProvider, NewReceiver, Provider, Receiver,
  },
  store::DonationStore,
  table::{Table, TableName},
};

use crate::{
  Error, Result,
  encode::{decode_value, encode_timestamp},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A donation store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open an existing database at `path`. The schema is not touched; tables
  /// that are missing surface as per-table load failures.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Ok(Self { conn })
  }

  /// Open an in-memory store with the bootstrap schema. Useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.bootstrap().await?;
    Ok(store)
  }

  /// Create any of the four tables that do not exist yet.
  pub async fn bootstrap(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run raw SQL against the connection; tests use it to seed or break tables.
  #[cfg(test)]
  pub(crate) async fn execute_batch(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `sql` and collect every row, keeping the column names SQLite reports.
  ///
  /// Statements that would write to the database are rejected before they
  /// are stepped.
  async fn read_table(&self, sql: String) -> Result<Table> {
    let table = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        if !stmt.readonly() {
          return Ok(Err(sql));
        }

        let columns: Vec<String> =
          stmt.column_names().into_iter().map(str::to_owned).collect();
        let width = columns.len();

        let rows = stmt
          .query_map([], |row| {
            (0..width)
              .map(|i| row.get_ref(i).map(decode_value))
              .collect::<rusqlite::Result<Vec<_>>>()
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Ok(Table::new(columns, rows)))
      })
      .await?;
    table.map_err(Error::NotReadOnly)
  }
}

// ─── DonationStore impl ──────────────────────────────────────────────────────

impl DonationStore for SqliteStore {
  type Error = crate::Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn load_table(&self, table: TableName) -> Result<Table> {
    self.read_table(format!("SELECT * FROM {}", table.as_str())).await
  }

  async fn query(&self, sql: &'static str) -> Result<Table> {
    self.read_table(sql.to_owned()).await
  }

  // ── Inserts ───────────────────────────────────────────────────────────────

  async fn insert_provider(&self, input: NewProvider) -> Result<Provider> {
    let row = input.clone();

    let provider_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO providers (name, type, address, city, contact)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![row.name, row.kind, row.address, row.city, row.contact],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Provider::from_new(provider_id, input))
  }

  async fn insert_receiver(&self, input: NewReceiver) -> Result<Receiver> {
    let row = input.clone();

    let receiver_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO receivers (name, type, city, contact) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.name, row.kind, row.city, row.contact],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Receiver::from_new(receiver_id, input))
  }

  async fn insert_claim(&self, input: NewClaim) -> Result<Claim> {
    let timestamp   = Local::now().naive_local().trunc_subsecs(6);
    let ts_str      = encode_timestamp(timestamp);
    let food_id     = input.food_id();
    let receiver_id = input.receiver_id();

    let claim_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO claims (food_id, receiver_id, status, timestamp)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![food_id, receiver_id, CLAIM_STATUS_PENDING, ts_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Claim {
      claim_id,
      food_id,
      receiver_id,
      status: CLAIM_STATUS_PENDING.to_owned(),
      timestamp,
    })
  }
}
