//! The `DonationStore` trait.
//!
//! Implemented by storage backends (e.g. `foodshare-store-sqlite`). The
//! engines and the [`Session`](crate::session::Session) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  entity::{Claim, NewClaim, NewProvider, NewReceiver, Provider, Receiver},
  table::{Table, TableName},
};

/// Abstraction over the relational store holding the four donation tables.
///
/// Reads return whole tables. Writes are single autocommitted inserts; rows
/// are never updated or deleted.
pub trait DonationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Read every row of `table`, unordered.
  fn load_table(
    &self,
    table: TableName,
  ) -> impl Future<Output = Result<Table, Self::Error>> + Send + '_;

  /// Run a query and return its rows with the column names the store
  /// reports. Statements that would modify the store are rejected with an
  /// error and have no effect.
  fn query(
    &self,
    sql: &'static str,
  ) -> impl Future<Output = Result<Table, Self::Error>> + Send + '_;

  // ── Inserts ───────────────────────────────────────────────────────────

  /// Append a provider; the identity is assigned by the store.
  fn insert_provider(
    &self,
    input: NewProvider,
  ) -> impl Future<Output = Result<Provider, Self::Error>> + Send + '_;

  /// Append a receiver; the identity is assigned by the store.
  fn insert_receiver(
    &self,
    input: NewReceiver,
  ) -> impl Future<Output = Result<Receiver, Self::Error>> + Send + '_;

  /// Append a claim with status `"Pending"` and the current local time.
  /// Referenced listing and receiver are not checked for existence.
  fn insert_claim(
    &self,
    input: NewClaim,
  ) -> impl Future<Output = Result<Claim, Self::Error>> + Send + '_;
}
