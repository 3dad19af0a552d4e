//! [`Session`]: the context object the presentation surfaces talk to.
//!
//! A session owns the store handle and the snapshot cache. Reads go through
//! the cache; reports go straight to the store; every successful insert
//! invalidates the cache before returning, so the next read reloads.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
  Error, Result,
  aggregate::{self, DashboardView},
  cache::SnapshotCache,
  entity::{Claim, NewClaim, NewProvider, NewReceiver, Provider, Receiver},
  filter::{self, FilterOptions, ListingFilter},
  load::{Snapshot, load_snapshot},
  report::{self, ReportOutcome},
  store::DonationStore,
  table::Table,
};

/// The listings view: the unfiltered total plus the filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingsView {
  pub total:    usize,
  pub filtered: Table,
}

pub struct Session<S> {
  store: S,
  cache: Mutex<SnapshotCache>,
}

impl<S: DonationStore> Session<S> {
  pub fn new(store: S, ttl: Duration) -> Self {
    Self { store, cache: Mutex::new(SnapshotCache::new(ttl)) }
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Snapshot ──────────────────────────────────────────────────────────────

  /// The cached snapshot, reloading it if absent or expired.
  ///
  /// The cache lock is held across the reload so concurrent callers wait for
  /// a single load.
  pub async fn snapshot(&self) -> Arc<Snapshot> {
    let mut cache = self.cache.lock().await;
    if let Some(snapshot) = cache.get(Instant::now()) {
      tracing::debug!("snapshot cache hit");
      return snapshot;
    }

    tracing::debug!("snapshot cache miss; loading tables");
    let snapshot = Arc::new(load_snapshot(&self.store).await);
    cache.put(Instant::now(), Arc::clone(&snapshot));
    snapshot
  }

  /// Discard the cached snapshot and load a fresh one.
  pub async fn reload(&self) -> Arc<Snapshot> {
    self.invalidate().await;
    self.snapshot().await
  }

  pub async fn invalidate(&self) { self.cache.lock().await.invalidate(); }

  // ── Views ─────────────────────────────────────────────────────────────────

  pub async fn dashboard(&self) -> DashboardView { aggregate::dashboard(&*self.snapshot().await) }

  pub async fn listings(&self, criteria: &ListingFilter) -> ListingsView {
    let snapshot = self.snapshot().await;
    let listings = snapshot.listings();
    ListingsView {
      total:    listings.len(),
      filtered: filter::filter_listings(listings, criteria),
    }
  }

  pub async fn filter_options(&self) -> FilterOptions {
    filter::filter_options(self.snapshot().await.listings())
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  /// Run the catalog report named `key` against the store.
  pub async fn run_report(&self, key: &str) -> Result<Table> {
    let spec = report::find_report(key).ok_or_else(|| Error::UnknownReport(key.to_owned()))?;
    report::run_report(&self.store, spec).await
  }

  pub async fn run_all_reports(&self) -> Vec<ReportOutcome> { report::run_catalog(&self.store).await }

  // ── Mutations ─────────────────────────────────────────────────────────────

  pub async fn add_provider(&self, input: NewProvider) -> Result<Provider> {
    let provider = self.store.insert_provider(input).await.map_err(Error::store)?;
    self.invalidate().await;
    tracing::info!(provider_id = provider.provider_id, "provider added");
    Ok(provider)
  }

  pub async fn add_receiver(&self, input: NewReceiver) -> Result<Receiver> {
    let receiver = self.store.insert_receiver(input).await.map_err(Error::store)?;
    self.invalidate().await;
    tracing::info!(receiver_id = receiver.receiver_id, "receiver added");
    Ok(receiver)
  }

  pub async fn submit_claim(&self, input: NewClaim) -> Result<Claim> {
    let claim = self.store.insert_claim(input).await.map_err(Error::store)?;
    self.invalidate().await;
    tracing::info!(
      claim_id = claim.claim_id,
      food_id = claim.food_id,
      receiver_id = claim.receiver_id,
      "claim submitted"
    );
    Ok(claim)
  }
}
