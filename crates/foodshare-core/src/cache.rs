//! Time-bounded holder for the most recent [`Snapshot`].

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use crate::load::Snapshot;

/// Default snapshot time-to-live.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Holds at most one snapshot together with the instant it was stored.
///
/// Callers pass `now` explicitly so expiry can be tested without sleeping.
#[derive(Debug)]
pub struct SnapshotCache {
  ttl:   Duration,
  entry: Option<(Instant, Arc<Snapshot>)>,
}

impl SnapshotCache {
  /// A zero `ttl` disables caching: every lookup misses.
  pub fn new(ttl: Duration) -> Self { Self { ttl, entry: None } }

  /// The cached snapshot if it was stored less than `ttl` before `now`.
  pub fn get(&self, now: Instant) -> Option<Arc<Snapshot>> {
    let (stored_at, snapshot) = self.entry.as_ref()?;
    (now.saturating_duration_since(*stored_at) < self.ttl).then(|| Arc::clone(snapshot))
  }

  pub fn put(&mut self, now: Instant, snapshot: Arc<Snapshot>) {
    self.entry = Some((now, snapshot));
  }

  pub fn invalidate(&mut self) { self.entry = None; }
}

impl Default for SnapshotCache {
  fn default() -> Self { Self::new(DEFAULT_TTL) }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn snapshot() -> Arc<Snapshot> {
    Arc::new(Snapshot { loaded_at: Utc::now(), tables: Default::default() })
  }

  #[test]
  fn hit_within_ttl_miss_after() {
    let mut cache = SnapshotCache::new(Duration::from_secs(60));
    let t0 = Instant::now();
    assert!(cache.get(t0).is_none());

    cache.put(t0, snapshot());
    assert!(cache.get(t0).is_some());
    assert!(cache.get(t0 + Duration::from_secs(59)).is_some());
    assert!(cache.get(t0 + Duration::from_secs(60)).is_none());
  }

  #[test]
  fn invalidate_clears_entry() {
    let mut cache = SnapshotCache::default();
    let t0 = Instant::now();
    cache.put(t0, snapshot());
    cache.invalidate();
    assert!(cache.get(t0).is_none());
  }

  #[test]
  fn zero_ttl_never_hits() {
    let mut cache = SnapshotCache::new(Duration::ZERO);
    let t0 = Instant::now();
    cache.put(t0, snapshot());
    assert!(cache.get(t0).is_none());
  }
}
