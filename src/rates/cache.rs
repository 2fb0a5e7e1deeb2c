//! Time-to-live cache for rate snapshots
//!
//! The cache is an ordinary value owned by whoever refreshes rates. Callers pass
//! `now` in explicitly so refresh decisions are deterministic under test.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};

use super::loader;
use super::RateSnapshot;
use crate::error::Result;

/// Default lifetime of a fetched snapshot (one hour)
pub const DEFAULT_CACHE_TTL_SECS: i64 = 3600;

/// Anything that can produce a fresh rate snapshot
pub trait RateSource {
    fn fetch(&self) -> Result<RateSnapshot>;
}

/// Source that always returns the same snapshot
#[derive(Debug, Clone)]
pub struct StaticRateSource(pub RateSnapshot);

impl RateSource for StaticRateSource {
    fn fetch(&self) -> Result<RateSnapshot> {
        Ok(self.0.clone())
    }
}

/// Source backed by a `rates.csv` file, re-read on every fetch
#[derive(Debug, Clone)]
pub struct CsvRateSource {
    path: PathBuf,
}

impl CsvRateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RateSource for CsvRateSource {
    fn fetch(&self) -> Result<RateSnapshot> {
        loader::load_rate_snapshot(&self.path)
    }
}

/// Last good snapshot plus the moment it was fetched
#[derive(Debug, Clone)]
pub struct RateCache {
    snapshot: Option<RateSnapshot>,
    fetched_at: Option<DateTime<Utc>>,
    ttl: Duration,
}

impl RateCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            snapshot: None,
            fetched_at: None,
            ttl,
        }
    }

    /// Seed the cache with a known snapshot
    pub fn with_snapshot(snapshot: RateSnapshot, fetched_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            snapshot: Some(snapshot),
            fetched_at: Some(fetched_at),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn last_good(&self) -> Option<&RateSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// True while the cached snapshot is younger than the TTL
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match (&self.snapshot, self.fetched_at) {
            (Some(_), Some(at)) => now.signed_duration_since(at) < self.ttl,
            _ => false,
        }
    }

    /// Store a freshly fetched snapshot
    pub fn store(&mut self, snapshot: RateSnapshot, now: DateTime<Utc>) {
        self.snapshot = Some(snapshot);
        self.fetched_at = Some(now);
    }

    /// Return the cached snapshot while fresh, otherwise refresh from `source`.
    ///
    /// A failed fetch never propagates: the last good snapshot is returned, or the
    /// static defaults if nothing was ever fetched. The timestamp is left untouched
    /// so the next call retries.
    pub fn get_or_refresh(&mut self, now: DateTime<Utc>, source: &dyn RateSource) -> RateSnapshot {
        if self.is_fresh(now) {
            if let Some(snapshot) = &self.snapshot {
                return snapshot.clone();
            }
        }

        match source.fetch() {
            Ok(snapshot) => {
                info!("rate snapshot refreshed at {}", now);
                self.store(snapshot.clone(), now);
                snapshot
            }
            Err(e) => match &self.snapshot {
                Some(snapshot) => {
                    warn!("rate refresh failed ({}), keeping snapshot from {:?}", e, self.fetched_at);
                    snapshot.clone()
                }
                None => {
                    warn!("rate refresh failed ({}), using static defaults", e);
                    RateSnapshot::defaults()
                }
            },
        }
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_CACHE_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use crate::error::FlowError;
    use chrono::TimeZone;
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<u32>,
        eur: f64,
    }

    impl RateSource for CountingSource {
        fn fetch(&self) -> Result<RateSnapshot> {
            self.calls.set(self.calls.get() + 1);
            Ok(RateSnapshot::defaults().with_rate(Currency::EUR, self.eur))
        }
    }

    struct FailingSource;

    impl RateSource for FailingSource {
        fn fetch(&self) -> Result<RateSnapshot> {
            Err(FlowError::Parse("offline".to_string()))
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_snapshot_is_reused() {
        let mut cache = RateCache::default();
        let source = CountingSource { calls: Cell::new(0), eur: 100.0 };

        cache.get_or_refresh(t0(), &source);
        cache.get_or_refresh(t0() + Duration::minutes(59), &source);
        assert_eq!(source.calls.get(), 1);

        cache.get_or_refresh(t0() + Duration::minutes(60), &source);
        assert_eq!(source.calls.get(), 2);
    }

    #[test]
    fn test_failure_falls_back_to_last_good() {
        let snapshot = RateSnapshot::defaults().with_rate(Currency::EUR, 105.0);
        let mut cache = RateCache::with_snapshot(snapshot, t0(), Duration::hours(1));

        let later = t0() + Duration::hours(2);
        let got = cache.get_or_refresh(later, &FailingSource);
        assert_eq!(got.rate(Currency::EUR).unwrap(), 105.0);
        assert_eq!(cache.fetched_at(), Some(t0()));
        assert!(!cache.is_fresh(later));
    }

    #[test]
    fn test_failure_without_history_uses_defaults() {
        let mut cache = RateCache::default();
        let got = cache.get_or_refresh(t0(), &FailingSource);
        assert_eq!(got, RateSnapshot::defaults());
        assert!(cache.last_good().is_none());
    }
}
