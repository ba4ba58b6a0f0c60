//! TTL cache of fetched series, keyed by query
//!
//! An explicit cache object instead of implicit memoization: a map from
//! query key to (series, fetch instant) with a fixed expiry, plus a
//! per-key guard so at most one fetch per key is in flight at a time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tracing::debug;

use crate::series::AirSeries;
use crate::{Query, Result, Variable};

/// Default series expiry, matching the dashboard's one-hour memoization
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Cache key: coordinates at 4-decimal precision plus variable and window
///
/// Four decimals (about 11 m) is the precision of the dashboard's
/// coordinate entry, so distinct clicks that round to the same key share
/// one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    lat_e4: i64,
    lon_e4: i64,
    variable: Variable,
    start: NaiveDate,
    end: NaiveDate,
}

impl CacheKey {
    fn from_query(query: &Query) -> Self {
        Self {
            lat_e4: (query.point.lat * 1e4).round() as i64,
            lon_e4: (query.point.lon * 1e4).round() as i64,
            variable: query.variable,
            start: query.range.start,
            end: query.range.end,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    entry: Option<(AirSeries, Instant)>,
}

/// TTL cache of fetched series with a per-key in-flight guard
#[derive(Debug)]
pub struct SeriesCache {
    ttl: Duration,
    slots: Mutex<HashMap<CacheKey, Arc<Mutex<Slot>>>>,
}

impl SeriesCache {
    /// Cache with the default one-hour expiry
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Cache with a custom expiry
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached series for `query`, or run `fetch` to fill it
    ///
    /// The slot lock is held across `fetch`, so concurrent callers with
    /// the same key wait for the first fetch instead of duplicating it;
    /// callers with other keys are unaffected. A failed fetch leaves the
    /// slot unfilled and the error is returned as-is.
    pub fn get_or_fetch<F>(&self, query: &Query, fetch: F) -> Result<AirSeries>
    where
        F: FnOnce() -> Result<AirSeries>,
    {
        let key = CacheKey::from_query(query);
        let slot = {
            let mut slots = self.slots.lock().unwrap();
            Arc::clone(slots.entry(key).or_default())
        };

        let mut slot = slot.lock().unwrap();
        if let Some((series, fetched_at)) = &slot.entry {
            if fetched_at.elapsed() < self.ttl {
                debug!(?key, "cache hit");
                return Ok(series.clone());
            }
        }

        let series = fetch()?;
        slot.entry = Some((series.clone(), Instant::now()));
        debug!(?key, len = series.len(), "cache fill");
        Ok(series)
    }

    /// Drop expired entries, returning how many were removed
    pub fn evict_expired(&self) -> usize {
        let slots = self.slots.lock().unwrap();
        let mut removed = 0;
        for slot in slots.values() {
            let mut slot = slot.lock().unwrap();
            if let Some((_, fetched_at)) = &slot.entry {
                if fetched_at.elapsed() >= self.ttl {
                    slot.entry = None;
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Drop everything
    pub fn clear(&self) {
        self.slots.lock().unwrap().clear();
    }
}

impl Default for SeriesCache {
    fn default() -> Self {
        Self::new()
    }
}
