use crate::core::rate::ExchangeRate;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct CachedTable {
    rates: Vec<ExchangeRate>,
    fetched_at: DateTime<Utc>,
    fetched_instant: Instant,
}

impl CachedTable {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_instant.elapsed() < ttl
    }
}

/// Holds the most recently fetched rate table for a fixed time-to-live.
///
/// The lock only guards the in-memory check, copy and replace steps. Readers
/// always receive their own copy of the table.
#[derive(Clone)]
pub struct RateCache {
    inner: Arc<Mutex<Option<CachedTable>>>,
    ttl: Duration,
}

impl RateCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(4 * 60 * 60);

    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Copy of the cached table, if one exists and is still fresh.
    pub async fn get(&self) -> Option<Vec<ExchangeRate>> {
        let cache = self.inner.lock().await;
        match cache.as_ref() {
            Some(table) if table.is_fresh(self.ttl) => {
                debug!("Cache HIT for {} rates", table.rates.len());
                Some(table.rates.clone())
            }
            Some(table) => {
                debug!("Cache entry expired, fetched at {}", table.fetched_at);
                None
            }
            None => {
                debug!("Cache MISS");
                None
            }
        }
    }

    /// Replaces the whole table and stamps it with the current time.
    /// Returns a copy of what was stored.
    pub async fn put(&self, rates: Vec<ExchangeRate>) -> Vec<ExchangeRate> {
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for {} rates", rates.len());
        let copy = rates.clone();
        *cache = Some(CachedTable {
            rates,
            fetched_at: Utc::now(),
            fetched_instant: Instant::now(),
        });
        copy
    }

    /// When the cached table was stored, only while it is fresh.
    pub async fn fresh_timestamp(&self) -> Option<DateTime<Utc>> {
        let cache = self.inner.lock().await;
        cache
            .as_ref()
            .filter(|table| table.is_fresh(self.ttl))
            .map(|table| table.fetched_at)
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
