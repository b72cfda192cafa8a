//! Response caching.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// In-memory cache whose entries expire after a fixed time-to-live.
pub struct TimedCache<V> {
    entries: HashMap<String, (V, Instant)>,
    ttl: Duration,
}

impl<V: Clone> TimedCache<V> {
    /// Create a new cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Key for a computed stock response.
    pub fn stock_key(
        symbol: &str,
        dividing_date: chrono::NaiveDate,
        historical_days: u32,
        future_days: u32,
    ) -> String {
        format!(
            "stock:{}:{}:{}:{}",
            symbol, dividing_date, historical_days, future_days
        )
    }

    /// Get a live entry. Expired entries are removed on the way.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some((_, inserted)) => now.duration_since(*inserted) >= self.ttl,
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|(value, _)| value.clone())
    }

    /// Store a value.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), (value, Instant::now()));
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_at(Instant::now())
    }

    fn purge_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, (_, inserted)| now.duration_since(*inserted) < ttl);
        before - self.entries.len()
    }

    /// Clear all cached data.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
