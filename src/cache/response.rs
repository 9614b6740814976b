//! TTL-bounded response cache with evict-oldest capacity handling.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

/// Default entry bound.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
    seq: u64,
}

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<String, Entry<V>>,
    order: VecDeque<(u64, String)>,
    next_seq: u64,
}

/// Thread-safe key/value cache with per-entry TTL and a fixed capacity.
///
/// When full, inserting a new key evicts the oldest-inserted live entry. Overwriting a key counts
/// as a fresh insertion. Expired entries are dropped lazily.
#[derive(Debug)]
pub struct ResponseCache<V> {
    max_entries: usize,
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl<V: Clone> ResponseCache<V> {
    /// Cache holding at most `max_entries` values (at least one).
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                next_seq: 0,
            }),
        }
    }

    /// Capacity bound.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Live value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store `value` under `key` for `ttl`.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.set_at(key.into(), value, ttl, Instant::now());
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let mut inner = self.lock();
        let expired = match inner.entries.get(key) {
            None => return None,
            Some(e) if e.expires_at > now => return Some(e.value.clone()),
            Some(_) => true,
        };
        if expired {
            inner.entries.remove(key);
        }
        None
    }

    pub(crate) fn set_at(&self, key: String, value: V, ttl: Duration, now: Instant) {
        let mut inner = self.lock();
        let expires_at = now.checked_add(ttl).unwrap_or(now);
        let seq = inner.next_seq;
        inner.next_seq += 1;

        inner.entries.remove(&key);
        inner.purge_expired(now);
        if inner.order.len() > self.max_entries.saturating_mul(2) {
            inner.compact_order();
        }
        while inner.entries.len() >= self.max_entries {
            if !inner.evict_oldest() {
                break;
            }
        }

        inner.order.push_back((seq, key.clone()));
        inner.entries.insert(
            key,
            Entry {
                value,
                expires_at,
                seq,
            },
        );
    }
}

impl<V> ResponseCache<V> {
    // Every mutation leaves `Inner` consistent, so a panic elsewhere cannot corrupt it.
    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V> Inner<V> {
    fn purge_expired(&mut self, now: Instant) {
        self.entries.retain(|_, e| e.expires_at > now);
    }

    fn compact_order(&mut self) {
        let entries = &self.entries;
        self.order
            .retain(|(seq, key)| entries.get(key).is_some_and(|e| e.seq == *seq));
    }

    // Order records whose seq no longer matches the stored entry are stale and skipped.
    fn evict_oldest(&mut self) -> bool {
        while let Some((seq, key)) = self.order.pop_front() {
            if self.entries.get(&key).is_some_and(|e| e.seq == seq) {
                self.entries.remove(&key);
                tracing::debug!(%key, "evicted oldest cache entry");
                return true;
            }
        }
        false
    }
}

/// Cache key for a lookup query: `"<prefix>_<lowercased, trimmed query>"`.
pub fn search_cache_key(prefix: &str, query: &str) -> String {
    format!("{prefix}_{}", query.trim().to_lowercase())
}

#[cfg(test)]
#[path = "../../tests/unit/cache/response.rs"]
mod tests;
