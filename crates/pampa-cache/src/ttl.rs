//! # TTL Store
//!
//! The core key/value store: per-entry expiration, bounded capacity with
//! partial eviction, and prefix-based bulk invalidation.
//!
//! ## Entry Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Entry Lifecycle                                  │
//! │                                                                         │
//! │  set(k, v) ──► { value, expires_at: now + ttl, seq }                   │
//! │                      │                                                  │
//! │        ┌─────────────┼───────────────┬───────────────────┐             │
//! │        ▼             ▼               ▼                   ▼             │
//! │  get(k) before   get(k) after   invalidate(k) /      eviction on a     │
//! │  expiry: hit     expiry: miss,  invalidate_pattern   later set() when  │
//! │                  lazily removed / clear()            at capacity       │
//! │                                                                         │
//! │  Expiry is LOGICAL: an expired entry counts as absent even while it    │
//! │  still occupies a slot. Nothing sweeps in the background; expired      │
//! │  entries leave on the next read of their key or the next eviction.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The null sentinel
//!
//! Values are dynamic JSON ([`serde_json::Value`]), and the miss sentinel is
//! `Value::Null`: a cached `null` is indistinguishable from a miss, so
//! [`TtlCache::get_or_set`] will re-run its fetcher for such a key. This is
//! deliberate and matches the API contract consumers rely on. Other falsy
//! values (`0`, `false`, `""`) are ordinary hits. Don't cache `null` to mean
//! "known absent" - wrap it (`{"value": null}`) if absence must be cached.

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::tiers::DEFAULT_TTL;
use crate::DEFAULT_MAX_ENTRIES;

// =============================================================================
// Cache Entry
// =============================================================================

/// A stored value with its expiration instant and write-order stamp.
#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Instant,
    /// Monotonic write counter; lower = written earlier. Eviction drops
    /// the lowest stamps first (insertion/last-write order).
    seq: u64,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Mutex-guarded interior of a cache instance.
#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    next_seq: u64,
}

// =============================================================================
// TTL Cache
// =============================================================================

/// An in-process key/value cache with per-entry TTL and bounded capacity.
///
/// ## Thread Safety
/// Interior mutability via `Mutex`, so a `TtlCache` is shared behind an
/// `Arc` (the registry hands instances out that way). Individual operations
/// are atomic; multi-operation sequences are not.
///
/// ## Usage
/// ```rust
/// use pampa_cache::TtlCache;
/// use serde_json::json;
/// use std::time::Duration;
///
/// let cache = TtlCache::new();
/// cache.set_with_ttl("supplier:42", json!({"name": "Acme"}), Duration::from_secs(60));
///
/// assert_eq!(cache.get("supplier:42"), Some(json!({"name": "Acme"})));
/// assert_eq!(cache.get("supplier:7"), None);
/// ```
#[derive(Debug)]
pub struct TtlCache {
    inner: Mutex<Inner>,
    max_entries: usize,
}

impl TtlCache {
    /// Creates a cache with the default capacity bound.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Creates a cache holding at most `max_entries` entries.
    ///
    /// A zero bound is clamped to 1: a cache that cannot hold anything
    /// would turn every `set` into a no-op.
    pub fn with_capacity(max_entries: usize) -> Self {
        TtlCache {
            inner: Mutex::new(Inner::default()),
            max_entries: max_entries.max(1),
        }
    }

    /// Stores a value under `key` with the default TTL.
    ///
    /// See [`TtlCache::set_with_ttl`].
    pub fn set(&self, key: &str, value: Value) {
        self.set_with_ttl(key, value, DEFAULT_TTL);
    }

    /// Stores a value under `key`, expiring `ttl` from now.
    ///
    /// Overwrites any existing entry, resetting both its expiry and its
    /// position in eviction order. When the store is at capacity this
    /// first sweeps expired entries, then (if still full) drops the oldest
    /// quarter of the live entries - so an insert slot always exists and
    /// `set` never fails.
    pub fn set_with_ttl(&self, key: &str, value: Value, ttl: Duration) {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");

        if inner.entries.len() >= self.max_entries {
            self.evict_locked(&mut inner);
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
                seq,
            },
        );
    }

    /// Retrieves a live value, or `None` on a miss.
    ///
    /// A miss is: no entry, an expired entry (removed on the spot), or a
    /// stored `Value::Null` (see the module docs on the null sentinel).
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");

        let expired = match inner.entries.get(key) {
            Some(entry) => entry.is_expired(Instant::now()),
            None => return None,
        };
        if expired {
            inner.entries.remove(key);
            return None;
        }

        let value = &inner.entries[key].value;
        if value.is_null() {
            // Null sentinel: present but indistinguishable from a miss.
            return None;
        }
        Some(value.clone())
    }

    /// Whether a non-expired entry exists under `key`.
    ///
    /// Note the asymmetry with [`TtlCache::get`]: an entry holding the
    /// null sentinel still *exists*, so `has` reports `true` for it.
    pub fn has(&self, key: &str) -> bool {
        let inner = self.inner.lock().expect("cache mutex poisoned");
        inner
            .entries
            .get(key)
            .map(|entry| !entry.is_expired(Instant::now()))
            .unwrap_or(false)
    }

    /// Returns the cached value for `key`, or computes and stores it.
    ///
    /// On a hit the fetcher is never invoked. On a miss the fetcher runs
    /// (outside the cache lock), its success value is stored with `ttl`
    /// and returned, and its error is propagated with NOTHING stored.
    ///
    /// ## No single-flight guarantee
    /// Two tasks missing the same key concurrently will both run the
    /// fetcher; whichever finishes last wins the slot. Acceptable for the
    /// cheap aggregate queries this layer fronts.
    ///
    /// ## Example
    /// ```rust
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// use pampa_cache::TtlCache;
    /// use serde_json::json;
    /// use std::time::Duration;
    ///
    /// let cache = TtlCache::new();
    /// let kpis = cache
    ///     .get_or_set("1-dashboard", Duration::from_secs(30), || async {
    ///         Ok::<_, String>(json!({"open_orders": 3}))
    ///     })
    ///     .await
    ///     .unwrap();
    /// assert_eq!(kpis["open_orders"], 3);
    /// # });
    /// ```
    pub async fn get_or_set<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        fetcher: F,
    ) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }

        let value = fetcher().await?;
        self.set_with_ttl(key, value.clone(), ttl);
        Ok(value)
    }

    /// Removes one entry. No-op when absent.
    pub fn invalidate(&self, key: &str) {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        inner.entries.remove(key);
    }

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Plain string-prefix match - no globbing, no regex. Returns the
    /// number of entries removed.
    ///
    /// ## Example
    /// ```rust
    /// use pampa_cache::TtlCache;
    /// use serde_json::json;
    ///
    /// let cache = TtlCache::new();
    /// cache.set("1-orders", json!(1));
    /// cache.set("1-vouchers", json!(2));
    /// cache.set("2-orders", json!(3));
    ///
    /// assert_eq!(cache.invalidate_pattern("1-"), 2);
    /// assert!(cache.has("2-orders"));
    /// ```
    pub fn invalidate_pattern(&self, prefix: &str) -> usize {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - inner.entries.len();
        if removed > 0 {
            debug!(prefix = %prefix, removed, "bulk cache invalidation");
        }
        removed
    }

    /// Removes all entries in this instance.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        inner.entries.clear();
    }

    /// Physical entry count, including expired entries not yet swept.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("cache mutex poisoned");
        inner.entries.len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frees at least one slot. Called from `set` when at capacity.
    ///
    /// Sweep expired entries first; if that wasn't enough, drop the oldest
    /// `max_entries / 4` (at least 1) live entries by write order. Evicting
    /// a quarter at a time amortizes the sort across many inserts instead
    /// of paying it on every one.
    fn evict_locked(&self, inner: &mut Inner) {
        let now = Instant::now();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired(now));
        let swept = before - inner.entries.len();

        let mut dropped = 0;
        if inner.entries.len() >= self.max_entries {
            let mut by_age: Vec<(u64, String)> = inner
                .entries
                .iter()
                .map(|(key, entry)| (entry.seq, key.clone()))
                .collect();
            by_age.sort_unstable_by_key(|(seq, _)| *seq);

            dropped = (self.max_entries / 4).max(1);
            for (_, key) in by_age.into_iter().take(dropped) {
                inner.entries.remove(&key);
            }
        }

        debug!(swept, dropped, remaining = inner.entries.len(), "cache eviction");
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
