//! # Named Cache Registry
//!
//! Hands out isolated cache instances by name, with stable identity:
//! the same name always yields the same instance for the registry's
//! lifetime, and different names never share entries.
//!
//! ## Why an explicit registry?
//! The registry is an ordinary value, so each test (or each embedded
//! deployment) constructs its own instead of sharing process-wide state.
//! Callers that want the classic module-singleton behavior use
//! [`named_cache`], which goes through one lazily-initialized global
//! registry.
//!
//! ## Usage
//! ```rust
//! use pampa_cache::CacheRegistry;
//! use std::sync::Arc;
//!
//! let registry = CacheRegistry::new();
//! let a = registry.named("aggregates");
//! let b = registry.named("aggregates");
//!
//! // Same name, same instance
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::ttl::TtlCache;
use crate::DEFAULT_MAX_ENTRIES;

// =============================================================================
// Cache Registry
// =============================================================================

/// A name → cache-instance map with lazy construction.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    caches: Mutex<HashMap<String, Arc<TtlCache>>>,
}

impl CacheRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        CacheRegistry {
            caches: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cache registered under `name`, creating it with the
    /// default capacity on first reference.
    pub fn named(&self, name: &str) -> Arc<TtlCache> {
        self.named_with_capacity(name, DEFAULT_MAX_ENTRIES)
    }

    /// Returns the cache registered under `name`, creating it with
    /// `max_entries` on first reference.
    ///
    /// The capacity argument only matters on the call that constructs the
    /// instance; later calls return the existing instance untouched,
    /// whatever capacity they ask for.
    pub fn named_with_capacity(&self, name: &str, max_entries: usize) -> Arc<TtlCache> {
        let mut caches = self.caches.lock().expect("registry mutex poisoned");
        caches
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(TtlCache::with_capacity(max_entries)))
            .clone()
    }
}

// =============================================================================
// Process-Wide Default Registry
// =============================================================================

static GLOBAL_REGISTRY: OnceLock<CacheRegistry> = OnceLock::new();

/// The process-wide registry, initialized on first use and never torn down.
pub fn global() -> &'static CacheRegistry {
    GLOBAL_REGISTRY.get_or_init(CacheRegistry::new)
}

/// Shorthand for `global().named(name)`.
///
/// Route handlers use this; anything that needs isolation (tests,
/// embedded setups) should hold its own [`CacheRegistry`] instead.
pub fn named_cache(name: &str) -> Arc<TtlCache> {
    global().named(name)
}

// =============================================================================
// Unit Tests
// =============================================================================
