//! # Scoped Cache Wrappers
//!
//! Thin per-resource wrappers over a shared underlying named cache. A
//! wrapper prepends its fixed resource prefix to every key, so several
//! resources coexist in one store without colliding, and a whole
//! company's entries for one resource can be dropped with a single
//! prefix invalidation.
//!
//! ## Key Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            Shared "aggregates" store, prefixed keys                     │
//! │                                                                         │
//! │  "ordenes-pago:1-dashboard"    ◄── orders-payable wrapper, company 1   │
//! │  "ordenes-pago:1-aging"                                                │
//! │  "ordenes-pago:2-dashboard"    ◄── same resource, company 2            │
//! │  "comprobantes:1-pending"      ◄── vouchers wrapper, company 1         │
//! │                                                                         │
//! │  invalidate_company(1) on the orders-payable wrapper removes           │
//! │  "ordenes-pago:1-*" and nothing else.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::registry::CacheRegistry;
use crate::tiers::DEFAULT_TTL;
use crate::ttl::TtlCache;

/// Name of the shared store the preconfigured wrappers delegate to.
pub const AGGREGATES_CACHE: &str = "aggregates";

const ORDERS_PAYABLE_PREFIX: &str = "ordenes-pago:";
const VOUCHERS_PREFIX: &str = "comprobantes:";

// =============================================================================
// Scoped Cache
// =============================================================================

/// A resource-scoped view over a shared [`TtlCache`].
///
/// Keys are conventionally company-scoped: `"<company_id>-<rest>"`, e.g.
/// `"1-dashboard"`. That convention is what makes
/// [`ScopedCache::invalidate_company`] precise.
#[derive(Debug, Clone)]
pub struct ScopedCache {
    prefix: &'static str,
    cache: Arc<TtlCache>,
}

impl ScopedCache {
    /// Wraps `cache` under a fixed resource prefix.
    pub fn new(prefix: &'static str, cache: Arc<TtlCache>) -> Self {
        ScopedCache { prefix, cache }
    }

    /// The accounts-payable orders wrapper over the shared aggregates store.
    pub fn orders_payable(registry: &CacheRegistry) -> Self {
        Self::new(ORDERS_PAYABLE_PREFIX, registry.named(AGGREGATES_CACHE))
    }

    /// The fiscal-vouchers wrapper over the shared aggregates store.
    pub fn vouchers(registry: &CacheRegistry) -> Self {
        Self::new(VOUCHERS_PREFIX, registry.named(AGGREGATES_CACHE))
    }

    fn scoped_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Retrieves a value stored through this wrapper.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.cache.get(&self.scoped_key(key))
    }

    /// Stores a value with the default TTL.
    pub fn set(&self, key: &str, value: Value) {
        self.set_with_ttl(key, value, DEFAULT_TTL);
    }

    /// Stores a value with an explicit TTL.
    pub fn set_with_ttl(&self, key: &str, value: Value, ttl: Duration) {
        self.cache.set_with_ttl(&self.scoped_key(key), value, ttl);
    }

    /// Compute-if-absent through this wrapper's prefix.
    ///
    /// Same contract as [`TtlCache::get_or_set`].
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
        self.cache.get_or_set(&self.scoped_key(key), ttl, fetcher).await
    }

    /// Removes one entry stored through this wrapper.
    pub fn invalidate(&self, key: &str) {
        self.cache.invalidate(&self.scoped_key(key));
    }

    /// Removes every entry this wrapper holds for one company.
    ///
    /// Matches `"<resource prefix><company_id>-"`, so company 1 never
    /// shadows company 10's keys and other resources in the shared store
    /// are untouched. Returns the number of entries removed.
    pub fn invalidate_company(&self, company_id: i64) -> usize {
        self.cache
            .invalidate_pattern(&format!("{}{}-", self.prefix, company_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
