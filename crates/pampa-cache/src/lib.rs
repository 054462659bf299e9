//! # pampa-cache: In-Process TTL Cache for Pampa ERP
//!
//! A small server-side cache layer for read-heavy, short-lived aggregates
//! (dashboard KPIs, catalog lookups). Entries expire by TTL, capacity is
//! bounded with partial eviction, and related entries can be dropped in
//! bulk by key prefix.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cache Layer Architecture                           │
//! │                                                                         │
//! │  Route Handler                                                          │
//! │       │  get_or_set("1-dashboard", ttl, fetch_kpis)                     │
//! │       ▼                                                                 │
//! │  ┌──────────────┐    prefix     ┌─────────────────────────────────┐    │
//! │  │ ScopedCache  │ ───────────►  │  TtlCache ("aggregates")        │    │
//! │  │ ordenes-pago │               │                                 │    │
//! │  └──────────────┘               │  key → { value, expires_at }    │    │
//! │  ┌──────────────┐               │                                 │    │
//! │  │ ScopedCache  │ ───────────►  │  bounded, partial eviction      │    │
//! │  │ comprobantes │               └─────────────────────────────────┘    │
//! │  └──────────────┘                        ▲                              │
//! │                                          │ named(name) → same Arc       │
//! │                                 ┌────────┴────────┐                     │
//! │                                 │  CacheRegistry  │                     │
//! │                                 └─────────────────┘                     │
//! │                                                                         │
//! │  IN-PROCESS ONLY • NO TIMERS • NO CROSS-INSTANCE CONSISTENCY           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ttl`] - The core TTL store: get/set/has, compute-if-absent, eviction
//! - [`registry`] - Named cache instances with stable identity
//! - [`tiers`] - TTL and stale/GC duration tiers per data-volatility category
//! - [`query_keys`] - Hierarchical cache keys for client-side invalidation
//! - [`scoped`] - Per-resource wrappers with company-scoped bulk invalidation
//!
//! ## Concurrency Model
//!
//! Designed for a single-process server. Each operation is individually
//! atomic (mutex-guarded), but sequences are not: `has` followed by `get`
//! can race with an eviction. [`ttl::TtlCache::get_or_set`] releases the
//! lock while awaiting the fetcher, so two concurrent misses for the same
//! key may both run the fetcher (last write wins). If exactly-once fetches
//! matter, callers need their own single-flight layer on top.
//!
//! ## Example
//!
//! ```rust
//! use pampa_cache::{CacheRegistry, tiers::TTL_SHORT};
//! use serde_json::json;
//!
//! let registry = CacheRegistry::new();
//! let cache = registry.named("aggregates");
//!
//! cache.set_with_ttl("1-dashboard", json!({"sales": 10}), TTL_SHORT);
//! assert!(cache.has("1-dashboard"));
//!
//! cache.invalidate_pattern("1-");
//! assert!(!cache.has("1-dashboard"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod query_keys;
pub mod registry;
pub mod scoped;
pub mod tiers;
pub mod ttl;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use query_keys::QueryKey;
pub use registry::{named_cache, CacheRegistry};
pub use scoped::ScopedCache;
pub use tiers::{VolatilityTier, DEFAULT_TTL, TTL_LONG, TTL_MEDIUM, TTL_SHORT, TTL_VERY_LONG};
pub use ttl::TtlCache;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default capacity bound for a cache instance.
///
/// Large enough that normal dashboard/catalog traffic never evicts live
/// entries; tests use small bounds (e.g. 5) to exercise the eviction path.
pub const DEFAULT_MAX_ENTRIES: usize = 500;
