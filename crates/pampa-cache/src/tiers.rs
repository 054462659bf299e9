//! # Cache Duration Tiers
//!
//! Fixed duration constants shared by the server cache and the
//! client-side data-fetching layer.
//!
//! Two parallel vocabularies:
//!
//! - **TTL tiers** - how long the server cache keeps an entry
//!   (`TTL_SHORT` … `TTL_VERY_LONG`)
//! - **Volatility tiers** - per data category, how long a client-side
//!   result stays fresh (`stale_time`) and how long an unused result is
//!   retained before garbage collection (`gc_time`)
//!
//! ## Picking a tier
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Category       Example data              stale     gc                  │
//! │  ─────────────  ───────────────────────   ───────   ──────              │
//! │  Transactional  order status, stock       15 s      5 min               │
//! │  Dashboard      KPI widgets               30 s      10 min              │
//! │  Computed       cost breakdowns           2 min     15 min              │
//! │  Catalog        products, suppliers       5 min     30 min              │
//! │  Config         company settings          10 min    60 min              │
//! │                                                                         │
//! │  Most volatile at the top. For every row gc > stale, and both           │
//! │  columns strictly grow downward.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

// =============================================================================
// Server-Side TTL Tiers
// =============================================================================

/// 30 seconds - rapidly changing aggregates.
pub const TTL_SHORT: Duration = Duration::from_secs(30);

/// 60 seconds - the default for most cached queries.
pub const TTL_MEDIUM: Duration = Duration::from_secs(60);

/// 5 minutes - slowly changing lookups.
pub const TTL_LONG: Duration = Duration::from_secs(300);

/// 10 minutes - near-static data.
pub const TTL_VERY_LONG: Duration = Duration::from_secs(600);

/// TTL applied when a caller doesn't pick one.
pub const DEFAULT_TTL: Duration = TTL_MEDIUM;

// =============================================================================
// Client-Side Volatility Tiers
// =============================================================================

/// Data-volatility category, ordered from most to least volatile.
///
/// The derived `Ord` follows declaration order, so
/// `Transactional < Dashboard < … < Config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VolatilityTier {
    /// Order status, stock movements - changes within seconds.
    Transactional,
    /// Dashboard KPI widgets.
    Dashboard,
    /// Derived/aggregated computations (cost breakdowns, margins).
    Computed,
    /// Catalog data: products, suppliers, recipes.
    Catalog,
    /// Company-level configuration, changes rarely.
    Config,
}

impl VolatilityTier {
    /// Every tier, in volatility order.
    pub const ALL: [VolatilityTier; 5] = [
        VolatilityTier::Transactional,
        VolatilityTier::Dashboard,
        VolatilityTier::Computed,
        VolatilityTier::Catalog,
        VolatilityTier::Config,
    ];

    /// How long a fetched result is considered fresh before a background
    /// refresh is warranted.
    pub const fn stale_time(&self) -> Duration {
        match self {
            VolatilityTier::Transactional => Duration::from_secs(15),
            VolatilityTier::Dashboard => Duration::from_secs(30),
            VolatilityTier::Computed => Duration::from_secs(120),
            VolatilityTier::Catalog => Duration::from_secs(300),
            VolatilityTier::Config => Duration::from_secs(600),
        }
    }

    /// How long an unused result is retained before garbage collection.
    ///
    /// Always strictly longer than [`VolatilityTier::stale_time`]: a stale
    /// entry must survive long enough to serve as a placeholder while its
    /// refresh is in flight.
    pub const fn gc_time(&self) -> Duration {
        match self {
            VolatilityTier::Transactional => Duration::from_secs(300),
            VolatilityTier::Dashboard => Duration::from_secs(600),
            VolatilityTier::Computed => Duration::from_secs(900),
            VolatilityTier::Catalog => Duration::from_secs(1800),
            VolatilityTier::Config => Duration::from_secs(3600),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_tiers_are_strictly_increasing() {
        assert!(TTL_SHORT < TTL_MEDIUM);
        assert!(TTL_MEDIUM < TTL_LONG);
        assert!(TTL_LONG < TTL_VERY_LONG);
        assert_eq!(DEFAULT_TTL, TTL_MEDIUM);
    }

    #[test]
    fn test_gc_time_exceeds_stale_time_for_every_tier() {
        for tier in VolatilityTier::ALL {
            assert!(
                tier.gc_time() > tier.stale_time(),
                "{:?}: gc {:?} must exceed stale {:?}",
                tier,
                tier.gc_time(),
                tier.stale_time()
            );
        }
    }

    #[test]
    fn test_tiers_are_strictly_ordered_by_volatility() {
        for pair in VolatilityTier::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].stale_time() < pair[1].stale_time());
            assert!(pair[0].gc_time() < pair[1].gc_time());
        }
    }
}
