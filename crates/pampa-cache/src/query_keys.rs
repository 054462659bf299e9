//! # Query Keys
//!
//! Hierarchical cache keys for the client-side data-fetching layer.
//!
//! A key is an ordered segment sequence whose first segment is always the
//! module name. Truncating segments from the right yields a prefix that
//! matches every more-specific key sharing it, which is what makes bulk
//! invalidation hierarchical:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Hierarchical Invalidation                            │
//! │                                                                         │
//! │  ["insumos"]                          ◄── invalidates everything below  │
//! │     ├── ["insumos","supplies","1"]                                     │
//! │     ├── ["insumos","suppliers","1"]                                    │
//! │     └── ["insumos","prices","1","42"]                                  │
//! │                                                                         │
//! │  ["insumos","prices","1"]             ◄── just company 1's prices      │
//! │     └── ["insumos","prices","1","42"]                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Key-building functions are pure and keep a fixed argument order: the
//! company ID always precedes any optional secondary ID, and supplying an
//! optional ID appends a segment - it never reorders earlier ones.

use serde::Serialize;
use std::fmt;

// =============================================================================
// Query Key
// =============================================================================

/// An ordered, hierarchical identifier for a logical data set.
///
/// Serializes as a flat JSON array of strings, the shape the frontend's
/// query library expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    fn new<const N: usize>(segments: [String; N]) -> Self {
        QueryKey(segments.into())
    }

    /// The ordered segments of this key.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The module name: always the first segment.
    pub fn module(&self) -> &str {
        // Every constructor puts the module literal first
        &self.0[0]
    }

    /// Segment-wise prefix test: does `prefix`'s segment sequence lead
    /// this key's? This is the matching rule bulk invalidation uses.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// Appends a segment, for ad hoc narrowing of a family key.
    pub fn with_segment(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }
}

impl fmt::Display for QueryKey {
    /// Joins segments with `:` to form a flat cache-key string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(":"))
    }
}

// =============================================================================
// Key Families
// =============================================================================

/// Administration module: companies and their users.
pub mod admin {
    use super::QueryKey;

    pub const MODULE: &str = "admin";

    /// Prefix key matching every key in this family.
    pub fn all() -> QueryKey {
        QueryKey::new([MODULE.to_string()])
    }

    pub fn companies() -> QueryKey {
        QueryKey::new([MODULE.to_string(), "companies".to_string()])
    }

    pub fn users(company_id: i64) -> QueryKey {
        QueryKey::new([
            MODULE.to_string(),
            "users".to_string(),
            company_id.to_string(),
        ])
    }
}

/// Product catalog module.
pub mod productos {
    use super::QueryKey;

    pub const MODULE: &str = "productos";

    /// Prefix key matching every key in this family.
    pub fn all() -> QueryKey {
        QueryKey::new([MODULE.to_string()])
    }

    pub fn list(company_id: i64) -> QueryKey {
        QueryKey::new([
            MODULE.to_string(),
            "list".to_string(),
            company_id.to_string(),
        ])
    }

    pub fn detail(company_id: i64, product_id: i64) -> QueryKey {
        QueryKey::new([
            MODULE.to_string(),
            "detail".to_string(),
            company_id.to_string(),
            product_id.to_string(),
        ])
    }
}

/// Supplies module: raw materials, their suppliers, and price lists.
pub mod insumos {
    use super::QueryKey;

    pub const MODULE: &str = "insumos";

    /// Prefix key matching every key in this family.
    pub fn all() -> QueryKey {
        QueryKey::new([MODULE.to_string()])
    }

    pub fn supplies(company_id: i64) -> QueryKey {
        QueryKey::new([
            MODULE.to_string(),
            "supplies".to_string(),
            company_id.to_string(),
        ])
    }

    pub fn suppliers(company_id: i64) -> QueryKey {
        QueryKey::new([
            MODULE.to_string(),
            "suppliers".to_string(),
            company_id.to_string(),
        ])
    }

    /// Price history, optionally narrowed to one supply.
    ///
    /// The company ID comes first; supplying `supply_id` appends a
    /// segment, producing a strictly longer key under the same prefix.
    pub fn prices(company_id: i64, supply_id: Option<i64>) -> QueryKey {
        let key = QueryKey::new([
            MODULE.to_string(),
            "prices".to_string(),
            company_id.to_string(),
        ]);
        match supply_id {
            Some(id) => key.with_segment(id),
            None => key,
        }
    }
}

/// Recipes module: production formulas built from supplies.
pub mod recetas {
    use super::QueryKey;

    pub const MODULE: &str = "recetas";

    /// Prefix key matching every key in this family.
    pub fn all() -> QueryKey {
        QueryKey::new([MODULE.to_string()])
    }

    pub fn list(company_id: i64) -> QueryKey {
        QueryKey::new([
            MODULE.to_string(),
            "list".to_string(),
            company_id.to_string(),
        ])
    }

    pub fn detail(company_id: i64, recipe_id: i64) -> QueryKey {
        QueryKey::new([
            MODULE.to_string(),
            "detail".to_string(),
            company_id.to_string(),
            recipe_id.to_string(),
        ])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_shares_first_segment() {
        assert_eq!(insumos::suppliers(1).module(), "insumos");
        assert_eq!(insumos::supplies(1).module(), "insumos");
        assert_eq!(insumos::suppliers(1).module(), insumos::supplies(1).module());
    }

    #[test]
    fn test_single_segment_prefix_matches_whole_family() {
        let prefix = insumos::all();

        assert!(insumos::supplies(1).starts_with(&prefix));
        assert!(insumos::suppliers(7).starts_with(&prefix));
        assert!(insumos::prices(1, Some(42)).starts_with(&prefix));

        assert!(!productos::list(1).starts_with(&prefix));
    }

    #[test]
    fn test_optional_id_appends_without_reordering() {
        let broad = insumos::prices(1, None);
        let narrow = insumos::prices(1, Some(42));

        assert_eq!(broad.segments(), ["insumos", "prices", "1"]);
        assert_eq!(narrow.segments(), ["insumos", "prices", "1", "42"]);
        assert!(narrow.starts_with(&broad));
        assert!(!broad.starts_with(&narrow));
    }

    #[test]
    fn test_keys_are_pure() {
        assert_eq!(productos::detail(1, 2), productos::detail(1, 2));
        assert_ne!(productos::detail(1, 2), productos::detail(2, 1));
    }

    #[test]
    fn test_display_joins_with_colon() {
        assert_eq!(recetas::detail(1, 9).to_string(), "recetas:detail:1:9");
        assert_eq!(admin::companies().to_string(), "admin:companies");
    }

    #[test]
    fn test_serializes_as_flat_array() {
        let json = serde_json::to_value(insumos::prices(1, Some(42))).unwrap();
        assert_eq!(json, serde_json::json!(["insumos", "prices", "1", "42"]));
    }

    #[test]
    fn test_every_family_prefix_is_its_module_literal() {
        assert_eq!(admin::all().segments(), [admin::MODULE]);
        assert_eq!(productos::all().segments(), [productos::MODULE]);
        assert_eq!(insumos::all().segments(), [insumos::MODULE]);
        assert_eq!(recetas::all().segments(), [recetas::MODULE]);
    }
}
