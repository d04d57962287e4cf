//! Error code catalog with description lookup.
//!
//! A [`Catalog`] is an ordered, read-only table of code/description pairs,
//! built once (usually by the registry walk in [`crate::registry`]) and
//! queried any number of times afterwards. Lookup is a linear scan in table
//! order: the first entry whose code matches wins, and codes with no entry
//! resolve to the [`UNKNOWN_ERROR`] fallback instead of an error.
//!
//! The table is immutable after construction, so a shared `Catalog` can be
//! queried from multiple threads without synchronization.
//!
//! # Example
//!
//! ```rust
//! use ecgen_common::catalog::{Catalog, CatalogEntry, UNKNOWN_ERROR};
//!
//! let catalog = Catalog::new(vec![CatalogEntry {
//!     name: "EC_CORE_NOMEM".into(),
//!     module: "core".into(),
//!     submodule: None,
//!     code: -0x0801,
//!     description: "Out of memory".into(),
//! }]);
//!
//! assert_eq!(catalog.describe(-0x0801), "Out of memory");
//! assert_eq!(catalog.describe(42), UNKNOWN_ERROR);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric error code.
///
/// Codes produced by the generator are negative (see [`crate::layout`]),
/// but any `i32` is a valid lookup input.
pub type ErrorCode = i32;

/// Description returned for codes with no catalog entry.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A single catalog entry: one code, its description, and the registry
/// metadata it was assigned under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Symbolic constant name (e.g. "EC_NET_TIMEOUT").
    pub name: String,
    /// Owning module.
    pub module: String,
    /// Owning submodule, if the error is declared under one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodule: Option<String>,
    /// Encoded code value.
    pub code: ErrorCode,
    /// Human-readable description.
    pub description: String,
}

impl CatalogEntry {
    /// Returns the "module" or "module::submodule" scope label.
    #[must_use]
    pub fn scope(&self) -> String {
        match &self.submodule {
            Some(sub) => format!("{}::{}", self.module, sub),
            None => self.module.clone(),
        }
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.code < 0 { "-" } else { "" };
        write!(
            f,
            "{} ({}0x{:04x}): {}",
            self.name,
            sign,
            self.code.unsigned_abs(),
            self.description
        )
    }
}

/// Ordered, immutable code/description table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates a catalog from entries in their final lookup order.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Returns the description for `code`.
    ///
    /// Scans entries in table order and returns the first match; codes with
    /// no entry resolve to [`UNKNOWN_ERROR`]. Total over all of `i32` and
    /// never panics.
    #[must_use]
    pub fn describe(&self, code: ErrorCode) -> &str {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map_or(UNKNOWN_ERROR, |entry| entry.description.as_str())
    }

    /// Returns the first entry for `code`, if any.
    #[must_use]
    pub fn get(&self, code: ErrorCode) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    /// Entries in table order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

/// Linear first-match lookup over a static `(code, description)` table,
/// for use against generated `ERROR_DESCRIPTIONS` tables.
#[must_use]
pub fn describe_in<'a>(table: &[(ErrorCode, &'a str)], code: ErrorCode) -> &'a str {
    for (candidate, description) in table {
        if code == *candidate {
            return *description;
        }
    }
    UNKNOWN_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: ErrorCode, description: &str) -> CatalogEntry {
        CatalogEntry {
            name: format!("EC_TEST_{}", code.unsigned_abs()),
            module: "test".to_string(),
            submodule: None,
            code,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_describe_returns_matching_description() {
        let catalog = Catalog::new(vec![
            entry(1, "Not found"),
            entry(2, "Permission denied"),
        ]);

        assert_eq!(catalog.describe(1), "Not found");
        assert_eq!(catalog.describe(2), "Permission denied");
        assert_eq!(catalog.describe(99), UNKNOWN_ERROR);
    }

    #[test]
    fn test_describe_empty_catalog_falls_back() {
        let catalog = Catalog::default();
        assert_eq!(catalog.describe(0), UNKNOWN_ERROR);
        assert_eq!(catalog.describe(-0x0801), UNKNOWN_ERROR);
        assert_eq!(catalog.describe(i32::MAX), UNKNOWN_ERROR);
    }

    #[test]
    fn test_describe_boundary_codes() {
        let catalog = Catalog::new(vec![entry(i32::MIN, "lowest"), entry(i32::MAX, "highest")]);
        assert_eq!(catalog.describe(i32::MIN), "lowest");
        assert_eq!(catalog.describe(i32::MAX), "highest");
        assert_eq!(catalog.describe(0), UNKNOWN_ERROR);
    }

    #[test]
    fn test_duplicate_codes_first_match_wins() {
        let catalog = Catalog::new(vec![
            entry(-5, "first"),
            entry(-5, "second"),
            entry(-5, "third"),
        ]);
        assert_eq!(catalog.describe(-5), "first");
        assert_eq!(catalog.get(-5).map(|e| e.description.as_str()), Some("first"));
    }

    #[test]
    fn test_describe_is_deterministic() {
        let catalog = Catalog::new(vec![entry(-7, "once")]);
        assert_eq!(catalog.describe(-7), catalog.describe(-7));
        assert_eq!(catalog.describe(12345), catalog.describe(12345));
    }

    #[test]
    fn test_describe_in_static_table() {
        static TABLE: &[(ErrorCode, &str)] = &[(-0x0801, "Out of memory"), (-0x0802, "Bad state")];

        assert_eq!(describe_in(TABLE, -0x0801), "Out of memory");
        assert_eq!(describe_in(TABLE, -0x0802), "Bad state");
        assert_eq!(describe_in(TABLE, 0), UNKNOWN_ERROR);
        assert_eq!(describe_in(&[], 1), UNKNOWN_ERROR);
    }

    #[test]
    fn test_entry_scope_and_display() {
        let mut e = entry(-0x0841, "Queue overflow");
        assert_eq!(e.scope(), "test");
        e.submodule = Some("sched".to_string());
        assert_eq!(e.scope(), "test::sched");
        assert_eq!(
            e.to_string(),
            format!("{} (-0x0841): Queue overflow", e.name)
        );
    }
}
