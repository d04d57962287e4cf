//! Lookup contract tests for the catalog core.
//!
//! The lookup must be total, deterministic, first-match-wins, and fall
//! back to "Unknown error" for anything unmapped.

use ecgen_common::catalog::{Catalog, CatalogEntry, ErrorCode, UNKNOWN_ERROR, describe_in};
use proptest::prelude::*;

fn entry(code: ErrorCode, description: &str) -> CatalogEntry {
    CatalogEntry {
        name: format!("EC_{}", code.unsigned_abs()),
        module: "test".to_string(),
        submodule: None,
        code,
        description: description.to_string(),
    }
}

const KNOWN: &[(ErrorCode, &str)] = &[
    (1, "Not found"),
    (2, "Permission denied"),
    (-0x0801, "Out of memory"),
    (-0x0841, "Scheduler queue overflow"),
    (-0x1001, "Network operation timed out"),
];

fn known_catalog() -> Catalog {
    Catalog::new(
        KNOWN
            .iter()
            .map(|(code, description)| entry(*code, *description))
            .collect(),
    )
}

#[test]
fn known_codes_resolve_to_their_descriptions() {
    let catalog = known_catalog();
    for (code, description) in KNOWN {
        assert_eq!(catalog.describe(*code), *description);
    }
}

#[test]
fn absent_codes_resolve_to_unknown_error() {
    let catalog = known_catalog();
    assert_eq!(catalog.describe(99), UNKNOWN_ERROR);
    assert_eq!(catalog.describe(0), UNKNOWN_ERROR);
    assert_eq!(catalog.describe(-1), UNKNOWN_ERROR);
}

#[test]
fn empty_catalog_always_falls_back() {
    let catalog = Catalog::default();
    for code in [0, 1, -1, i32::MIN, i32::MAX] {
        assert_eq!(catalog.describe(code), UNKNOWN_ERROR);
    }
}

#[test]
fn duplicate_codes_keep_table_order() {
    let catalog = Catalog::new(vec![
        entry(-9, "declared first"),
        entry(-8, "unrelated"),
        entry(-9, "declared second"),
    ]);
    assert_eq!(catalog.describe(-9), "declared first");

    static TABLE: &[(ErrorCode, &str)] = &[(-9, "declared first"), (-9, "declared second")];
    assert_eq!(describe_in(TABLE, -9), "declared first");
}

proptest! {
    #[test]
    fn describe_is_total_and_deterministic(code in any::<i32>()) {
        let catalog = known_catalog();
        let first = catalog.describe(code).to_string();
        prop_assert_eq!(catalog.describe(code), first);
    }

    #[test]
    fn describe_unmapped_is_unknown(code in any::<i32>()) {
        prop_assume!(!KNOWN.iter().any(|(known, _)| *known == code));
        let catalog = known_catalog();
        prop_assert_eq!(catalog.describe(code), UNKNOWN_ERROR);
        prop_assert_eq!(describe_in(KNOWN, code), UNKNOWN_ERROR);
    }

    #[test]
    fn describe_matches_slice_lookup(code in any::<i32>()) {
        let catalog = known_catalog();
        prop_assert_eq!(catalog.describe(code), describe_in(KNOWN, code));
    }
}
