//! Unit tests for catalog composition

use crate::test_utils::{custom_catalog, rule, toy_catalog};
use mdl_domain::{CatalogComposition, CatalogKind, Error, RuleCatalog};

#[test]
fn test_composition_from_flags() {
    assert_eq!(
        CatalogComposition::from_flags(false, false),
        CatalogComposition::DefaultsOnly
    );
    assert_eq!(
        CatalogComposition::from_flags(false, true),
        CatalogComposition::DefaultsPlusCustom
    );
    assert_eq!(
        CatalogComposition::from_flags(true, true),
        CatalogComposition::CustomOnly
    );
    assert_eq!(
        CatalogComposition::from_flags(true, false),
        CatalogComposition::Empty
    );
}

#[test]
fn test_defaults_only() {
    let catalog = CatalogComposition::DefaultsOnly
        .compose(|| Ok(toy_catalog()), &[])
        .unwrap();
    assert_eq!(catalog.len(), 6);
}

#[test]
fn test_defaults_plus_custom() {
    let catalog = CatalogComposition::DefaultsPlusCustom
        .compose(|| Ok(toy_catalog()), &[custom_catalog()])
        .unwrap();
    assert!(catalog.contains("MD001"));
    assert!(catalog.contains("MY001"));
}

#[test]
fn test_custom_only_never_loads_defaults() {
    let catalog = CatalogComposition::CustomOnly
        .compose(|| panic!("defaults must not be loaded"), &[custom_catalog()])
        .unwrap();
    let ids: Vec<&str> = catalog.ids().collect();
    assert_eq!(ids, vec!["MY001"]);
    assert_eq!(catalog.kind(), CatalogKind::Custom);
}

#[test]
fn test_skip_defaults_without_custom_is_empty() {
    let catalog = CatalogComposition::Empty
        .compose(|| panic!("defaults must not be loaded"), &[])
        .unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_several_custom_catalogs_merge_in_order() {
    let second =
        RuleCatalog::from_rules(CatalogKind::Custom, vec![rule("MY002", &["custom"])]).unwrap();
    let catalog = CatalogComposition::CustomOnly
        .compose(|| Ok(RuleCatalog::empty()), &[custom_catalog(), second])
        .unwrap();
    let ids: Vec<&str> = catalog.ids().collect();
    assert_eq!(ids, vec!["MY001", "MY002"]);
    assert_eq!(catalog.ids_with_tag("custom"), vec!["MY001", "MY002"]);
}

#[test]
fn test_custom_shadowing_default_fails() {
    let shadow =
        RuleCatalog::from_rules(CatalogKind::Custom, vec![rule("MD001", &["mine"])]).unwrap();
    let result = CatalogComposition::DefaultsPlusCustom.compose(|| Ok(toy_catalog()), &[shadow]);
    assert!(matches!(result, Err(Error::DuplicateId { .. })));
}

#[test]
fn test_defaults_failure_fails_composition() {
    let result =
        CatalogComposition::DefaultsOnly.compose(|| Err(Error::duplicate_id("MD001")), &[]);
    assert!(matches!(result, Err(Error::DuplicateId { id }) if id == "MD001"));

    // unused defaults cannot fail the composition
    let catalog = CatalogComposition::CustomOnly
        .compose(|| Err(Error::duplicate_id("MD001")), &[custom_catalog()])
        .unwrap();
    assert_eq!(catalog.len(), 1);
}
