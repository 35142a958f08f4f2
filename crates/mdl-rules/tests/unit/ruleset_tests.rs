//! Tests for YAML ruleset loading

use crate::test_utils::{HELLO_RULESET, write_file};
use mdl_domain::{
    CatalogComposition, CatalogKind, DirectiveBatch, DirectiveSource, Document, Error,
    ResolveOptions, parse_directives, resolve,
};
use mdl_rules::ruleset::load_ruleset_file;
use mdl_rules::{default_catalog, load_ruleset, load_rulesets};
use tempfile::TempDir;

fn lines_flagged(rule: &mdl_domain::RuleDefinition, text: &str) -> Vec<usize> {
    let doc = Document::new(text);
    rule.check.run(&doc).map(|f| f.line).collect()
}

#[test]
fn test_load_single_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "hello.yml", HELLO_RULESET);

    let catalog = load_ruleset(&path).unwrap();
    assert_eq!(catalog.kind(), CatalogKind::Custom);
    assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["MY001"]);

    let rule = catalog.get("MY001").unwrap();
    assert!(rule.has_tag("greeting"));
    assert!(rule.has_alias("say-hello"));
    assert!(rule.enabled_by_default);
    assert_eq!(lines_flagged(rule, "Goodbye world"), vec![1]);
    assert!(lines_flagged(rule, "Hello World").is_empty());
    assert!(lines_flagged(rule, "Hello\n\nHello again\n").is_empty());
}

#[test]
fn test_no_match_expectation_and_code_blocks() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "todo.yaml",
        r#"
rules:
  - id: MY100
    description: No TODO markers
    enabled: false
    check:
      type: line-pattern
      pattern: "TODO"
      expect: no-match
      skip_code_blocks: true
"#,
    );

    let rules = load_ruleset_file(&path).unwrap();
    assert_eq!(rules.len(), 1);
    assert!(!rules[0].enabled_by_default);

    let text = "TODO: write\n\n```\nTODO in code\n```\n";
    assert_eq!(lines_flagged(&rules[0], text), vec![1]);
}

#[test]
fn test_missing_source_is_unknown() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yml");
    match load_ruleset(&missing) {
        Err(Error::UnknownCustomRuleSource { path }) => assert_eq!(path, missing),
        other => panic!("expected UnknownCustomRuleSource, got {other:?}"),
    }
}

#[test]
fn test_malformed_files_are_load_errors() {
    let cases = [
        ("syntax.yml", "rules: [unclosed"),
        (
            "unknown_field.yml",
            "rules:\n  - id: X1\n    description: d\n    severity: high\n    check: {type: line-pattern, pattern: a}\n",
        ),
        (
            "bad_regex.yml",
            "rules:\n  - id: X1\n    description: d\n    check: {type: line-pattern, pattern: \"(\"}\n",
        ),
        (
            "empty_id.yml",
            "rules:\n  - id: \"\"\n    description: d\n    check: {type: line-pattern, pattern: a}\n",
        ),
        (
            "spaced_tag.yml",
            "rules:\n  - id: X1\n    description: d\n    tags: [\"two words\"]\n    check: {type: line-pattern, pattern: a}\n",
        ),
        (
            "tilde_alias.yml",
            "rules:\n  - id: X1\n    description: d\n    aliases: [\"~x\"]\n    check: {type: line-pattern, pattern: a}\n",
        ),
        (
            "bad_type.yml",
            "rules:\n  - id: X1\n    description: d\n    check: {type: ruby, pattern: a}\n",
        ),
        (
            "duplicate.yml",
            "rules:\n  - id: X1\n    description: d\n    check: {type: line-pattern, pattern: a}\n  - id: X1\n    description: d\n    check: {type: line-pattern, pattern: a}\n",
        ),
    ];

    for (name, content) in cases {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), name, content);
        match load_ruleset(&path) {
            Err(Error::Load { source_path, .. }) => assert_eq!(source_path, path, "{name}"),
            other => panic!("{name}: expected Load error, got {other:?}"),
        }
    }
}

#[test]
fn test_directory_source() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "b.yml", HELLO_RULESET);
    write_file(
        dir.path(),
        "nested/a.yaml",
        "rules:\n  - id: MY002\n    description: No tabs\n    check: {type: line-pattern, pattern: \"\\t\", expect: no-match}\n",
    );
    write_file(dir.path(), "notes.txt", "not a ruleset");

    let catalog = load_ruleset(dir.path()).unwrap();
    assert_eq!(catalog.kind(), CatalogKind::Custom);
    assert_eq!(catalog.len(), 2);
    assert!(catalog.contains("MY001"));
    assert!(catalog.contains("MY002"));
}

#[test]
fn test_duplicate_across_files_in_one_source() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.yml", HELLO_RULESET);
    let second = write_file(dir.path(), "b.yml", HELLO_RULESET);

    match load_ruleset(dir.path()) {
        Err(Error::Load { source_path, message }) => {
            assert_eq!(source_path, second);
            assert!(message.contains("MY001"));
        }
        other => panic!("expected Load error, got {other:?}"),
    }
}

#[test]
fn test_empty_directory_gives_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let catalog = load_ruleset(dir.path()).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_multiple_sources_compose_with_defaults() {
    let dir = TempDir::new().unwrap();
    let hello = write_file(dir.path(), "hello.yml", HELLO_RULESET);
    let again = write_file(dir.path(), "again.yml", HELLO_RULESET);

    let catalogs = load_rulesets(&[hello, again]).unwrap();
    assert_eq!(catalogs.len(), 2);

    // identical definitions from two sources merge once
    let catalog = CatalogComposition::DefaultsPlusCustom
        .compose(default_catalog, &catalogs)
        .unwrap();
    assert_eq!(catalog.kind(), CatalogKind::Merged);
    assert_eq!(catalog.len(), default_catalog().unwrap().len() + 1);
    assert_eq!(catalog.ids().last(), Some("MY001"));
}

#[test]
fn test_conflicting_sources_fail_composition() {
    let dir = TempDir::new().unwrap();
    let hello = write_file(dir.path(), "hello.yml", HELLO_RULESET);
    let other = write_file(
        dir.path(),
        "other.yml",
        "rules:\n  - id: MY001\n    description: Something else\n    check: {type: line-pattern, pattern: x}\n",
    );

    let catalogs = load_rulesets(&[hello, other]).unwrap();
    let result = CatalogComposition::CustomOnly.compose(default_catalog, &catalogs);
    assert!(matches!(result, Err(Error::DuplicateId { id }) if id == "MY001"));
}

#[test]
fn test_custom_rule_shadowing_builtin_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "shadow.yml",
        "rules:\n  - id: MD001\n    description: Mine\n    check: {type: line-pattern, pattern: x}\n",
    );
    let catalogs = load_rulesets(&[path]).unwrap();
    let result = CatalogComposition::DefaultsPlusCustom.compose(default_catalog, &catalogs);
    assert!(matches!(result, Err(Error::DuplicateId { id }) if id == "MD001"));
}

#[test]
fn test_loaded_names_are_directive_targets() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "odd.yml",
        "rules:\n  - id: team/001\n    description: Odd id\n    tags: [\"docs:style\"]\n    check: {type: line-pattern, pattern: x}\n  - id: team/002\n    description: Other\n    check: {type: line-pattern, pattern: y}\n",
    );
    let catalog = load_ruleset(&path).unwrap();

    let by_tag = DirectiveBatch::new(
        DirectiveSource::CommandLine,
        parse_directives("docs:style").unwrap(),
    );
    let resolved = resolve(&catalog, &[by_tag], ResolveOptions::default());
    assert!(resolved.enables_exactly(["team/001"]));

    let by_id = DirectiveBatch::new(
        DirectiveSource::CommandLine,
        parse_directives("~team/001").unwrap(),
    );
    let resolved = resolve(&catalog, &[by_id], ResolveOptions::default());
    assert!(resolved.enables_exactly(["team/002"]));
}
