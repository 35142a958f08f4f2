//! Tests for the built-in rule set

use crate::test_utils::{CLEAN_DOCUMENT, baseline, flagged};
use mdl_domain::{
    CatalogKind, DirectiveBatch, DirectiveSource, ResolveOptions, parse_directives, resolve,
};
use mdl_rules::builtin::checks;
use mdl_rules::{Checker, default_catalog};

// ==================== Catalog ====================

#[test]
fn test_default_catalog_contents() {
    let catalog = default_catalog().unwrap();
    assert_eq!(catalog.kind(), CatalogKind::Default);
    assert_eq!(catalog.len(), 33);

    let ids: Vec<&str> = catalog.ids().collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted, "default rules are listed in id order");
    assert!(catalog.iter().all(|r| r.enabled_by_default));
}

#[test]
fn test_default_catalog_aliases_and_tags() {
    let catalog = default_catalog().unwrap();
    assert_eq!(catalog.alias_position("header-increment"), catalog.position("MD001"));
    assert_eq!(catalog.get("MD039").unwrap().primary_alias(), Some("no-space-in-links"));

    let headers = catalog.ids_with_tag("headers");
    for id in ["MD001", "MD002", "MD003", "MD018", "MD041"] {
        assert!(headers.contains(&id), "{id} should be tagged headers");
    }
    assert!(!headers.contains(&"MD004"));
    assert_eq!(catalog.ids_with_tag("hard_tab"), vec!["MD010"]);
}

#[test]
fn test_builtin_check_labels_are_unique() {
    let catalog = default_catalog().unwrap();
    let mut labels: Vec<&str> = catalog.iter().map(|r| r.check.label()).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), catalog.len());
}

#[test]
fn test_enable_tags_selects_headers_and_whitespace() {
    let catalog = default_catalog().unwrap();
    let batch = DirectiveBatch::new(
        DirectiveSource::ConfigFile,
        parse_directives("headers,whitespace").unwrap(),
    );
    let resolved = resolve(&catalog, &[batch], ResolveOptions::default());
    for id in ["MD001", "MD002", "MD009", "MD010"] {
        assert!(resolved.is_enabled(id), "{id} should be enabled");
    }
    for id in ["MD004", "MD005"] {
        assert!(!resolved.is_enabled(id), "{id} should be disabled");
    }
}

#[test]
fn test_disable_tags_keeps_other_rules() {
    let catalog = default_catalog().unwrap();
    let batch = DirectiveBatch::new(
        DirectiveSource::ConfigFile,
        parse_directives("~headers,~indentation").unwrap(),
    );
    let resolved = resolve(&catalog, &[batch], ResolveOptions::default());
    for id in ["MD004", "MD030", "MD032"] {
        assert!(resolved.is_enabled(id), "{id} should be enabled");
    }
    for id in ["MD001", "MD005"] {
        assert!(!resolved.is_enabled(id), "{id} should be disabled");
    }
}

#[test]
fn test_clean_document_passes_every_rule() {
    let catalog = default_catalog().unwrap();
    let resolved = baseline(&catalog);
    let violations = Checker::new(&catalog, &resolved).check_text("clean.md", CLEAN_DOCUMENT);
    assert!(violations.is_empty(), "unexpected violations: {violations:?}");
}

// ==================== Headings ====================

#[test]
fn test_header_increment() {
    assert_eq!(flagged(checks::header_increment, "# A\n\n### C\n"), vec![3]);
    assert!(flagged(checks::header_increment, "# A\n\n## B\n\n### C\n\n# D\n").is_empty());
}

#[test]
fn test_first_header_h1() {
    assert_eq!(flagged(checks::first_header_h1, "## A\n"), vec![1]);
    assert!(flagged(checks::first_header_h1, "# A\n").is_empty());
    assert!(flagged(checks::first_header_h1, "no headings\n").is_empty());
}

#[test]
fn test_header_style() {
    assert_eq!(flagged(checks::header_style, "# A\n\nB\n---\n"), vec![3]);
    assert!(flagged(checks::header_style, "# A\n\n## B\n").is_empty());
}

#[test]
fn test_atx_spacing() {
    assert_eq!(flagged(checks::no_missing_space_atx, "#Heading\n"), vec![1]);
    assert!(flagged(checks::no_missing_space_atx, "# Heading\n").is_empty());
    assert_eq!(flagged(checks::no_multiple_space_atx, "#  Heading\n"), vec![1]);
    assert!(flagged(checks::no_multiple_space_atx, "# Heading\n").is_empty());
}

#[test]
fn test_blanks_around_headers() {
    assert_eq!(flagged(checks::blanks_around_headers, "Text\n# H\n\nMore\n"), vec![2]);
    assert!(flagged(checks::blanks_around_headers, "# H\n\nText\n").is_empty());
}

#[test]
fn test_header_start_left() {
    assert_eq!(flagged(checks::header_start_left, " # H\n"), vec![1]);
}

#[test]
fn test_duplicate_and_multiple_h1() {
    assert_eq!(flagged(checks::no_duplicate_header, "# A\n\n## B\n\n## B\n"), vec![5]);
    assert_eq!(flagged(checks::single_h1, "# A\n\n# B\n"), vec![3]);
}

#[test]
fn test_no_trailing_punctuation() {
    assert_eq!(flagged(checks::no_trailing_punctuation, "# Hello.\n"), vec![1]);
    assert!(flagged(checks::no_trailing_punctuation, "# Hello\n").is_empty());
}

#[test]
fn test_no_emphasis_as_header() {
    assert_eq!(
        flagged(checks::no_emphasis_as_header, "Intro\n\n**Section**\n\nBody\n"),
        vec![3]
    );
    assert!(flagged(checks::no_emphasis_as_header, "Intro\n\n**Note:**\n\nBody\n").is_empty());
}

#[test]
fn test_first_line_h1() {
    assert_eq!(flagged(checks::first_line_h1, "Text\n"), vec![1]);
    assert!(flagged(checks::first_line_h1, "\n# A\n").is_empty());
    assert!(flagged(checks::first_line_h1, "").is_empty());
}

// ==================== Lists ====================

#[test]
fn test_ul_style() {
    assert_eq!(flagged(checks::ul_style, "* a\n- b\n"), vec![2]);
    assert!(flagged(checks::ul_style, "* a\n* b\n").is_empty());
}

#[test]
fn test_list_indent() {
    assert_eq!(flagged(checks::list_indent, "* a\n  * b\n * c\n"), vec![3]);
    assert!(flagged(checks::list_indent, "* a\n  * b\n  * c\n").is_empty());
}

#[test]
fn test_ul_start_left() {
    assert_eq!(flagged(checks::ul_start_left, " * a\n * b\n"), vec![1, 2]);
}

#[test]
fn test_ul_indent() {
    assert_eq!(flagged(checks::ul_indent, "* a\n    * b\n"), vec![2]);
    assert!(flagged(checks::ul_indent, "* a\n  * b\n").is_empty());
}

#[test]
fn test_ol_prefix() {
    assert!(flagged(checks::ol_prefix, "1. a\n1. b\n1. c\n").is_empty());
    assert!(flagged(checks::ol_prefix, "1. a\n2. b\n3. c\n").is_empty());
    assert_eq!(flagged(checks::ol_prefix, "1. a\n3. b\n"), vec![2]);
    assert_eq!(flagged(checks::ol_prefix, "1. a\n1. b\n2. c\n"), vec![3]);
}

#[test]
fn test_list_marker_space() {
    assert_eq!(flagged(checks::list_marker_space, "*  a\n"), vec![1]);
}

#[test]
fn test_blanks_around_lists() {
    assert_eq!(
        flagged(checks::blanks_around_lists, "Text\n* a\n* b\nMore\n"),
        vec![2, 3]
    );
    assert!(flagged(checks::blanks_around_lists, "Text\n\n* a\n* b\n\nMore\n").is_empty());
}

// ==================== Whitespace ====================

#[test]
fn test_whitespace_rules() {
    assert_eq!(flagged(checks::no_trailing_spaces, "a \nb\n"), vec![1]);
    assert_eq!(flagged(checks::no_hard_tabs, "a\tb\n"), vec![1]);
    assert_eq!(flagged(checks::no_multiple_blanks, "a\n\n\nb\n"), vec![3]);
    assert_eq!(flagged(checks::no_multiple_space_blockquote, ">  quote\n"), vec![1]);
    assert!(flagged(checks::no_multiple_space_blockquote, "> quote\n").is_empty());
}

#[test]
fn test_line_length() {
    let unbreakable = "x".repeat(100);
    assert!(flagged(checks::line_length, &unbreakable).is_empty());

    let long = format!("{} word\n", "x".repeat(85));
    assert_eq!(flagged(checks::line_length, &long), vec![1]);
}

#[test]
fn test_single_trailing_newline() {
    assert_eq!(flagged(checks::single_trailing_newline, "a"), vec![1]);
    assert!(flagged(checks::single_trailing_newline, "a\n").is_empty());
}

// ==================== Code ====================

#[test]
fn test_blanks_around_fences() {
    assert_eq!(
        flagged(checks::blanks_around_fences, "Text\n```rust\ncode\n```\nMore\n"),
        vec![2, 4]
    );
}

#[test]
fn test_code_rules() {
    assert_eq!(flagged(checks::no_space_in_code, "Use ` code ` here\n"), vec![1]);
    assert!(flagged(checks::no_space_in_code, "Use `code` here\n").is_empty());
    assert_eq!(flagged(checks::fenced_code_language, "```\ncode\n```\n"), vec![1]);
}

#[test]
fn test_code_blocks_are_not_prose() {
    let doc = "# Title\n\n```text\n#not-a-heading\n<b>html</b>\n```\n";
    assert!(flagged(checks::no_missing_space_atx, doc).is_empty());
    assert!(flagged(checks::no_inline_html, doc).is_empty());
}

// ==================== Inline ====================

#[test]
fn test_inline_rules() {
    assert_eq!(
        flagged(checks::no_reversed_links, "(https://example.com)[Example]\n"),
        vec![1]
    );
    assert_eq!(flagged(checks::no_inline_html, "Some <b>bold</b>\n"), vec![1]);
    assert!(flagged(checks::no_inline_html, "Some `<b>` code\n").is_empty());
    assert!(flagged(checks::no_inline_html, "<https://example.com>\n").is_empty());
    assert_eq!(flagged(checks::no_space_in_links, "[ link ](https://x.y)\n"), vec![1]);
    assert!(flagged(checks::no_space_in_links, "[link](https://x.y)\n").is_empty());
}

#[test]
fn test_no_bare_urls() {
    assert_eq!(flagged(checks::no_bare_urls, "Visit https://example.com now\n"), vec![1]);
    assert!(flagged(checks::no_bare_urls, "Visit <https://example.com>\n").is_empty());
    assert!(flagged(checks::no_bare_urls, "[x](https://example.com)\n").is_empty());
}

#[test]
fn test_no_space_in_emphasis() {
    assert_eq!(flagged(checks::no_space_in_emphasis, "This is ** bold ** text\n"), vec![1]);
    assert!(flagged(checks::no_space_in_emphasis, "This is **bold** text\n").is_empty());
    assert!(flagged(checks::no_space_in_emphasis, "* list item\n").is_empty());
}
