//! Unit tests for rule definitions and checks

use crate::test_utils::{rule, silent_check};
use mdl_domain::{Check, Document, Finding, Findings, RuleDefinition};

fn hello_check() -> Check {
    Check::new("starts-with-hello", |doc| {
        let findings: Findings<'_> = Box::new(
            doc.numbered_lines()
                .filter(|(_, line)| !line.starts_with("Hello"))
                .map(|(number, _)| Finding::at(number)),
        );
        findings
    })
}

#[test]
fn test_check_yields_findings_lazily() {
    let doc = Document::new("Hello\nGoodbye\nHello again\nBye\n");
    let check = hello_check();
    let mut findings = check.run(&doc);
    assert_eq!(findings.next(), Some(Finding::at(2)));
    assert_eq!(findings.next(), Some(Finding::at(4)));
    assert_eq!(findings.next(), None);
}

#[test]
fn test_check_is_restartable() {
    let doc = Document::new("Nope\n");
    let check = hello_check();
    assert_eq!(check.run(&doc).count(), 1);
    assert_eq!(check.run(&doc).count(), 1);
}

#[test]
fn test_from_lines() {
    let check = Check::from_lines("first-line", |_| vec![1]);
    let doc = Document::new("anything");
    let findings: Vec<Finding> = check.run(&doc).collect();
    assert_eq!(findings, vec![Finding::at(1)]);
    assert_eq!(check.label(), "first-line");
}

#[test]
fn test_rule_builder() {
    let rule = RuleDefinition::new("MY001", "Say hello", hello_check())
        .with_alias("hello")
        .with_tags(["greeting", "custom"])
        .enabled_by_default(false);
    assert!(rule.has_tag("greeting"));
    assert!(rule.has_alias("hello"));
    assert_eq!(rule.primary_alias(), Some("hello"));
    assert!(!rule.enabled_by_default);
}

#[test]
fn test_same_definition_compares_check_labels() {
    let a = rule("MY001", &["x"]);
    let b = rule("MY001", &["x"]);
    assert!(a.same_definition(&b));

    let mut c = rule("MY001", &["x"]);
    c.check = silent_check("different");
    assert!(!a.same_definition(&c));

    let d = rule("MY001", &["y"]);
    assert!(!a.same_definition(&d));
}
