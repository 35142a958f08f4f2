//! Document checker
//!
//! Runs every enabled rule of a catalog over markdown documents.

use mdl_domain::{Document, ResolvedRuleSet, RuleCatalog};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// A rule violation at a specific line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Path of the checked document, or `(stdin)`
    pub path: String,
    /// 1-based line number
    pub line: usize,
    /// Rule id (e.g., "MD001")
    pub rule_id: String,
    /// Primary alias of the rule, when it has one
    pub alias: Option<String>,
    /// Rule description
    pub description: String,
}

/// A named piece of markdown waiting to be checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Label used in reports
    pub path: String,
    /// Full document text
    pub text: String,
}

impl SourceText {
    /// Pair a report label with document text
    pub fn new<P: Into<String>, T: Into<String>>(path: P, text: T) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Checks documents against the enabled rules of a resolved set
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    catalog: &'a RuleCatalog,
    resolved: &'a ResolvedRuleSet,
}

impl<'a> Checker<'a> {
    /// Checker over `catalog`, running the rules `resolved` enables
    pub fn new(catalog: &'a RuleCatalog, resolved: &'a ResolvedRuleSet) -> Self {
        Self { catalog, resolved }
    }

    /// Check one parsed document
    ///
    /// Violations come in catalog order, then by line. A rule reports a
    /// given line at most once.
    pub fn check_document(&self, path: &str, doc: &Document) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in self.catalog.iter() {
            if !self.resolved.is_enabled(&rule.id) {
                continue;
            }
            let mut lines: Vec<usize> = rule.check.run(doc).map(|f| f.line).collect();
            lines.sort_unstable();
            lines.dedup();
            violations.extend(lines.into_iter().map(|line| Violation {
                path: path.to_owned(),
                line,
                rule_id: rule.id.clone(),
                alias: rule.primary_alias().map(str::to_owned),
                description: rule.description.clone(),
            }));
        }
        debug!(path, violations = violations.len(), "document checked");
        violations
    }

    /// Parse and check markdown text
    pub fn check_text(&self, path: &str, text: &str) -> Vec<Violation> {
        self.check_document(path, &Document::new(text))
    }

    /// Check several sources in parallel; output follows input order
    pub fn check_all(&self, sources: &[SourceText]) -> Vec<Violation> {
        sources
            .par_iter()
            .map(|source| self.check_text(&source.path, &source.text))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}
