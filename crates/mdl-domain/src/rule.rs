//! Rule definitions
//!
//! A rule is a plain data record plus a check function value. There is no
//! rule trait hierarchy: built-in and custom rules differ only in the
//! closure they carry.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::document::Document;

/// A single problem reported by a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Finding {
    /// 1-based line number
    pub line: usize,
}

impl Finding {
    /// Create a finding at the given 1-based line
    pub fn at(line: usize) -> Self {
        Self { line }
    }
}

/// Lazy, single-pass sequence of findings for one document
pub type Findings<'a> = Box<dyn Iterator<Item = Finding> + 'a>;

/// Signature of a check function
pub type CheckFn = dyn for<'a> Fn(&'a Document) -> Findings<'a> + Send + Sync;

/// The check capability of a rule
///
/// `label` is a stable fingerprint of what the check does. Two checks with
/// the same label are considered the same check when catalogs are merged.
#[derive(Clone)]
pub struct Check {
    label: String,
    run: Arc<CheckFn>,
}

impl Check {
    /// Wrap a check function
    pub fn new<L, F>(label: L, run: F) -> Self
    where
        L: Into<String>,
        F: for<'a> Fn(&'a Document) -> Findings<'a> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            run: Arc::new(run),
        }
    }

    /// Wrap a function that returns every offending line number at once
    pub fn from_lines<L, F>(label: L, lines: F) -> Self
    where
        L: Into<String>,
        F: Fn(&Document) -> Vec<usize> + Send + Sync + 'static,
    {
        Self::new(label, move |doc| {
            let findings: Findings<'_> = Box::new(lines(doc).into_iter().map(Finding::at));
            findings
        })
    }

    /// Fingerprint of this check
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the check against a document
    pub fn run<'a>(&self, doc: &'a Document) -> Findings<'a> {
        (self.run)(doc)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("label", &self.label).finish()
    }
}

/// Immutable rule definition
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    /// Unique rule identifier (e.g., "MD001")
    pub id: String,
    /// Alternative names usable in directives (e.g., "header-increment")
    pub aliases: Vec<String>,
    /// Grouping labels for bulk inclusion and exclusion
    pub tags: BTreeSet<String>,
    /// One-line description shown in listings and reports
    pub description: String,
    /// Baseline activation before any directive is applied
    pub enabled_by_default: bool,
    /// What the rule checks
    pub check: Check,
}

impl RuleDefinition {
    /// Create an enabled-by-default rule with no aliases or tags
    pub fn new<I, D>(id: I, description: D, check: Check) -> Self
    where
        I: Into<String>,
        D: Into<String>,
    {
        Self {
            id: id.into(),
            aliases: Vec::new(),
            tags: BTreeSet::new(),
            description: description.into(),
            enabled_by_default: true,
            check,
        }
    }

    /// Add an alias
    pub fn with_alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the baseline activation
    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.enabled_by_default = enabled;
        self
    }

    /// Whether the rule carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether the rule answers to the given alias
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    /// First alias, if any
    pub fn primary_alias(&self) -> Option<&str> {
        self.aliases.first().map(String::as_str)
    }

    /// Whether two definitions describe the same rule
    ///
    /// Checks are compared by label since closures have no identity.
    pub fn same_definition(&self, other: &Self) -> bool {
        self.id == other.id
            && self.aliases == other.aliases
            && self.tags == other.tags
            && self.description == other.description
            && self.enabled_by_default == other.enabled_by_default
            && self.check.label() == other.check.label()
    }
}
