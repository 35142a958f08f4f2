//! Directive Parser
//!
//! Turns directive strings such as `"~MD001,MD039"` or `"headers"` into
//! ordered include/exclude instructions.
//!
//! Grammar: `ITEM(,ITEM)*` where `ITEM = ['~'] NAME`. Whether `NAME` is a
//! rule id, an alias or a tag is decided later against the final catalog,
//! so directives can be parsed before custom rules are loaded.

use serde::Serialize;

use crate::constants::{DIRECTIVE_SEPARATOR, EXCLUDE_PREFIX};
use crate::error::{Error, Result};

/// Include or exclude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectiveKind {
    /// Enable the target
    Include,
    /// Disable the target
    Exclude,
}

impl DirectiveKind {
    /// Activation this kind assigns to its targets
    pub fn enables(self) -> bool {
        matches!(self, Self::Include)
    }
}

/// A single include/exclude instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Directive {
    /// Rule id, alias or tag name
    pub target: String,
    /// Include or exclude
    pub kind: DirectiveKind,
    /// Position of the owning batch among applied batches
    pub source_order: usize,
}

impl Directive {
    /// Create an include directive
    pub fn include<S: Into<String>>(target: S) -> Self {
        Self {
            target: target.into(),
            kind: DirectiveKind::Include,
            source_order: 0,
        }
    }

    /// Create an exclude directive
    pub fn exclude<S: Into<String>>(target: S) -> Self {
        Self {
            target: target.into(),
            kind: DirectiveKind::Exclude,
            source_order: 0,
        }
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            DirectiveKind::Include => write!(f, "{}", self.target),
            DirectiveKind::Exclude => write!(f, "{}{}", EXCLUDE_PREFIX, self.target),
        }
    }
}

/// Check that `name` can be written as a directive target
///
/// A target is any non-empty text without whitespace or separators that
/// does not itself start with the exclusion prefix. Rule ids, aliases and
/// tags loaded from rulesets are held to the same rule.
pub fn validate_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    if name.starts_with(EXCLUDE_PREFIX) {
        return Err(format!("'{name}' must not start with '{EXCLUDE_PREFIX}'"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| c.is_whitespace() || *c == DIRECTIVE_SEPARATOR)
    {
        return Err(format!("unexpected {bad:?} in '{name}'"));
    }
    Ok(())
}

/// Parse one directive string
///
/// Empty or all-whitespace input yields no directives, and empty items left
/// by a trailing or doubled separator are skipped. Unknown names are not
/// errors here; only structurally invalid items are.
pub fn parse_directives(input: &str) -> Result<Vec<Directive>> {
    input
        .split(DIRECTIVE_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_item(input, item))
        .collect()
}

/// Parse several directive strings as one ordered list
///
/// Used for config values written as a list (`rules = ["MD001", "~MD002"]`).
pub fn parse_directive_list<I, S>(inputs: I) -> Result<Vec<Directive>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut directives = Vec::new();
    for input in inputs {
        directives.extend(parse_directives(input.as_ref())?);
    }
    Ok(directives)
}

fn parse_item(input: &str, item: &str) -> Result<Directive> {
    let (kind, name) = match item.strip_prefix(EXCLUDE_PREFIX) {
        Some(rest) => (DirectiveKind::Exclude, rest),
        None => (DirectiveKind::Include, item),
    };

    if name.is_empty() {
        return Err(Error::parse(
            input,
            format!("'{EXCLUDE_PREFIX}' must be followed by a rule or tag name"),
        ));
    }
    validate_name(name).map_err(|message| Error::parse(input, message))?;

    Ok(Directive {
        target: name.to_owned(),
        kind,
        source_order: 0,
    })
}
