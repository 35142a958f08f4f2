//! Built-in Rule Registry
//!
//! The default rule set, defined as data: id, alias, tags, description and
//! the check function each rule runs.

pub mod checks;

use mdl_domain::{CatalogKind, Check, Document, Result, RuleCatalog, RuleDefinition};
use tracing::debug;

use crate::constants::BUILTIN_CHECK_PREFIX;

/// Declare a built-in rule backed by a function in [`checks`]
fn builtin(
    id: &str,
    alias: &str,
    tags: &[&str],
    description: &str,
    lines: fn(&Document) -> Vec<usize>,
) -> RuleDefinition {
    let check = Check::from_lines(format!("{BUILTIN_CHECK_PREFIX}:{id}"), lines);
    RuleDefinition::new(id, description, check)
        .with_alias(alias)
        .with_tags(tags.iter().copied())
}

/// The default catalog, ordered by rule id
///
/// Fails with [`mdl_domain::Error::DuplicateId`] if two built-in rules share an id.
pub fn default_catalog() -> Result<RuleCatalog> {
    let mut rules: Vec<RuleDefinition> = header_rules()
        .into_iter()
        .chain(list_rules())
        .chain(whitespace_rules())
        .chain(code_rules())
        .chain(inline_rules())
        .collect();
    rules.sort_by(|a, b| a.id.cmp(&b.id));

    debug!(rules = rules.len(), "built-in rules registered");
    RuleCatalog::from_rules(CatalogKind::Default, rules)
}

/// Heading rules
pub fn header_rules() -> Vec<RuleDefinition> {
    vec![
        builtin(
            "MD001",
            "header-increment",
            &["headers"],
            "Header levels should only increment by one level at a time",
            checks::header_increment,
        ),
        builtin(
            "MD002",
            "first-header-h1",
            &["headers"],
            "First header should be a top level header",
            checks::first_header_h1,
        ),
        builtin(
            "MD003",
            "header-style",
            &["headers"],
            "Header style",
            checks::header_style,
        ),
        builtin(
            "MD018",
            "no-missing-space-atx",
            &["headers", "atx", "spaces"],
            "No space after hash on atx style header",
            checks::no_missing_space_atx,
        ),
        builtin(
            "MD019",
            "no-multiple-space-atx",
            &["headers", "atx", "spaces"],
            "Multiple spaces after hash on atx style header",
            checks::no_multiple_space_atx,
        ),
        builtin(
            "MD022",
            "blanks-around-headers",
            &["headers", "blank_lines"],
            "Headers should be surrounded by blank lines",
            checks::blanks_around_headers,
        ),
        builtin(
            "MD023",
            "header-start-left",
            &["headers", "spaces"],
            "Headers must start at the beginning of the line",
            checks::header_start_left,
        ),
        builtin(
            "MD024",
            "no-duplicate-header",
            &["headers"],
            "Multiple headers with the same content",
            checks::no_duplicate_header,
        ),
        builtin(
            "MD025",
            "single-h1",
            &["headers"],
            "Multiple top level headers in the same document",
            checks::single_h1,
        ),
        builtin(
            "MD026",
            "no-trailing-punctuation",
            &["headers"],
            "Trailing punctuation in header",
            checks::no_trailing_punctuation,
        ),
        builtin(
            "MD036",
            "no-emphasis-as-header",
            &["headers", "emphasis"],
            "Emphasis used instead of a header",
            checks::no_emphasis_as_header,
        ),
        builtin(
            "MD041",
            "first-line-h1",
            &["headers"],
            "First line in file should be a top level header",
            checks::first_line_h1,
        ),
    ]
}

/// List rules
pub fn list_rules() -> Vec<RuleDefinition> {
    vec![
        builtin(
            "MD004",
            "ul-style",
            &["bullet", "ul"],
            "Unordered list style",
            checks::ul_style,
        ),
        builtin(
            "MD005",
            "list-indent",
            &["bullet", "ul", "indentation"],
            "Inconsistent indentation for list items at the same level",
            checks::list_indent,
        ),
        builtin(
            "MD006",
            "ul-start-left",
            &["bullet", "ul", "indentation"],
            "Consider starting bulleted lists at the beginning of the line",
            checks::ul_start_left,
        ),
        builtin(
            "MD007",
            "ul-indent",
            &["bullet", "ul", "indentation"],
            "Unordered list indentation",
            checks::ul_indent,
        ),
        builtin(
            "MD029",
            "ol-prefix",
            &["ol"],
            "Ordered list item prefix",
            checks::ol_prefix,
        ),
        builtin(
            "MD030",
            "list-marker-space",
            &["ol", "ul", "whitespace"],
            "Spaces after list markers",
            checks::list_marker_space,
        ),
        builtin(
            "MD032",
            "blanks-around-lists",
            &["bullet", "ul", "ol", "blank_lines"],
            "Lists should be surrounded by blank lines",
            checks::blanks_around_lists,
        ),
    ]
}

/// Whitespace and line rules
pub fn whitespace_rules() -> Vec<RuleDefinition> {
    vec![
        builtin(
            "MD009",
            "no-trailing-spaces",
            &["whitespace"],
            "Trailing spaces",
            checks::no_trailing_spaces,
        ),
        builtin(
            "MD010",
            "no-hard-tabs",
            &["whitespace", "hard_tab"],
            "Hard tabs",
            checks::no_hard_tabs,
        ),
        builtin(
            "MD012",
            "no-multiple-blanks",
            &["whitespace", "blank_lines"],
            "Multiple consecutive blank lines",
            checks::no_multiple_blanks,
        ),
        builtin(
            "MD013",
            "line-length",
            &["line_length"],
            "Line length",
            checks::line_length,
        ),
        builtin(
            "MD027",
            "no-multiple-space-blockquote",
            &["blockquote", "whitespace", "indentation"],
            "Multiple spaces after blockquote symbol",
            checks::no_multiple_space_blockquote,
        ),
        builtin(
            "MD047",
            "single-trailing-newline",
            &["blank_lines"],
            "File should end with a single newline character",
            checks::single_trailing_newline,
        ),
    ]
}

/// Code rules
pub fn code_rules() -> Vec<RuleDefinition> {
    vec![
        builtin(
            "MD031",
            "blanks-around-fences",
            &["code", "blank_lines"],
            "Fenced code blocks should be surrounded by blank lines",
            checks::blanks_around_fences,
        ),
        builtin(
            "MD038",
            "no-space-in-code",
            &["whitespace", "code"],
            "Spaces inside code span elements",
            checks::no_space_in_code,
        ),
        builtin(
            "MD040",
            "fenced-code-language",
            &["code"],
            "Fenced code blocks should have a language specified",
            checks::fenced_code_language,
        ),
    ]
}

/// Inline markup rules
pub fn inline_rules() -> Vec<RuleDefinition> {
    vec![
        builtin(
            "MD011",
            "no-reversed-links",
            &["links"],
            "Reversed link syntax",
            checks::no_reversed_links,
        ),
        builtin(
            "MD033",
            "no-inline-html",
            &["html"],
            "Inline HTML",
            checks::no_inline_html,
        ),
        builtin(
            "MD034",
            "no-bare-urls",
            &["links", "url"],
            "Bare URL used",
            checks::no_bare_urls,
        ),
        builtin(
            "MD037",
            "no-space-in-emphasis",
            &["whitespace", "emphasis"],
            "Spaces inside emphasis markers",
            checks::no_space_in_emphasis,
        ),
        builtin(
            "MD039",
            "no-space-in-links",
            &["whitespace", "links"],
            "Spaces inside link text",
            checks::no_space_in_links,
        ),
    ]
}
