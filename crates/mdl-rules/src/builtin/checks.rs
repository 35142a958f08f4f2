//! Built-in check functions
//!
//! Each function returns the 1-based lines it flags. They are line-oriented
//! heuristics over [`Document`]; exact markdownlint parity is not a goal.

use std::collections::{HashMap, HashSet};

use mdl_domain::{Document, HeadingStyle, ListItem, ListMarker};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{LINE_LENGTH_LIMIT, TRAILING_HEADING_PUNCTUATION, UL_INDENT};

static MISSING_SPACE_ATX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#+[^#\s!]").expect("valid missing-space regex"));

static MULTIPLE_SPACE_ATX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#{1,6}[ \t]{2,}\S").expect("valid multiple-space regex"));

static REVERSED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^()\s]+\)\[[^\[\]]+\]").expect("valid reversed link regex"));

static BLOCKQUOTE_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*>[ \t]{2,}\S").expect("valid blockquote regex"));

static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]*`").expect("valid code span regex"));

static INLINE_HTML: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>").expect("valid inline HTML regex")
});

static BARE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>()\[\]]+").expect("valid URL regex"));

static EMPHASIS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\*\*[^*]+\*\*|__[^_]+__|\*[^*]+\*|_[^_]+_)\s*$")
        .expect("valid emphasis line regex")
});

static SPACE_IN_EMPHASIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\*\*\s+[^*]+?\*\*|\*\*[^*\s][^*]*?\s+\*\*|__\s+[^_]+?__|__[^_\s][^_]*?\s+__|(?:^|\s)\*\s+[^*]+?\s+\*(?:\s|$)|(?:^|\s)_\s+[^_]+?\s+_(?:\s|$)",
    )
    .expect("valid space-in-emphasis regex")
});

static SPACE_IN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(?:\s[^\]]*|[^\]]*\s)\]\(").expect("valid space-in-link regex"));

static LIST_MARKER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[*+-]|\d+[.)])\s+").expect("valid list prefix regex"));

fn strip_code_spans(line: &str) -> String {
    CODE_SPAN.replace_all(line, "").into_owned()
}

// ============================================================================
// LIST STRUCTURE
// ============================================================================

/// A run of list items with their continuation lines
struct ListBlock<'d> {
    items: Vec<&'d ListItem>,
    parents: Vec<Option<usize>>,
    first_line: usize,
    last_line: usize,
}

impl ListBlock<'_> {
    /// Items grouped by parent, each group in document order
    fn sibling_groups(&self) -> Vec<Vec<&ListItem>> {
        let mut order: Vec<Option<usize>> = Vec::new();
        let mut groups: HashMap<Option<usize>, Vec<&ListItem>> = HashMap::new();
        for (item, parent) in self.items.iter().zip(&self.parents) {
            if !groups.contains_key(parent) {
                order.push(*parent);
            }
            groups.entry(*parent).or_default().push(*item);
        }
        order
            .into_iter()
            .filter_map(|parent| groups.remove(&parent))
            .collect()
    }

    fn parent_of(&self, idx: usize) -> Option<&ListItem> {
        self.parents[idx].map(|p| self.items[p])
    }
}

fn list_blocks(doc: &Document) -> Vec<ListBlock<'_>> {
    let item_at: HashMap<usize, &ListItem> =
        doc.list_items().iter().map(|item| (item.line, item)).collect();
    let mut blocks = Vec::new();
    let mut current: Option<ListBlock<'_>> = None;

    for (number, line) in doc.numbered_lines() {
        if let Some(item) = item_at.get(&number) {
            match current.as_mut() {
                Some(block) => {
                    block.items.push(*item);
                    block.last_line = number;
                }
                None => {
                    current = Some(ListBlock {
                        items: vec![*item],
                        parents: Vec::new(),
                        first_line: number,
                        last_line: number,
                    });
                }
            }
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            block.last_line = number;
        } else if let Some(done) = current.take() {
            blocks.push(done);
        }
    }
    blocks.extend(current);

    for block in &mut blocks {
        block.parents = block
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                (0..idx)
                    .rev()
                    .find(|&prev| block.items[prev].indent < item.indent)
            })
            .collect();
    }
    blocks
}

// ============================================================================
// HEADINGS
// ============================================================================

/// MD001: heading levels only increment by one
pub fn header_increment(doc: &Document) -> Vec<usize> {
    doc.headings()
        .windows(2)
        .filter(|pair| pair[1].level > pair[0].level + 1)
        .map(|pair| pair[1].line)
        .collect()
}

/// MD002: first heading is a top-level heading
pub fn first_header_h1(doc: &Document) -> Vec<usize> {
    doc.headings()
        .first()
        .filter(|h| h.level != 1)
        .map(|h| h.line)
        .into_iter()
        .collect()
}

/// MD003: one heading style throughout the document
pub fn header_style(doc: &Document) -> Vec<usize> {
    let Some(first) = doc.headings().first() else {
        return Vec::new();
    };
    doc.headings()
        .iter()
        .filter(|h| h.style != first.style)
        .map(|h| h.line)
        .collect()
}

/// MD018: space after the hashes of an ATX heading
pub fn no_missing_space_atx(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(_, line)| MISSING_SPACE_ATX.is_match(line))
        .map(|(number, _)| number)
        .collect()
}

/// MD019: a single space after the hashes of an ATX heading
pub fn no_multiple_space_atx(doc: &Document) -> Vec<usize> {
    doc.headings()
        .iter()
        .filter(|h| h.style != HeadingStyle::Setext)
        .filter(|h| {
            doc.line(h.line)
                .is_some_and(|line| MULTIPLE_SPACE_ATX.is_match(line))
        })
        .map(|h| h.line)
        .collect()
}

/// MD022: headings surrounded by blank lines
pub fn blanks_around_headers(doc: &Document) -> Vec<usize> {
    doc.headings()
        .iter()
        .filter(|h| {
            let last_line = if h.style == HeadingStyle::Setext {
                h.line + 1
            } else {
                h.line
            };
            let before = h.line > 1 && !doc.is_blank(h.line - 1);
            let after = last_line < doc.line_count() && !doc.is_blank(last_line + 1);
            before || after
        })
        .map(|h| h.line)
        .collect()
}

/// MD023: headings start at the beginning of the line
pub fn header_start_left(doc: &Document) -> Vec<usize> {
    doc.headings()
        .iter()
        .filter(|h| h.indent > 0)
        .map(|h| h.line)
        .collect()
}

/// MD024: no two headings with the same text
pub fn no_duplicate_header(doc: &Document) -> Vec<usize> {
    let mut seen = HashSet::new();
    doc.headings()
        .iter()
        .filter(|h| !seen.insert(h.text.as_str()))
        .map(|h| h.line)
        .collect()
}

/// MD025: a single top-level heading
pub fn single_h1(doc: &Document) -> Vec<usize> {
    doc.headings()
        .iter()
        .filter(|h| h.level == 1)
        .skip(1)
        .map(|h| h.line)
        .collect()
}

/// MD026: no trailing punctuation in headings
pub fn no_trailing_punctuation(doc: &Document) -> Vec<usize> {
    doc.headings()
        .iter()
        .filter(|h| h.text.ends_with(|c: char| TRAILING_HEADING_PUNCTUATION.contains(c)))
        .map(|h| h.line)
        .collect()
}

/// MD036: emphasis used instead of a heading
pub fn no_emphasis_as_header(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(number, line)| {
            EMPHASIS_LINE.is_match(line)
                && doc.is_blank(number.saturating_sub(1))
                && doc.is_blank(number + 1)
                && !line
                    .trim_end()
                    .trim_end_matches(['*', '_'])
                    .ends_with(|c: char| TRAILING_HEADING_PUNCTUATION.contains(c))
        })
        .map(|(number, _)| number)
        .collect()
}

/// MD041: the first line is a top-level heading
pub fn first_line_h1(doc: &Document) -> Vec<usize> {
    let Some((number, _)) = doc.numbered_lines().find(|(_, line)| !line.trim().is_empty()) else {
        return Vec::new();
    };
    let starts_with_h1 = doc
        .headings()
        .first()
        .is_some_and(|h| h.line == number && h.level == 1);
    if starts_with_h1 {
        Vec::new()
    } else {
        vec![number]
    }
}

// ============================================================================
// LISTS
// ============================================================================

/// MD004: one unordered list marker throughout the document
pub fn ul_style(doc: &Document) -> Vec<usize> {
    let mut bullets = doc.list_items().iter().filter_map(|item| match item.marker {
        ListMarker::Bullet(c) => Some((item.line, c)),
        ListMarker::Ordered { .. } => None,
    });
    let Some((_, expected)) = bullets.next() else {
        return Vec::new();
    };
    bullets
        .filter(|(_, c)| *c != expected)
        .map(|(line, _)| line)
        .collect()
}

/// MD005: consistent indentation for items at the same level
pub fn list_indent(doc: &Document) -> Vec<usize> {
    let mut lines = Vec::new();
    for block in list_blocks(doc) {
        for group in block.sibling_groups() {
            let expected = group[0].indent;
            lines.extend(
                group
                    .iter()
                    .filter(|item| item.indent != expected)
                    .map(|item| item.line),
            );
        }
    }
    lines.sort_unstable();
    lines
}

/// MD006: top-level bullets start at the beginning of the line
pub fn ul_start_left(doc: &Document) -> Vec<usize> {
    list_blocks(doc)
        .iter()
        .flat_map(|block| {
            block
                .items
                .iter()
                .zip(&block.parents)
                .filter(|(item, parent)| parent.is_none() && item.marker.is_bullet() && item.indent > 0)
                .map(|(item, _)| item.line)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// MD007: nested bullets indented by a fixed amount
pub fn ul_indent(doc: &Document) -> Vec<usize> {
    let mut lines = Vec::new();
    for block in list_blocks(doc) {
        for (idx, item) in block.items.iter().enumerate() {
            let Some(parent) = block.parent_of(idx) else {
                continue;
            };
            if item.marker.is_bullet()
                && parent.marker.is_bullet()
                && item.indent != parent.indent + UL_INDENT
            {
                lines.push(item.line);
            }
        }
    }
    lines
}

/// MD029: ordered list prefixes are all `1` or count up
pub fn ol_prefix(doc: &Document) -> Vec<usize> {
    let mut lines = Vec::new();
    for block in list_blocks(doc) {
        for group in block.sibling_groups() {
            let numbered: Vec<(usize, u64)> = group
                .iter()
                .filter_map(|item| match item.marker {
                    ListMarker::Ordered { number, .. } => Some((item.line, number)),
                    ListMarker::Bullet(_) => None,
                })
                .collect();
            let Some(&(_, first)) = numbered.first() else {
                continue;
            };
            let all_ones = first == 1 && numbered.get(1).is_some_and(|&(_, n)| n == 1);
            for (offset, &(line, number)) in numbered.iter().enumerate() {
                let expected = if all_ones { 1 } else { first + offset as u64 };
                if number != expected {
                    lines.push(line);
                }
            }
        }
    }
    lines.sort_unstable();
    lines
}

/// MD030: one space after list markers
pub fn list_marker_space(doc: &Document) -> Vec<usize> {
    doc.list_items()
        .iter()
        .filter(|item| item.spaces_after != 1)
        .map(|item| item.line)
        .collect()
}

/// MD032: lists surrounded by blank lines
pub fn blanks_around_lists(doc: &Document) -> Vec<usize> {
    let mut lines = Vec::new();
    for block in list_blocks(doc) {
        if block.first_line > 1 && !doc.is_blank(block.first_line - 1) {
            lines.push(block.first_line);
        }
        if block.last_line < doc.line_count() && !doc.is_blank(block.last_line + 1) {
            lines.push(block.last_line);
        }
    }
    lines.dedup();
    lines
}

// ============================================================================
// WHITESPACE AND LINES
// ============================================================================

/// MD009: no trailing whitespace
pub fn no_trailing_spaces(doc: &Document) -> Vec<usize> {
    doc.numbered_lines()
        .filter(|(_, line)| line.ends_with([' ', '\t']))
        .map(|(number, _)| number)
        .collect()
}

/// MD010: no hard tabs
pub fn no_hard_tabs(doc: &Document) -> Vec<usize> {
    doc.numbered_lines()
        .filter(|(_, line)| line.contains('\t'))
        .map(|(number, _)| number)
        .collect()
}

/// MD012: no consecutive blank lines
pub fn no_multiple_blanks(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(number, line)| {
            *number > 1 && line.trim().is_empty() && doc.is_blank(number - 1)
        })
        .map(|(number, _)| number)
        .collect()
}

/// MD013: lines no longer than the limit, unless nothing after it can wrap
pub fn line_length(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(_, line)| {
            line.chars()
                .skip(LINE_LENGTH_LIMIT)
                .any(char::is_whitespace)
        })
        .map(|(number, _)| number)
        .collect()
}

/// MD027: a single space after blockquote markers
pub fn no_multiple_space_blockquote(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(_, line)| BLOCKQUOTE_SPACES.is_match(line))
        .map(|(number, _)| number)
        .collect()
}

/// MD047: files end with a single newline
pub fn single_trailing_newline(doc: &Document) -> Vec<usize> {
    if doc.line_count() > 0 && !doc.ends_with_newline() {
        vec![doc.line_count()]
    } else {
        Vec::new()
    }
}

// ============================================================================
// CODE
// ============================================================================

/// MD031: fenced code blocks surrounded by blank lines
pub fn blanks_around_fences(doc: &Document) -> Vec<usize> {
    let mut lines = Vec::new();
    for block in doc.code_blocks() {
        if block.start > 1 && !doc.is_blank(block.start - 1) {
            lines.push(block.start);
        }
        if block.end < doc.line_count() && !doc.is_blank(block.end + 1) {
            lines.push(block.end);
        }
    }
    lines
}

/// MD038: no spaces inside code spans
pub fn no_space_in_code(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(_, line)| {
            CODE_SPAN.find_iter(line).any(|span| {
                let inner = span.as_str().trim_matches('`');
                !inner.trim().is_empty()
                    && (inner.starts_with(char::is_whitespace)
                        || inner.ends_with(char::is_whitespace))
            })
        })
        .map(|(number, _)| number)
        .collect()
}

/// MD040: fenced code blocks name a language
pub fn fenced_code_language(doc: &Document) -> Vec<usize> {
    doc.code_blocks()
        .iter()
        .filter(|block| block.info.is_empty())
        .map(|block| block.start)
        .collect()
}

// ============================================================================
// INLINE
// ============================================================================

/// MD011: link syntax not reversed
pub fn no_reversed_links(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(_, line)| REVERSED_LINK.is_match(&strip_code_spans(line)))
        .map(|(number, _)| number)
        .collect()
}

/// MD033: no inline HTML
pub fn no_inline_html(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(_, line)| INLINE_HTML.is_match(&strip_code_spans(line)))
        .map(|(number, _)| number)
        .collect()
}

/// MD034: URLs wrapped in angle brackets or link syntax
pub fn no_bare_urls(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(_, line)| {
            let text = strip_code_spans(line);
            BARE_URL.find_iter(&text).any(|url| {
                let before = text[..url.start()].chars().next_back();
                !matches!(before, Some('<' | '(' | '[' | '"' | '\''))
            })
        })
        .map(|(number, _)| number)
        .collect()
}

/// MD037: no spaces inside emphasis markers
pub fn no_space_in_emphasis(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(_, line)| {
            let text = strip_code_spans(line);
            let text = LIST_MARKER_PREFIX.replace(&text, "");
            SPACE_IN_EMPHASIS.is_match(&text)
        })
        .map(|(number, _)| number)
        .collect()
}

/// MD039: no spaces inside link text
pub fn no_space_in_links(doc: &Document) -> Vec<usize> {
    doc.prose_lines()
        .filter(|(_, line)| SPACE_IN_LINK.is_match(&strip_code_spans(line)))
        .map(|(number, _)| number)
        .collect()
}
