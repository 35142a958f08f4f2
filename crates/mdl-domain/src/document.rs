//! Line-oriented markdown document model
//!
//! A deliberately small view of a markdown file: enough structure (fenced
//! code blocks, headings, list items) for the built-in checks to work line
//! by line. It is not a CommonMark parser.

use once_cell::sync::Lazy;
use regex::Regex;

static ATX_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*)(?P<hashes>#{1,6})(?:\s+(?P<text>.*?))?\s*$")
        .expect("valid ATX heading regex")
});

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*)(?P<marker>[*+-]|(?P<number>\d{1,9})(?P<delim>[.)]))(?P<space>\s+)\S")
        .expect("valid list item regex")
});

static THEMATIC_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s{0,3}(?:(?:\*\s*){3,}|(?:-\s*){3,}|(?:_\s*){3,})$")
        .expect("valid thematic break regex")
});

/// How a heading was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingStyle {
    /// `# Heading`
    Atx,
    /// `# Heading #`
    AtxClosed,
    /// `Heading` underlined with `===` or `---`
    Setext,
}

impl std::fmt::Display for HeadingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Atx => write!(f, "atx"),
            Self::AtxClosed => write!(f, "atx_closed"),
            Self::Setext => write!(f, "setext"),
        }
    }
}

/// A heading found outside code blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1-based line of the heading text
    pub line: usize,
    /// Heading level, 1 to 6
    pub level: u8,
    /// Syntax used
    pub style: HeadingStyle,
    /// Leading whitespace before the heading
    pub indent: usize,
    /// Heading text without markers
    pub text: String,
}

/// Marker of a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `*`, `+` or `-`
    Bullet(char),
    /// `1.` or `1)`
    Ordered {
        /// The number written before the delimiter
        number: u64,
        /// `.` or `)`
        delimiter: char,
    },
}

impl ListMarker {
    /// Whether this is an unordered list marker
    pub fn is_bullet(&self) -> bool {
        matches!(self, Self::Bullet(_))
    }
}

/// A list item found outside code blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// 1-based line of the item
    pub line: usize,
    /// Leading whitespace before the marker
    pub indent: usize,
    /// The list marker
    pub marker: ListMarker,
    /// Whitespace between the marker and the content
    pub spaces_after: usize,
}

/// A fenced code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// 1-based line of the opening fence
    pub start: usize,
    /// 1-based line of the closing fence (last line when unclosed)
    pub end: usize,
    /// Info string after the opening fence (language)
    pub info: String,
}

/// A markdown document split into lines
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
    in_code: Vec<bool>,
    code_blocks: Vec<CodeBlock>,
    headings: Vec<Heading>,
    list_items: Vec<ListItem>,
    trailing_newline: bool,
}

impl Document {
    /// Build a document from its full text
    pub fn new(text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        let trailing_newline = text.is_empty() || text.ends_with('\n');
        let (in_code, code_blocks) = scan_code_blocks(&lines);
        let list_items = scan_list_items(&lines, &in_code);
        let headings = scan_headings(&lines, &in_code, &list_items);

        Self {
            lines,
            in_code,
            code_blocks,
            headings,
            list_items,
            trailing_newline,
        }
    }

    /// All lines, without line terminators
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line with the given 1-based number
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// `(line number, text)` pairs, 1-based
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.as_str()))
    }

    /// `(line number, text)` pairs for lines outside fenced code blocks
    pub fn prose_lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.numbered_lines()
            .filter(move |(number, _)| !self.in_code_block(*number))
    }

    /// Whether the 1-based line is part of a fenced code block (fences included)
    pub fn in_code_block(&self, number: usize) -> bool {
        number
            .checked_sub(1)
            .and_then(|idx| self.in_code.get(idx))
            .copied()
            .unwrap_or(false)
    }

    /// Whether the 1-based line is blank; lines past the end count as blank
    pub fn is_blank(&self, number: usize) -> bool {
        self.line(number).is_none_or(|line| line.trim().is_empty())
    }

    /// Fenced code blocks in document order
    pub fn code_blocks(&self) -> &[CodeBlock] {
        &self.code_blocks
    }

    /// Headings in document order
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// List items in document order
    pub fn list_items(&self) -> &[ListItem] {
        &self.list_items
    }

    /// Whether the source text ended with a line terminator
    pub fn ends_with_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Whether the line is a thematic break (`---`, `***`, `___`)
    pub fn is_thematic_break(line: &str) -> bool {
        THEMATIC_BREAK.is_match(line)
    }
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn fence_of(line: &str) -> Option<(char, usize, &str)> {
    let trimmed = line.trim_start();
    let fence_char = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == fence_char).count();
    (len >= 3).then(|| (fence_char, len, trimmed[len..].trim()))
}

fn scan_code_blocks(lines: &[String]) -> (Vec<bool>, Vec<CodeBlock>) {
    let mut in_code = vec![false; lines.len()];
    let mut blocks = Vec::new();
    let mut open: Option<(char, usize, usize, String)> = None;

    for (idx, line) in lines.iter().enumerate() {
        match open.take() {
            None => {
                if let Some((fence_char, len, info)) = fence_of(line) {
                    in_code[idx] = true;
                    open = Some((fence_char, len, idx, info.to_owned()));
                }
            }
            Some((fence_char, len, start, info)) => {
                in_code[idx] = true;
                let closes = fence_of(line)
                    .is_some_and(|(c, l, rest)| c == fence_char && l >= len && rest.is_empty());
                if closes {
                    blocks.push(CodeBlock {
                        start: start + 1,
                        end: idx + 1,
                        info,
                    });
                } else {
                    open = Some((fence_char, len, start, info));
                }
            }
        }
    }

    if let Some((_, _, start, info)) = open {
        blocks.push(CodeBlock {
            start: start + 1,
            end: lines.len(),
            info,
        });
    }

    (in_code, blocks)
}

fn scan_list_items(lines: &[String], in_code: &[bool]) -> Vec<ListItem> {
    lines
        .iter()
        .enumerate()
        .filter(|(idx, line)| !in_code[*idx] && !Document::is_thematic_break(line))
        .filter_map(|(idx, line)| {
            let caps = LIST_ITEM.captures(line)?;
            let marker = match caps.name("number") {
                Some(number) => ListMarker::Ordered {
                    number: number.as_str().parse().ok()?,
                    delimiter: caps.name("delim")?.as_str().chars().next()?,
                },
                None => ListMarker::Bullet(caps.name("marker")?.as_str().chars().next()?),
            };
            Some(ListItem {
                line: idx + 1,
                indent: caps.name("indent").map_or(0, |m| m.as_str().len()),
                marker,
                spaces_after: caps.name("space").map_or(0, |m| m.as_str().len()),
            })
        })
        .collect()
}

fn scan_headings(lines: &[String], in_code: &[bool], list_items: &[ListItem]) -> Vec<Heading> {
    let is_list_line = |idx: usize| list_items.iter().any(|item| item.line == idx + 1);
    let mut headings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if in_code[idx] {
            continue;
        }

        if let Some(caps) = ATX_HEADING.captures(line) {
            let hashes = caps.name("hashes").map_or("", |m| m.as_str());
            let raw_text = caps.name("text").map_or("", |m| m.as_str());
            let stripped = raw_text.trim_end_matches('#');
            let closed = stripped.len() != raw_text.len()
                && (stripped.is_empty() || stripped.ends_with(char::is_whitespace));
            let (style, text) = if closed {
                (HeadingStyle::AtxClosed, stripped.trim_end())
            } else {
                (HeadingStyle::Atx, raw_text)
            };
            headings.push(Heading {
                line: idx + 1,
                level: u8::try_from(hashes.len()).unwrap_or(6),
                style,
                indent: leading_whitespace(line),
                text: text.to_owned(),
            });
            continue;
        }

        let Some(next) = lines.get(idx + 1) else {
            continue;
        };
        let underline = next.trim();
        let level = if !underline.is_empty() && underline.chars().all(|c| c == '=') {
            1
        } else if !underline.is_empty() && underline.chars().all(|c| c == '-') {
            2
        } else {
            continue;
        };
        if line.trim().is_empty()
            || in_code[idx + 1]
            || is_list_line(idx)
            || line.trim_start().starts_with('>')
            || Document::is_thematic_break(line)
        {
            continue;
        }
        headings.push(Heading {
            line: idx + 1,
            level,
            style: HeadingStyle::Setext,
            indent: leading_whitespace(line),
            text: line.trim().to_owned(),
        });
    }

    headings
}
