//! Rule set constants

// ============================================================================
// BUILT-IN CHECK PARAMETERS
// ============================================================================

/// Maximum line length before MD013 reports
pub const LINE_LENGTH_LIMIT: usize = 80;

/// Indentation expected for nested unordered list items (MD007)
pub const UL_INDENT: usize = 2;

/// Characters that may not end a heading (MD026)
pub const TRAILING_HEADING_PUNCTUATION: &str = ".,;:!?";

/// Label prefix for built-in checks
pub const BUILTIN_CHECK_PREFIX: &str = "builtin";

// ============================================================================
// CUSTOM RULESETS
// ============================================================================

/// File extensions recognized as ruleset files
pub const RULESET_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Label prefix for pattern checks loaded from rulesets
pub const LINE_PATTERN_CHECK_PREFIX: &str = "line-pattern";
