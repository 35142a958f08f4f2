//! Domain layer constants
//!
//! Constants shared by the directive grammar, the checker and the reporter.
//! Infrastructure-specific constants live in `mdl_infrastructure::constants`.

// ============================================================================
// DIRECTIVE GRAMMAR
// ============================================================================

/// Separator between items of a directive string (`MD001,MD002`)
pub const DIRECTIVE_SEPARATOR: char = ',';

/// Prefix marking an item as an exclusion (`~MD001`)
pub const EXCLUDE_PREFIX: char = '~';

// ============================================================================
// REPORTING
// ============================================================================

/// Path label used for documents read from standard input
pub const STDIN_LABEL: &str = "(stdin)";

/// First line of the enabled-rule listing
pub const LISTING_HEADER: &str = "Enabled rules:";
