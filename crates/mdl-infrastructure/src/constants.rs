//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `mdl_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Project-local configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = ".mdlrc.toml";

/// Configuration directory name under the user config dir
pub const DEFAULT_CONFIG_DIR: &str = "mdl";

/// Configuration file name inside [`DEFAULT_CONFIG_DIR`]
pub const USER_CONFIG_FILENAME: &str = "config.toml";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "MDL";

/// Separator for nested keys in environment variables (`MDL_LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "MDL_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log level used by `--verbose`
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// ============================================================================
// INPUT CONSTANTS
// ============================================================================

/// Extensions of markdown files picked up when walking directories
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Path argument meaning standard input
pub const STDIN_ARG: &str = "-";

// ============================================================================
// EXIT CODES
// ============================================================================

/// Clean run or listing
pub const EXIT_SUCCESS: u8 = 0;

/// At least one violation was reported
pub const EXIT_VIOLATIONS: u8 = 1;

/// Fatal error (bad directive, ruleset, configuration or I/O)
pub const EXIT_ERROR: u8 = 2;
