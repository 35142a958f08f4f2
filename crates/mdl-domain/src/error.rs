//! Error handling types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mdl
///
/// Every variant is fatal: it is raised before rule resolution begins and
/// aborts the run. Directives naming unknown rules or tags are not errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed directive syntax (e.g. a dangling `~`)
    #[error("Invalid directive '{input}': {message}")]
    Parse {
        /// The directive string that failed to parse
        input: String,
        /// What was wrong with it
        message: String,
    },

    /// Custom rule source exists but could not be turned into a catalog
    #[error("Failed to load ruleset {source_path}: {message}")]
    Load {
        /// File the definition came from
        source_path: PathBuf,
        /// Description of the problem
        message: String,
    },

    /// Custom rule source does not exist
    #[error("Custom ruleset not found: {path}")]
    UnknownCustomRuleSource {
        /// The path that was requested
        path: PathBuf,
    },

    /// Two merged catalogs define the same rule id differently
    #[error("Rule {id} is defined more than once with conflicting definitions")]
    DuplicateId {
        /// The conflicting rule id
        id: String,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid regular expression in a rule definition
    #[error("Invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Rule resolution error creation methods
impl Error {
    /// Create a directive parse error
    pub fn parse<I: Into<String>, S: Into<String>>(input: I, message: S) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a ruleset load error
    pub fn load<P: Into<PathBuf>, S: Into<String>>(source_path: P, message: S) -> Self {
        Self::Load {
            source_path: source_path.into(),
            message: message.into(),
        }
    }

    /// Create an unknown custom ruleset error
    pub fn unknown_source<P: Into<PathBuf>>(path: P) -> Self {
        Self::UnknownCustomRuleSource { path: path.into() }
    }

    /// Create a duplicate rule id error
    pub fn duplicate_id<S: Into<String>>(id: S) -> Self {
        Self::DuplicateId { id: id.into() }
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
