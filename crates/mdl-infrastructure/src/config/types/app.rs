//! Application configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::LoggingConfig;

/// A directive setting written as one string or a list of strings
///
/// `rules = "MD001,~MD002"` and `rules = ["MD001", "~MD002"]` are equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DirectiveValue {
    /// `"MD001,~MD002"`
    One(String),
    /// `["MD001", "~MD002"]`
    Many(Vec<String>),
}

impl Default for DirectiveValue {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl DirectiveValue {
    /// Directive strings in order
    pub fn items(&self) -> Vec<&str> {
        match self {
            Self::One(s) => vec![s.as_str()],
            Self::Many(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Whether no directive text is present
    pub fn is_empty(&self) -> bool {
        self.items().iter().all(|s| s.trim().is_empty())
    }
}

impl From<&str> for DirectiveValue {
    fn from(s: &str) -> Self {
        Self::One(s.to_string())
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rule directives (`MD001`, `~MD002`, aliases)
    pub rules: DirectiveValue,

    /// Tag directives (`headers`, `~whitespace`)
    pub tags: DirectiveValue,

    /// Leave the built-in rules out of the catalog
    pub skip_default_ruleset: bool,

    /// Custom ruleset files or directories
    pub rulesets: Vec<PathBuf>,

    /// Print rule aliases instead of ids
    pub show_aliases: bool,

    /// Emit violations as JSON
    pub json: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}
