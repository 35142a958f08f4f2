//! YAML Ruleset Loader
//!
//! Loads custom rules from a YAML file, or from every YAML file under a
//! directory. Each source becomes one [`RuleCatalog`].
//!
//! ```yaml
//! rules:
//!   - id: MY001
//!     description: Lines must start with Hello
//!     tags: [greeting]
//!     check:
//!       type: line-pattern
//!       pattern: "^Hello"
//!       expect: match
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use mdl_domain::{
    CatalogKind, Check, Error, Result, RuleCatalog, RuleDefinition, validate_name,
};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::constants::{LINE_PATTERN_CHECK_PREFIX, RULESET_EXTENSIONS};

/// Top-level shape of a ruleset file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesetFile {
    /// Rule definitions in file order
    pub rules: Vec<CustomRuleSpec>,
}

/// One custom rule as written in YAML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomRuleSpec {
    /// Unique rule id
    pub id: String,
    /// One-line description for listings and reports
    pub description: String,
    /// Tags for bulk selection
    #[serde(default)]
    pub tags: Vec<String>,
    /// Alternative names; the first is shown with `--show-aliases`
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Baseline activation, on unless set to `false`
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// What the rule checks
    pub check: CheckSpec,
}

fn default_enabled() -> bool {
    true
}

/// Kind of check a custom rule runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckType {
    /// Test each line against a regular expression
    LinePattern,
}

/// Whether lines are expected to match the pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Expectation {
    /// Every non-blank line must match; the others are reported
    #[default]
    Match,
    /// Matching lines are reported
    NoMatch,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::NoMatch => write!(f, "no-match"),
        }
    }
}

/// The `check:` block of a custom rule
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckSpec {
    /// Check kind, written as `type:`
    #[serde(rename = "type")]
    pub kind: CheckType,
    /// Regular expression tested against each line
    pub pattern: String,
    /// Whether lines must match or must not match
    #[serde(default)]
    pub expect: Expectation,
    /// Ignore lines inside fenced code blocks
    #[serde(default)]
    pub skip_code_blocks: bool,
}

impl CheckSpec {
    /// Compile into a runnable check
    pub fn compile(&self) -> Result<Check> {
        match self.kind {
            CheckType::LinePattern => self.compile_line_pattern(),
        }
    }

    fn compile_line_pattern(&self) -> Result<Check> {
        let regex = Regex::new(&self.pattern)?;
        let expect = self.expect;
        let skip_code_blocks = self.skip_code_blocks;
        let label = format!(
            "{LINE_PATTERN_CHECK_PREFIX}:{expect}:{skip_code_blocks}:{}",
            self.pattern
        );

        Ok(Check::from_lines(label, move |doc| {
            doc.numbered_lines()
                .filter(|(number, _)| !(skip_code_blocks && doc.in_code_block(*number)))
                .filter(|(_, line)| match expect {
                    Expectation::Match => !line.trim().is_empty() && !regex.is_match(line),
                    Expectation::NoMatch => regex.is_match(line),
                })
                .map(|(number, _)| number)
                .collect()
        }))
    }
}

impl CustomRuleSpec {
    /// Turn the YAML record into a rule definition
    ///
    /// The id, tags and aliases must all be usable as directive targets.
    pub fn into_definition(self) -> Result<RuleDefinition> {
        let names = std::iter::once(&self.id)
            .chain(&self.tags)
            .chain(&self.aliases);
        for name in names {
            validate_name(name).map_err(Error::configuration)?;
        }
        let check = self.check.compile()?;
        let mut rule = RuleDefinition::new(self.id, self.description, check)
            .with_tags(self.tags)
            .enabled_by_default(self.enabled);
        for alias in self.aliases {
            rule = rule.with_alias(alias);
        }
        Ok(rule)
    }
}

/// Parse ruleset text; errors name `source`
pub fn parse_ruleset(source: &Path, content: &str) -> Result<Vec<RuleDefinition>> {
    let file: RulesetFile =
        serde_yaml::from_str(content).map_err(|e| Error::load(source, e.to_string()))?;

    file.rules
        .into_iter()
        .map(|spec| {
            let id = spec.id.clone();
            spec.into_definition()
                .map_err(|e| Error::load(source, format!("rule '{id}': {e}")))
        })
        .collect()
}

/// Load a single ruleset file
pub fn load_ruleset_file(path: &Path) -> Result<Vec<RuleDefinition>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::load(path, format!("cannot read file: {e}")))?;
    let rules = parse_ruleset(path, &content)?;
    debug!(path = %path.display(), rules = rules.len(), "ruleset file loaded");
    Ok(rules)
}

/// Whether a path looks like a ruleset file
pub fn is_ruleset_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RULESET_EXTENSIONS.contains(&ext))
}

/// Load one ruleset source (file or directory) into a custom catalog
///
/// A directory is walked recursively in file-name order. Ids must be unique
/// across the whole source.
pub fn load_ruleset(path: &Path) -> Result<RuleCatalog> {
    if !path.exists() {
        return Err(Error::unknown_source(path));
    }

    let files: Vec<PathBuf> = if path.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::load(path, e.to_string()))?;
            if entry.file_type().is_file() && is_ruleset_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut catalog = RuleCatalog::empty();
    for file in &files {
        let rules = load_ruleset_file(file)?;
        let loaded = RuleCatalog::from_rules(CatalogKind::Custom, rules)
            .map_err(|e| Error::load(file, e.to_string()))?;
        for rule in loaded.iter() {
            if catalog.contains(&rule.id) {
                return Err(Error::load(
                    file,
                    format!("rule {} is already defined in this ruleset", rule.id),
                ));
            }
        }
        catalog = RuleCatalog::merge(&catalog, &loaded)?;
    }

    debug!(
        source = %path.display(),
        files = files.len(),
        rules = catalog.len(),
        "custom ruleset loaded"
    );
    Ok(catalog)
}

/// Load several sources, one catalog each, in the order given
pub fn load_rulesets<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RuleCatalog>> {
    paths.iter().map(|p| load_ruleset(p.as_ref())).collect()
}
