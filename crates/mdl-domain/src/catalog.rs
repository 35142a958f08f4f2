//! Rule Catalog
//!
//! The universe of rules a run can enable. Rules keep their definition
//! order, which is the order used for listing and checking.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::rule::RuleDefinition;

/// Where a catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CatalogKind {
    /// Built-in rule set
    Default,
    /// User-supplied rule definitions
    Custom,
    /// Union of two catalogs
    Merged,
    /// No rules at all
    Empty,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Custom => write!(f, "custom"),
            Self::Merged => write!(f, "merged"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Registry of rule definitions keyed by id
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    kind: CatalogKind,
    rules: Vec<RuleDefinition>,
    by_id: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
    by_tag: HashMap<String, Vec<usize>>,
}

impl RuleCatalog {
    /// Create a catalog with no rules
    pub fn empty() -> Self {
        Self {
            kind: CatalogKind::Empty,
            rules: Vec::new(),
            by_id: HashMap::new(),
            by_alias: HashMap::new(),
            by_tag: HashMap::new(),
        }
    }

    /// Build a catalog from definitions in order
    ///
    /// Fails with [`Error::DuplicateId`] when the same id appears twice.
    pub fn from_rules(kind: CatalogKind, rules: Vec<RuleDefinition>) -> Result<Self> {
        let mut catalog = Self {
            kind,
            ..Self::empty()
        };
        for rule in rules {
            catalog.insert(rule)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, rule: RuleDefinition) -> Result<()> {
        if self.by_id.contains_key(&rule.id) {
            return Err(Error::duplicate_id(rule.id));
        }

        let position = self.rules.len();
        self.by_id.insert(rule.id.clone(), position);
        for alias in &rule.aliases {
            self.by_alias.entry(alias.clone()).or_insert(position);
        }
        for tag in &rule.tags {
            self.by_tag.entry(tag.clone()).or_default().push(position);
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Union of two catalogs, `a`'s rules first
    ///
    /// A rule present in both with an identical definition is kept once.
    /// The same id with a different definition fails with
    /// [`Error::DuplicateId`]: custom rules add to a catalog, they never
    /// shadow an existing rule.
    pub fn merge(a: &RuleCatalog, b: &RuleCatalog) -> Result<RuleCatalog> {
        let kind = match (a.is_empty(), b.is_empty()) {
            (true, true) => CatalogKind::Empty,
            (false, true) => a.kind,
            (true, false) => b.kind,
            (false, false) => CatalogKind::Merged,
        };

        let mut merged = Self {
            kind,
            ..Self::empty()
        };
        for rule in a.iter() {
            merged.insert(rule.clone())?;
        }
        for rule in b.iter() {
            match merged.get(&rule.id) {
                Some(existing) if existing.same_definition(rule) => {
                    debug!(rule = %rule.id, "identical rule definition merged once");
                }
                Some(_) => return Err(Error::duplicate_id(rule.id.clone())),
                None => merged.insert(rule.clone())?,
            }
        }
        Ok(merged)
    }

    /// Where this catalog came from
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the catalog has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in definition order
    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    /// Iterate rules in definition order
    pub fn iter(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter()
    }

    /// Rule ids in definition order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.id.as_str())
    }

    /// Get a rule by id
    pub fn get(&self, id: &str) -> Option<&RuleDefinition> {
        self.position(id).map(|idx| &self.rules[idx])
    }

    /// Whether a rule with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Definition-order position of a rule id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Definition-order position of the rule answering to an alias
    pub fn alias_position(&self, alias: &str) -> Option<usize> {
        self.by_alias.get(alias).copied()
    }

    /// Definition-order positions of rules carrying a tag
    pub fn tag_positions(&self, tag: &str) -> &[usize] {
        self.by_tag.get(tag).map_or(&[], Vec::as_slice)
    }

    /// Whether any rule carries this tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Ids of rules carrying a tag, in definition order
    pub fn ids_with_tag(&self, tag: &str) -> Vec<&str> {
        self.tag_positions(tag)
            .iter()
            .map(|&idx| self.rules[idx].id.as_str())
            .collect()
    }

    /// Mapping from tag to the ids carrying it, tags sorted
    pub fn tag_index(&self) -> BTreeMap<&str, Vec<&str>> {
        self.by_tag
            .keys()
            .map(|tag| (tag.as_str(), self.ids_with_tag(tag)))
            .collect()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::empty()
    }
}
