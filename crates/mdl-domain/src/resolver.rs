//! Resolution Engine
//!
//! Folds directive batches over a catalog's baseline activation and freezes
//! the result into a [`ResolvedRuleSet`].
//!
//! Batches are applied in source precedence order (config file, then
//! command line), whatever order they are handed in. Inside a batch,
//! directives apply left to right and the last one touching a rule wins.
//! A batch that includes anything starts from an empty selection, so
//! `-r MD001` means "only MD001" while `-r ~MD001` means "everything but
//! MD001". Directives naming nothing in the catalog are dropped before
//! that decision and never raise errors.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::RuleCatalog;
use crate::directive::{Directive, DirectiveKind};

/// Configuration layer a batch came from, ordered by precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DirectiveSource {
    /// Persisted configuration (file and environment)
    ConfigFile,
    /// Command-line flags
    CommandLine,
}

impl DirectiveSource {
    /// Precedence rank, lowest applied first
    pub fn rank(self) -> usize {
        match self {
            Self::ConfigFile => 1,
            Self::CommandLine => 2,
        }
    }
}

impl std::fmt::Display for DirectiveSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigFile => write!(f, "config file"),
            Self::CommandLine => write!(f, "command line"),
        }
    }
}

/// Directives coming from one configuration source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBatch {
    /// Where the directives came from
    pub source: DirectiveSource,
    /// Directives in the order written
    pub directives: Vec<Directive>,
}

impl DirectiveBatch {
    /// Create a batch, stamping each directive with the source's rank
    pub fn new(source: DirectiveSource, directives: Vec<Directive>) -> Self {
        let directives = directives
            .into_iter()
            .map(|d| Directive {
                source_order: source.rank(),
                ..d
            })
            .collect();
        Self { source, directives }
    }

    /// Whether the batch has no directives
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Resolution switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Let directives name rules by alias as well as by id
    pub match_aliases: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            match_aliases: true,
        }
    }
}

/// Activation of one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleActivation {
    /// Rule id
    pub id: String,
    /// Whether the rule runs
    pub enabled: bool,
}

/// Final, read-only rule activation
///
/// Entries follow catalog definition order. Clones share storage, so the
/// set can be handed to any number of concurrent checkers.
#[derive(Debug, Clone)]
pub struct ResolvedRuleSet {
    entries: Arc<[RuleActivation]>,
    index: Arc<HashMap<String, usize>>,
}

impl ResolvedRuleSet {
    fn freeze(catalog: &RuleCatalog, state: Vec<bool>) -> Self {
        let entries: Vec<RuleActivation> = catalog
            .ids()
            .zip(state)
            .map(|(id, enabled)| RuleActivation {
                id: id.to_owned(),
                enabled,
            })
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.id.clone(), idx))
            .collect();

        Self {
            entries: entries.into(),
            index: Arc::new(index),
        }
    }

    /// All rules with their activation, in catalog order
    pub fn entries(&self) -> &[RuleActivation] {
        &self.entries
    }

    /// Number of rules known to the set (enabled or not)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set knows no rules
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a rule is enabled; unknown ids are not
    pub fn is_enabled(&self, id: &str) -> bool {
        self.index
            .get(id)
            .is_some_and(|&idx| self.entries[idx].enabled)
    }

    /// Enabled rule ids in catalog order
    pub fn enabled_ids(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.id.as_str())
    }

    /// Number of enabled rules
    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|e| e.enabled).count()
    }

    /// Whether exactly the given rules, and no others, are enabled
    pub fn enables_exactly<I, S>(&self, expected: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let expected: BTreeSet<String> = expected
            .into_iter()
            .map(|s| s.as_ref().to_owned())
            .collect();
        expected.len() == self.enabled_count() && expected.iter().all(|id| self.is_enabled(id))
    }
}

impl PartialEq for ResolvedRuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for ResolvedRuleSet {}

/// Catalog positions a directive target expands to, if it names anything
fn expand(catalog: &RuleCatalog, target: &str, options: ResolveOptions) -> Option<Vec<usize>> {
    if let Some(position) = catalog.position(target) {
        return Some(vec![position]);
    }
    if options.match_aliases {
        if let Some(position) = catalog.alias_position(target) {
            return Some(vec![position]);
        }
    }
    catalog
        .has_tag(target)
        .then(|| catalog.tag_positions(target).to_vec())
}

fn apply_batch(
    catalog: &RuleCatalog,
    batch: &DirectiveBatch,
    options: ResolveOptions,
    state: &mut [bool],
) {
    let expanded: Vec<(DirectiveKind, Vec<usize>)> = batch
        .directives
        .iter()
        .filter_map(|directive| match expand(catalog, &directive.target, options) {
            Some(positions) => Some((directive.kind, positions)),
            None => {
                debug!(
                    source = %batch.source,
                    directive = %directive,
                    "ignoring directive: no rule, alias or tag by that name"
                );
                None
            }
        })
        .collect();

    if expanded.iter().any(|(kind, _)| kind.enables()) {
        debug!(source = %batch.source, "batch includes rules, starting from an empty selection");
        state.fill(false);
    }

    for (kind, positions) in expanded {
        for position in positions {
            state[position] = kind.enables();
        }
    }
}

/// Resolve the enabled rule set
///
/// Pure: same catalog, batches and options always give the same result.
pub fn resolve(
    catalog: &RuleCatalog,
    batches: &[DirectiveBatch],
    options: ResolveOptions,
) -> ResolvedRuleSet {
    let mut state: Vec<bool> = catalog.iter().map(|r| r.enabled_by_default).collect();

    let mut ordered: Vec<&DirectiveBatch> = batches.iter().collect();
    ordered.sort_by_key(|batch| batch.source);

    for batch in ordered {
        apply_batch(catalog, batch, options, &mut state);
    }

    let resolved = ResolvedRuleSet::freeze(catalog, state);
    debug!(
        catalog = %catalog.kind(),
        rules = resolved.len(),
        enabled = resolved.enabled_count(),
        "rule set resolved"
    );
    resolved
}
