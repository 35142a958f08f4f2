//! Catalog composition
//!
//! Decides which catalogs form the rule universe from the skip-defaults
//! flag and the presence of custom rulesets, then builds it.

use tracing::debug;

use crate::catalog::RuleCatalog;
use crate::error::Result;

/// Which rule sources make up the final catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogComposition {
    /// Built-in rules only
    DefaultsOnly,
    /// Built-in rules plus custom rules
    DefaultsPlusCustom,
    /// Custom rules only
    CustomOnly,
    /// Defaults skipped and nothing supplied: no rule runs
    Empty,
}

impl CatalogComposition {
    /// Pick the composition for the given flags
    pub fn from_flags(skip_defaults: bool, has_custom: bool) -> Self {
        match (skip_defaults, has_custom) {
            (false, false) => Self::DefaultsOnly,
            (false, true) => Self::DefaultsPlusCustom,
            (true, true) => Self::CustomOnly,
            (true, false) => Self::Empty,
        }
    }

    /// Whether the built-in rules are needed
    pub fn uses_defaults(self) -> bool {
        matches!(self, Self::DefaultsOnly | Self::DefaultsPlusCustom)
    }

    /// Whether custom rules are part of the universe
    pub fn uses_custom(self) -> bool {
        matches!(self, Self::DefaultsPlusCustom | Self::CustomOnly)
    }

    /// Build the final catalog
    ///
    /// `defaults` is only invoked when the built-in rules are used, and its
    /// error fails the composition. Custom catalogs are merged in the order
    /// given; any conflicting id fails the whole composition.
    pub fn compose<F>(self, defaults: F, customs: &[RuleCatalog]) -> Result<RuleCatalog>
    where
        F: FnOnce() -> Result<RuleCatalog>,
    {
        let mut catalog = if self.uses_defaults() {
            defaults()?
        } else {
            RuleCatalog::empty()
        };

        if self.uses_custom() {
            for custom in customs {
                catalog = RuleCatalog::merge(&catalog, custom)?;
            }
        }

        debug!(
            composition = %self,
            kind = %catalog.kind(),
            rules = catalog.len(),
            "catalog composed"
        );
        Ok(catalog)
    }
}

impl std::fmt::Display for CatalogComposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DefaultsOnly => write!(f, "defaults-only"),
            Self::DefaultsPlusCustom => write!(f, "defaults+custom"),
            Self::CustomOnly => write!(f, "custom-only"),
            Self::Empty => write!(f, "empty"),
        }
    }
}
