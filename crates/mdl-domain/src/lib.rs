//! # mdl domain
//!
//! Pure model of the rule-activation resolver: which lint rules run for a
//! given catalog and set of configuration directives.
//!
//! - [`rule`] - rule definitions and the check capability
//! - [`document`] - minimal line-oriented markdown view checks run on
//! - [`catalog`] - the rule universe, indexed by id, alias and tag
//! - [`directive`] - parser for `ITEM(,ITEM)*` include/exclude strings
//! - [`resolver`] - folds directive batches into a [`ResolvedRuleSet`]
//! - [`composition`] - defaults/custom catalog selection
//!
//! ## Example
//!
//! ```ignore
//! use mdl_domain::{parse_directives, resolve, DirectiveBatch, DirectiveSource, ResolveOptions};
//!
//! let cli = DirectiveBatch::new(DirectiveSource::CommandLine, parse_directives("~MD001")?);
//! let resolved = resolve(&catalog, &[cli], ResolveOptions::default());
//! assert!(!resolved.is_enabled("MD001"));
//! ```

pub mod catalog;
pub mod composition;
pub mod constants;
pub mod directive;
pub mod document;
pub mod error;
pub mod resolver;
pub mod rule;

pub use catalog::{CatalogKind, RuleCatalog};
pub use composition::CatalogComposition;
pub use directive::{
    Directive, DirectiveKind, parse_directive_list, parse_directives, validate_name,
};
pub use document::{CodeBlock, Document, Heading, HeadingStyle, ListItem, ListMarker};
pub use error::{Error, Result};
pub use resolver::{
    DirectiveBatch, DirectiveSource, ResolveOptions, ResolvedRuleSet, RuleActivation, resolve,
};
pub use rule::{Check, Finding, Findings, RuleDefinition};
