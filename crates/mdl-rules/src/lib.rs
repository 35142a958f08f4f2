//! Rule sets for mdl
//!
//! - [`builtin`] - the default markdownlint-style rules
//! - [`ruleset`] - custom rules loaded from YAML
//! - [`checker`] - runs enabled rules over documents
//! - [`reporter`] - listing, text and JSON output
//!
//! ```ignore
//! use mdl_rules::{default_catalog, Checker, Reporter};
//!
//! let catalog = default_catalog()?;
//! let resolved = mdl_domain::resolve(&catalog, &[], Default::default());
//! let violations = Checker::new(&catalog, &resolved).check_text("README.md", text);
//! print!("{}", Reporter::to_text(&violations, false));
//! ```

pub mod builtin;
pub mod checker;
pub mod constants;
pub mod reporter;
pub mod ruleset;

pub use builtin::default_catalog;
pub use checker::{Checker, SourceText, Violation};
pub use reporter::Reporter;
pub use ruleset::{load_ruleset, load_rulesets, parse_ruleset};
