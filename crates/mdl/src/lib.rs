//! # mdl
//!
//! Markdown lint tool with configurable rule activation.
//!
//! Rules come from the built-in default set and from custom YAML rulesets;
//! which of them run is decided by `ITEM(,ITEM)*` directives from the
//! configuration file and the command line, the command line winning.
//!
//! ## Example
//!
//! ```ignore
//! use clap::Parser;
//! use mdl::{Cli, run};
//!
//! let cli = Cli::parse_from(["mdl", "-r", "~MD013", "README.md"]);
//! let outcome = run(&cli, &Default::default(), std::io::empty(), &mut std::io::stdout())?;
//! std::process::exit(outcome.exit_code().into());
//! ```
//!
//! ## Layers
//!
//! - `domain` - catalog, directives, resolution and composition
//! - `rules` - built-in rules, YAML rulesets, checker and reporter
//! - `infrastructure` - configuration and logging

/// Domain layer - catalog, directives and resolution
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use mdl_domain::*;
}

/// Rules layer - built-in rules, rulesets, checker and reporter
pub mod rules {
    pub use mdl_rules::*;
}

/// Infrastructure layer - configuration and logging
pub mod infrastructure {
    pub use mdl_infrastructure::*;
}

pub mod cli;
pub mod input;
pub mod run;

pub use cli::Cli;
pub use run::{Outcome, Settings, execute, run};
