//! # mdl infrastructure
//!
//! Cross-cutting technical concerns for the mdl binary:
//!
//! - [`config`] - layered configuration (defaults, TOML file, `MDL_*` env)
//! - [`logging`] - tracing subscriber on stderr
//! - [`error_ext`] - context helpers mapping foreign errors to domain errors
//! - [`constants`] - file names, env var names, default levels

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, DirectiveValue, LoggingConfig};
pub use error_ext::ErrorContext;
