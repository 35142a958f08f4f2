//! Configuration management
//!
//! Layered configuration: defaults, then a TOML file, then `MDL_*`
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
