//! mdl - markdown lint tool
//!
//! Exit codes: 0 clean or listing, 1 violations found, 2 fatal error.

use std::process::ExitCode;

use clap::Parser;
use mdl::Cli;
use mdl::infrastructure::constants::EXIT_ERROR;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match mdl::execute(&cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("mdl: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
