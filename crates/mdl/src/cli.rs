//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

/// mdl - lint markdown files against a configurable rule set
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "mdl", about = "Lint markdown files against a configurable rule set", version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rules to enable or disable (`MD001,~MD002`)
    #[arg(short, long, value_name = "RULES")]
    pub rules: Option<String>,

    /// Tags to enable or disable (`headers,~whitespace`)
    #[arg(short, long, value_name = "TAGS")]
    pub tags: Option<String>,

    /// Custom ruleset files or directories, comma separated
    #[arg(short = 'u', long, value_name = "PATHS", value_delimiter = ',')]
    pub rulesets: Vec<PathBuf>,

    /// Do not load the built-in rules
    #[arg(short = 'd', long)]
    pub skip_default_ruleset: bool,

    /// List the enabled rules and exit
    #[arg(short, long)]
    pub list_rules: bool,

    /// Show rule aliases instead of ids
    #[arg(short = 'a', long)]
    pub show_aliases: bool,

    /// Print violations as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Markdown files or directories; `-` or nothing reads standard input
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Directive strings of the command-line batch, tags first
    pub fn directive_inputs(&self) -> impl Iterator<Item = &str> {
        self.tags.as_deref().into_iter().chain(self.rules.as_deref())
    }
}
