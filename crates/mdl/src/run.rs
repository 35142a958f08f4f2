//! End-to-end run
//!
//! Folds the command line over the loaded configuration, composes the
//! catalog, resolves the enabled rules and either lists them or checks the
//! inputs and reports violations.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use mdl_domain::error::Result;
use mdl_domain::{
    CatalogComposition, DirectiveBatch, DirectiveSource, ResolveOptions, RuleCatalog,
    parse_directive_list, resolve,
};
use mdl_infrastructure::constants::{EXIT_SUCCESS, EXIT_VIOLATIONS};
use mdl_infrastructure::logging::{init_logging, log_config_loaded};
use mdl_infrastructure::{AppConfig, ConfigLoader, ErrorContext};
use mdl_rules::{Checker, Reporter, default_catalog, load_rulesets};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::input::collect_sources;

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Enabled rules were listed
    Listed,
    /// Inputs were checked and nothing was reported
    Clean,
    /// Inputs were checked and this many violations were reported
    Violations(usize),
}

impl Outcome {
    /// Process exit code
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Listed | Self::Clean => EXIT_SUCCESS,
            Self::Violations(_) => EXIT_VIOLATIONS,
        }
    }
}

/// Effective settings of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directive batches, configuration first
    pub batches: Vec<DirectiveBatch>,
    /// Leave the built-in rules out
    pub skip_default_ruleset: bool,
    /// Custom ruleset sources
    pub rulesets: Vec<PathBuf>,
    /// Name rules by alias in output
    pub show_aliases: bool,
    /// JSON violation report
    pub json: bool,
    /// List enabled rules instead of checking
    pub list_rules: bool,
}

impl Settings {
    /// Fold the command line over the configuration
    ///
    /// Each source contributes one batch, tag directives before rule
    /// directives. Flags are OR-ed; command-line rulesets replace the
    /// configured ones.
    pub fn new(cli: &Cli, config: &AppConfig) -> Result<Self> {
        let config_directives =
            parse_directive_list(config.tags.items().into_iter().chain(config.rules.items()))?;
        let cli_directives = parse_directive_list(cli.directive_inputs())?;

        let rulesets = if cli.rulesets.is_empty() {
            config.rulesets.clone()
        } else {
            cli.rulesets.clone()
        };

        Ok(Self {
            batches: vec![
                DirectiveBatch::new(DirectiveSource::ConfigFile, config_directives),
                DirectiveBatch::new(DirectiveSource::CommandLine, cli_directives),
            ],
            skip_default_ruleset: cli.skip_default_ruleset || config.skip_default_ruleset,
            rulesets,
            show_aliases: cli.show_aliases || config.show_aliases,
            json: cli.json || config.json,
            list_rules: cli.list_rules,
        })
    }

    /// Catalog for these settings: defaults and/or custom rulesets
    pub fn catalog(&self) -> Result<RuleCatalog> {
        let customs = load_rulesets(&self.rulesets)?;
        let composition =
            CatalogComposition::from_flags(self.skip_default_ruleset, !customs.is_empty());
        debug!(?composition, sources = customs.len(), "composing rule catalog");
        composition.compose(default_catalog, &customs)
    }
}

/// Run against an already loaded configuration
///
/// Reports go to `out`; `stdin` is read only when an input asks for it.
pub fn run<R: Read, W: Write>(
    cli: &Cli,
    config: &AppConfig,
    stdin: R,
    out: &mut W,
) -> Result<Outcome> {
    let settings = Settings::new(cli, config)?;
    let catalog = settings.catalog()?;
    let resolved = resolve(&catalog, &settings.batches, ResolveOptions::default());
    debug!(
        enabled = resolved.enabled_count(),
        total = catalog.len(),
        "rules resolved"
    );

    if settings.list_rules {
        out.write_all(Reporter::listing(&catalog, &resolved, settings.show_aliases).as_bytes())
            .io_context("Failed to write rule listing")?;
        out.flush().io_context("Failed to write rule listing")?;
        return Ok(Outcome::Listed);
    }

    let sources = collect_sources(&cli.files, stdin)?;
    let violations = Checker::new(&catalog, &resolved).check_all(&sources);
    info!(
        inputs = sources.len(),
        violations = violations.len(),
        "check complete"
    );

    let report = if settings.json {
        format!("{}\n", Reporter::to_json(&violations))
    } else {
        Reporter::to_text(&violations, settings.show_aliases)
    };
    out.write_all(report.as_bytes())
        .io_context("Failed to write report")?;
    out.flush().io_context("Failed to write report")?;

    Ok(if violations.is_empty() {
        Outcome::Clean
    } else {
        Outcome::Violations(violations.len())
    })
}

/// Load configuration, start logging and run on the process streams
pub fn execute(cli: &Cli) -> Result<Outcome> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }

    let mut config = loader.load()?;
    config.logging.verbose |= cli.verbose;
    init_logging(&config.logging)?;

    match (loader.config_file(), loader.config_path()) {
        (Some(path), _) => debug!(path = %path.display(), "using configuration file"),
        (None, Some(missing)) => log_config_loaded(missing, false),
        (None, None) => debug!("no configuration file, using defaults"),
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run(cli, &config, stdin.lock(), &mut stdout)
}
