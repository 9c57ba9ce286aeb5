//! CLI entrypoint for attr-refiner
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use refiner_application::{
    NoProgress, RefinementSession, ValidateAnswersInput, ValidateAnswersUseCase,
    ValidationProgress,
};
use refiner_domain::{CategorySelector, ConfigIssue, DateParser, RefinerContext, Severity};
use refiner_infrastructure::{
    ConfigLoader, FileConfig, HttpQaEngine, SparqlPlaceDirectory, SquadArticleSource,
};
use refiner_presentation::{
    Cli, ConsoleFormatter, ProgressReporter, RefineRepl, ReplConfig, SimpleProgress,
};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting attr-refiner");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    report_issues(&config.validate())?;

    // === Dependency Injection ===
    // issues were reported by validate() above
    let (settings, _) = config.refine.to_settings();
    let settings = match cli.page_size {
        Some(page_size) => settings.with_page_size(page_size),
        None => settings,
    };
    let (bounds, _) = config.dates.parse_bounds();
    let (eras, _) = config.dates.parse_eras();
    let (backend, _) = config.phonetic.parse_reader();
    let (max_bucket, _) = config.phonetic.parse_max_bucket();
    let (catalog, _) = config.catalog();

    let places = SparqlPlaceDirectory::from_config(&config.sparql)
        .context("Failed to set up the knowledge-graph client")?;
    info!("Knowledge graph: {}", places.endpoint());
    let dates = DateParser::new(eras).context("Failed to build the date parser")?;

    let context = RefinerContext::new(Arc::new(places), backend.build(), Arc::new(dates))
        .with_bounds(bounds)
        .with_max_bucket(max_bucket);
    let session = RefinementSession::new(CategorySelector::new(catalog, context), settings);

    let mut repl = RefineRepl::new(session, ReplConfig::default());
    if let Some(category) = &cli.category {
        repl = repl.with_category(category);
    }
    let Some(queries) = repl.run()? else {
        return Ok(());
    };
    let Some(category) = repl.session().category() else {
        bail!("Session completed without a category");
    };

    let format = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    if !cli.validate {
        match format {
            refiner_domain::OutputFormat::Json => {
                println!("{}", ConsoleFormatter::queries_json(&queries))
            }
            _ => print!("{}", ConsoleFormatter::queries(&queries)),
        }
        return Ok(());
    }

    validate(&cli, &config, ValidateAnswersInput::new(category, queries), format)
}

fn validate(
    cli: &Cli,
    config: &FileConfig,
    input: ValidateAnswersInput,
    format: refiner_domain::OutputFormat,
) -> Result<()> {
    let (params, _) = config.qa.to_params();
    let (paths, _) = config.datasets.parse_paths();

    let qa = HttpQaEngine::from_config(&config.qa).context("Failed to set up the QA client")?;
    let articles = SquadArticleSource::new(paths);
    let use_case = ValidateAnswersUseCase::new(Arc::new(qa), Arc::new(articles));
    let input = input.with_params(params);

    // JSON goes to stdout untouched
    let progress: Box<dyn ValidationProgress> =
        if cli.quiet || format == refiner_domain::OutputFormat::Json {
            Box::new(NoProgress)
        } else if cli.verbose > 0 {
            Box::new(SimpleProgress)
        } else {
            Box::new(ProgressReporter::new())
        };
    let report = use_case.execute_with_progress(input, progress.as_ref())?;

    println!("{}", ConsoleFormatter::report(&report, format));
    Ok(())
}

/// Logs warnings and fails on errors.
fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => eprintln!("config error: {}", issue.message),
        }
    }
    if issues.iter().any(ConfigIssue::is_error) {
        bail!("Invalid configuration");
    }
    Ok(())
}

/// Initialize logging based on verbosity level, optionally teeing into a file.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}
