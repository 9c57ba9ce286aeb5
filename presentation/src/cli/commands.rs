//! CLI command definitions

use clap::{Parser, ValueEnum};
use refiner_domain::Category;
use std::path::PathBuf;

/// Output format for validation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every surviving article with its accepted answers
    Full,
    /// Only the titles of surviving articles
    Titles,
    /// JSON report
    Json,
}

impl From<OutputFormat> for refiner_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => refiner_domain::OutputFormat::Full,
            OutputFormat::Titles => refiner_domain::OutputFormat::Titles,
            OutputFormat::Json => refiner_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for attr-refiner
#[derive(Parser, Debug)]
#[command(name = "attr-refiner")]
#[command(author, version, about = "Interactive attribute refinement over QA answers")]
#[command(long_about = r#"
attr-refiner narrows free-text attributes ("生年月日", "出身地") step by step
into queries, then optionally checks them against a QA engine.

The session has three stages:
1. Category: pick what kind of entity you are looking for
2. Attributes: pick an attribute and refine it (dates, places)
3. 完了: finish and print the collected queries

Configuration files are loaded from (in priority order):
1. REFINER_* environment variables
2. --config <path>     Explicit config file
3. ./refiner.toml      Project-level config
4. ~/.config/attr-refiner/config.toml   Global config

Example:
  attr-refiner
  attr-refiner --category PERSON --page-size 20
  attr-refiner --validate --output json
"#)]
pub struct Cli {
    /// Category to start with (label or name, e.g. 人名 or PERSON)
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Run the validation driver on the finished queries
    #[arg(long)]
    pub validate: bool,

    /// Options per prompt (overrides config)
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Output format for validation reports (overrides config)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Parsed `--category`, if given
    pub fn parse_category(&self) -> Option<Result<Category, String>> {
        self.category.as_deref().map(str::parse)
    }
}
