use analytics::{AnalyticsEngine, ProductFilter};
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use configuration::{Config, load_config};
use core_types::{ConversionOutcome, ProductCollection};
use ingest::{FileSource, ProductSource, SampleGenerator, load_collection, write_sample_file};
use reporter::{ExportPaths, ReportDocument};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// The main entry point for the SRP collection and analysis tool.
fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if let Commands::Analyze(args) = &cli.command {
        if let Some(dir) = &args.output_dir {
            config.export.output_dir = dir.clone();
        }
    }

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = init_tracing(log_dir(&cli.command, &config))?;

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, &config),
        Commands::Validate(args) => handle_validate(args),
        Commands::Filter(args) => handle_filter(args, &config),
        Commands::GenerateSample(args) => handle_generate_sample(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Collects, validates and analyzes Structured Retail Products (SRP).
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "srp.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load products, analyze them and write the JSON and HTML exports.
    Analyze(AnalyzeArgs),
    /// List every problem of every record in a data file.
    Validate(ValidateArgs),
    /// Print the products matching the given criteria.
    Filter(FilterArgs),
    /// Write a file of generated sample products.
    GenerateSample(GenerateSampleArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// JSON data file to analyze. Without it, sample data is generated over
    /// the configured collection period.
    #[arg(long)]
    from_file: Option<PathBuf>,

    /// Overrides the configured output directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Number of products generated when no data file is given.
    #[arg(long, default_value_t = 100)]
    sample_count: usize,
}

#[derive(Parser)]
struct ValidateArgs {
    /// JSON data file to check.
    #[arg(long)]
    from_file: PathBuf,
}

#[derive(Parser)]
struct FilterArgs {
    /// JSON data file to search.
    #[arg(long)]
    from_file: PathBuf,

    /// Country code (FR, BE).
    #[arg(long)]
    country: Option<String>,

    /// Currency code (EUR, USD, GBP, CHF, JPY).
    #[arg(long)]
    currency: Option<String>,

    /// Product type (bond, note, certificate, warrant, option, swap, future, other).
    #[arg(long)]
    product_type: Option<String>,

    /// Risk level from 1 (very low) to 5 (very high).
    #[arg(long)]
    risk_level: Option<String>,

    /// Minimum nominal value, inclusive.
    #[arg(long)]
    min_nominal: Option<String>,

    /// Maximum nominal value, inclusive.
    #[arg(long)]
    max_nominal: Option<String>,

    /// Case-insensitive part of the issuer name.
    #[arg(long)]
    issuer: Option<String>,

    /// Start from the configured default filter thresholds.
    #[arg(long)]
    use_defaults: bool,
}

impl FilterArgs {
    /// The criteria given on the command line, as filter key/value pairs.
    fn pairs(&self) -> Vec<(&str, &str)> {
        [
            ("country", &self.country),
            ("currency", &self.currency),
            ("product_type", &self.product_type),
            ("risk_level", &self.risk_level),
            ("min_nominal_value", &self.min_nominal),
            ("max_nominal_value", &self.max_nominal),
            ("issuer", &self.issuer),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

#[derive(Parser)]
struct GenerateSampleArgs {
    /// Number of products to generate.
    #[arg(long, default_value_t = 100)]
    count: usize,

    /// Destination file.
    #[arg(long, default_value = "sample_srp_data.json")]
    output: PathBuf,

    /// First possible issue date (YYYY-MM-DD). Defaults to the configured start date.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last possible issue date (YYYY-MM-DD). Defaults to the configured end date.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Only `analyze` writes into the output directory, so only it gets the log file.
fn log_dir<'a>(command: &Commands, config: &'a Config) -> Option<&'a Path> {
    matches!(command, Commands::Analyze(_)).then_some(config.export.output_dir.as_path())
}

/// Logs to stdout and, when `log_dir` is given, to a daily rotated
/// `srp_collection.log` in it. The level comes from `RUST_LOG` and defaults
/// to `info`.
fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::daily(dir, "srp_collection.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().with_ansi(false).with_writer(file_writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads (or generates) products, analyzes them and writes every export.
fn handle_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let outcome = match &args.from_file {
        Some(path) => read_file(path)?,
        None => {
            let (start, end) = (config.collection.start_date, config.collection.effective_end_date());
            tracing::info!(%start, %end, count = args.sample_count, "No data file given; using sample data.");
            let records = SampleGenerator::new(start, end)?
                .with_countries(&config.collection.countries)
                .generate(args.sample_count);
            ProductCollection::from_raw(records)
        }
    };
    report_rejections(&outcome);
    let collection = outcome.collection;

    let engine = AnalyticsEngine::new(config.analysis.clone());
    let result = engine.analyze(&collection);
    let doc = ReportDocument::build(&result, Utc::now());

    let export = &config.export;
    let paths = ExportPaths {
        products: export.products_path(),
        analysis: export.analysis_path(),
        report: export.report_path(),
    };
    let failures = reporter::write_all(&paths, &collection, &result, &doc);

    println!("{}", reporter::render_text(&doc));
    if let Some(summary) = engine.summary(&collection) {
        println!(
            "Issue dates from {} to {}.",
            summary.date_range.start, summary.date_range.end
        );
    }

    for (label, path) in [("Products:", &paths.products), ("Analysis:", &paths.analysis), ("Report:", &paths.report)] {
        if !failures.iter().any(|(failed, _)| failed == path) {
            println!("{label:<9} {}", path.display());
        }
    }
    if !failures.is_empty() {
        for (_, e) in &failures {
            eprintln!("{e}");
        }
        bail!("{} of 3 export(s) failed", failures.len());
    }
    Ok(())
}

/// Prints every problem of every invalid record. Fails if any record is invalid.
fn handle_validate(args: ValidateArgs) -> Result<()> {
    let source = FileSource::new(&args.from_file);
    let records = source
        .fetch()
        .with_context(|| format!("Failed to read {}", args.from_file.display()))?;

    let mut invalid = 0;
    for (index, record) in records.iter().enumerate() {
        let problems = record.problems();
        if problems.is_empty() {
            continue;
        }
        invalid += 1;
        let id = record.id_text().unwrap_or_else(|| "<no id>".to_string());
        for problem in problems {
            println!("record {index} ({id}): {problem}");
        }
    }

    println!("{} record(s) checked, {invalid} invalid.", records.len());
    if invalid > 0 {
        bail!("{invalid} invalid record(s) in {}", args.from_file.display());
    }
    Ok(())
}

fn handle_filter(args: FilterArgs, config: &Config) -> Result<()> {
    let base = if args.use_defaults {
        ProductFilter::from(&config.analysis.default_filter)
    } else {
        ProductFilter::new()
    };
    let filter = base.with_pairs(args.pairs())?;

    let outcome = read_file(&args.from_file)?;
    report_rejections(&outcome);

    let engine = AnalyticsEngine::new(config.analysis.clone());
    let matched = engine.filter(&outcome.collection, &filter);
    print!("{}", reporter::render_products(&matched));
    Ok(())
}

fn handle_generate_sample(args: GenerateSampleArgs, config: &Config) -> Result<()> {
    let start = args.from.unwrap_or(config.collection.start_date);
    let end = args.to.unwrap_or_else(|| config.collection.effective_end_date());

    let mut generator = SampleGenerator::new(start, end)?.with_countries(&config.collection.countries);
    if let Some(seed) = args.seed {
        generator = generator.with_seed(seed);
    }
    let records = generator.generate(args.count);

    write_sample_file(&args.output, &records)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Wrote {} sample product(s) to {}", records.len(), args.output.display());
    Ok(())
}

fn read_file(path: &Path) -> Result<ConversionOutcome> {
    load_collection(&FileSource::new(path)).with_context(|| format!("Failed to load {}", path.display()))
}

fn report_rejections(outcome: &ConversionOutcome) {
    if outcome.errors.is_empty() {
        return;
    }
    eprintln!("{} record(s) skipped:", outcome.errors.len());
    for rejected in &outcome.errors {
        eprintln!("  {rejected}");
    }
}
