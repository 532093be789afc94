use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt};

use wellform::document::{load_document, write_document};
use wellform::processing::walker::process_document;
use wellform::rules::ReplacementRules;

#[derive(Parser)]
#[command(
    name = "wellform",
    version,
    about = "Normalize a well-report .docx and flag depth/percentage anomalies"
)]
struct Cli {
    /// Input .docx report
    input: PathBuf,

    /// Output path for the formatted document
    #[arg(short, long, default_value = "formatted_checked_output.docx")]
    output: PathBuf,

    /// Replacement-rule table (CSV with "Find" and "Replace With" columns)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Well name for the rebuilt header; the existing header is kept when
    /// omitted
    #[arg(long)]
    well_name: Option<String>,

    /// Write the anomaly report as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    init_tracing(level);

    if let Err(err) = run(cli) {
        eprintln!("Error processing the document: {err:#}");
        process::exit(1);
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt().with_max_level(level).with_target(false).finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn run(cli: Cli) -> Result<()> {
    // A missing or malformed rule table is not fatal; processing continues
    // with no substitutions.
    let rules = match &cli.rules {
        Some(path) => match ReplacementRules::load(path) {
            Ok(rules) => {
                tracing::info!("loaded {} replacement rules", rules.len());
                rules
            }
            Err(err) => {
                tracing::warn!("{err}; continuing with an empty rule set");
                ReplacementRules::new()
            }
        },
        None => ReplacementRules::new(),
    };

    let document = load_document(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    tracing::info!(
        paragraphs = document.metadata.paragraph_count,
        tables = document.metadata.table_count,
        words = document.metadata.word_count,
        "loaded {}",
        document.title
    );

    let (processed, report) = process_document(&document, &rules);

    let well_name = cli
        .well_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    write_document(&processed, well_name, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    if let Some(path) = &cli.report {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
    }

    println!("Wrote {}", cli.output.display());
    if report.is_clean() {
        println!("No anomalies found");
    } else {
        println!(
            "Flagged {} depth discontinuities and {} percentage mismatches",
            report.depth_discontinuities.len(),
            report.percentage_mismatches.len()
        );
    }

    Ok(())
}
