//! Member join CLI
//!
//! Command-line tool for joining a member extract with scored and predicted
//! datasets and exporting the merged records.

use clap::{Parser, Subcommand};
use mj_core::{join_inputs, load_inputs, parse_csv, RunConfig};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "mj-cli")]
#[command(about = "Member dataset join and merge", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug events (index sizes, sample records)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the three datasets and export the merged records
    Run {
        /// Configuration file (JSON); built-in paths are used if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the export path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON run report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Join the three datasets and show match counts without exporting
    Stats {
        /// Configuration file (JSON); built-in paths are used if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse and display a single CSV file
    Inspect {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Create a configuration file with the built-in defaults
    CreateConfig {
        /// Output path for the configuration file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> mj_core::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Run {
            config,
            output,
            report,
        } => cmd_run(config.as_deref(), output, report.as_deref()),
        Commands::Stats { config, json } => cmd_stats(config.as_deref(), json),
        Commands::Inspect { file, limit } => cmd_inspect(&file, limit),
        Commands::CreateConfig { output } => cmd_create_config(&output),
    }
}

/// Logs go to stderr so stdout only carries program output
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_run(
    config_path: Option<&Path>,
    output: Option<PathBuf>,
    report_path: Option<&Path>,
) -> mj_core::Result<()> {
    let mut config = RunConfig::load_or_default(config_path)?;
    if let Some(output) = output {
        config.output = output;
    }

    let report = mj_core::run(&config)?;

    println!("{}", report.stats);
    match &report.output {
        Some(path) => println!(
            "Exported {} rows to {}",
            report.rows_written,
            path.display()
        ),
        None => println!("No records matched both datasets; nothing exported"),
    }

    if let Some(report_path) = report_path {
        report.save(report_path)?;
        println!("Report written to {}", report_path.display());
    }

    Ok(())
}

fn cmd_stats(config_path: Option<&Path>, json: bool) -> mj_core::Result<()> {
    let config = RunConfig::load_or_default(config_path)?;

    let inputs = load_inputs(&config)?;
    let outcome = join_inputs(&inputs, &config);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.stats)?);
    } else {
        println!("{}", outcome.stats);
    }

    Ok(())
}

fn cmd_inspect(file: &Path, limit: usize) -> mj_core::Result<()> {
    let dataset = parse_csv(file)?;

    println!("File: {}", file.display());
    println!("Columns: {}", dataset.column_count());
    println!("Rows: {}", dataset.row_count());
    println!();

    println!("{}", dataset.columns.join("\t"));
    println!("{}", "-".repeat(dataset.column_count() * 12));

    for row in dataset.rows.iter().take(limit) {
        let values: Vec<&str> = row.iter().map(|(_, v)| v.unwrap_or("")).collect();
        println!("{}", values.join("\t"));
    }

    if dataset.row_count() > limit {
        println!("... ({} more rows)", dataset.row_count() - limit);
    }

    Ok(())
}

fn cmd_create_config(output: &Path) -> mj_core::Result<()> {
    let config = RunConfig::default();
    config.save(output)?;

    println!("Created config file: {}", output.display());
    println!();
    println!("Edit the paths to point at your datasets, then run:");
    println!("  mj-cli run --config {}", output.display());

    Ok(())
}
