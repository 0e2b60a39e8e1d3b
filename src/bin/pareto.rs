//! pareto - Pareto tier classification CLI
//!
//! Command-line interface for classifying property usage frequencies.

use clap::{Parser, Subcommand, ValueEnum};
use pareto_select::data::{read_records, ClassifiedRecord};
use pareto_select::error::Result;
use pareto_select::pareto::{ParetoScale, TableFormat};
use pareto_select::pipeline::{run_selection, SelectionConfig, SelectionReport};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PARETO_LOG";

/// Output format for classified records
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Summary followed by an aligned table
    Text,
    /// Tab-separated rows
    Tsv,
    Json,
    Yaml,
}

/// Output format for the tier reference table
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelsFormat {
    Tsv,
    Markdown,
    Mediawiki,
    Latex,
    Json,
    /// One described tier per line
    Text,
}

/// Pareto tier classification of property usage frequencies
#[derive(Parser)]
#[command(name = "pareto")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify frequency records and select those above a minimum percentage
    Classify {
        /// Records file: TSV with key, label, type, count columns, or a JSON array
        #[arg(short, long)]
        input: PathBuf,

        /// Population size used as the ratio denominator
        #[arg(short, long)]
        total: f64,

        /// Selection configuration YAML
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum percentage, overrides the configuration
        #[arg(short, long)]
        min_percent: Option<f64>,

        /// Number of Pareto levels, overrides the configuration
        #[arg(long)]
        max_level: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Only output selected records
        #[arg(long)]
        selected_only: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the Pareto level reference table
    Levels {
        /// Number of levels to show
        #[arg(long, default_value = "9")]
        max_level: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "tsv")]
        format: LevelsFormat,

        /// Use the long description in text format
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate an example selection configuration
    Example {
        /// Output path for the example YAML
        #[arg(short, long, default_value = "selection.yaml")]
        output: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            input,
            total,
            config,
            min_percent,
            max_level,
            format,
            selected_only,
            output,
        } => cmd_classify(
            &input,
            total,
            config.as_ref(),
            min_percent,
            max_level,
            format,
            selected_only,
            output.as_ref(),
        ),
        Commands::Levels {
            max_level,
            format,
            verbose,
        } => cmd_levels(max_level, format, verbose),
        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("pareto_select=info,pareto=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_output(output: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}

/// Classify a records file
#[allow(clippy::too_many_arguments)]
fn cmd_classify(
    input: &Path,
    total: f64,
    config_path: Option<&PathBuf>,
    min_percent: Option<f64>,
    max_level: Option<u32>,
    format: OutputFormat,
    selected_only: bool,
    output: Option<&PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading selection configuration");
            SelectionConfig::from_file(path)?
        }
        None => SelectionConfig::default(),
    };
    if let Some(pct) = min_percent {
        config.minimum_percentage = pct;
    }
    if let Some(level) = max_level {
        config.max_level = level;
    }

    tracing::info!(path = %input.display(), "loading records");
    let records = read_records(input)?;

    let report = run_selection(&config, total, records)?;
    tracing::info!(
        classified = report.summary.n_classified,
        selected = report.summary.n_selected,
        skipped = report.skipped.len(),
        "done"
    );

    let mut out = open_output(output)?;
    match format {
        OutputFormat::Text => write_text(&mut out, &report, selected_only)?,
        OutputFormat::Tsv => report.write_tsv(&mut out, selected_only)?,
        OutputFormat::Json => {
            let view = report_view(&report, selected_only);
            serde_json::to_writer_pretty(&mut out, &view)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => {
            let view = report_view(&report, selected_only);
            serde_yaml::to_writer(&mut out, &view)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn report_view(report: &SelectionReport, selected_only: bool) -> serde_json::Value {
    let records: Vec<&ClassifiedRecord> = if selected_only {
        report.selected_records()
    } else {
        report.classified.iter().collect()
    };
    serde_json::json!({
        "name": report.name,
        "total": report.total,
        "minimum_percentage": report.summary.minimum_percentage,
        "records": records,
        "skipped": report.skipped,
        "summary": report.summary,
    })
}

fn write_text<W: Write>(out: &mut W, report: &SelectionReport, selected_only: bool) -> Result<()> {
    write!(out, "{}", report.summary)?;
    if !report.skipped.is_empty() {
        writeln!(out, "  Skipped malformed records at: {:?}", report.skipped)?;
    }
    writeln!(out)?;

    let records: Vec<&ClassifiedRecord> = if selected_only {
        report.selected_records()
    } else {
        report.classified.iter().collect()
    };
    writeln!(
        out,
        "{:>5}  {:<12} {:<30} {:>10} {:>7} {:>4}",
        "#", "key", "label", "count", "%", "tier"
    )?;
    for r in records {
        writeln!(
            out,
            "{:>5}  {:<12} {:<30} {:>10} {:>7} {:>4}",
            r.index,
            r.key,
            r.label,
            r.count,
            r.percent_text(),
            r.tier
        )?;
    }
    Ok(())
}

/// Show the tier reference table
fn cmd_levels(max_level: u32, format: LevelsFormat, verbose: bool) -> Result<()> {
    let scale = ParetoScale::new(max_level)?;
    let mut out = io::stdout().lock();

    match format {
        LevelsFormat::Tsv => write!(out, "{}", scale.to_table(TableFormat::Tsv))?,
        LevelsFormat::Markdown => write!(out, "{}", scale.to_table(TableFormat::Markdown))?,
        LevelsFormat::Mediawiki => write!(out, "{}", scale.to_table(TableFormat::Mediawiki))?,
        LevelsFormat::Latex => write!(out, "{}", scale.to_table(TableFormat::Latex))?,
        LevelsFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &scale.records())?;
            writeln!(out)?;
        }
        LevelsFormat::Text => {
            for level in scale.iter() {
                writeln!(out, "{}", level.describe(verbose))?;
            }
        }
    }
    Ok(())
}

/// Write an example selection configuration
fn cmd_example(output: &Path) -> Result<()> {
    let config = SelectionConfig::example();
    let yaml = config.to_yaml()?;
    let content = format!(
        "# Example Pareto selection configuration\n\
         # Usage: pareto classify -i records.tsv -t <total> -c {}\n\n{}",
        output.display(),
        yaml
    );
    std::fs::write(output, content)?;
    tracing::info!(path = %output.display(), "wrote example configuration");
    Ok(())
}
