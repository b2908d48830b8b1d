use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use parcelgrid::pipeline::ParseReport;
use parcelgrid::{CoordinateParser, FileConfig, SurveyGeometry, resolve, resolve_value};

/// Turn survey grid coordinate files into GeoJSON parcel polygons
///
/// Examples:
///   # Parse one coordinate file and print the polygon (or null)
///   parcelgrid parse boundary.csv
///
///   # Parse several files, substituting the placeholder when nothing usable is found
///   parcelgrid parse lots/*.txt --fallback --pretty -o parcels.json
///
///   # Show why lines were dropped
///   parcelgrid parse boundary.txt --report -v
///
///   # Gate a GeoJSON geometry from another source
///   parcelgrid check extracted.json
#[derive(Parser, Debug)]
#[command(name = "parcelgrid")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (optional, auto-searches parcelgrid.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse coordinate files into polygons
    Parse(ParseArgs),
    /// Run the acceptance gate on a GeoJSON geometry file ("-" for stdin)
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Coordinate files (CSV/TXT)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write JSON here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,

    /// Gate each result and substitute the placeholder polygon when rejected
    #[arg(long)]
    fallback: bool,

    /// Include per-line diagnostics in the output
    #[arg(long)]
    report: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// GeoJSON geometry file, or "-" for stdin
    input: PathBuf,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref path) => Some(FileConfig::from_path(path)?),
        None => FileConfig::load(),
    };
    let file_config = file_config.unwrap_or_default();

    init_tracing(cli.verbose || file_config.verbose);

    match cli.command {
        Command::Parse(args) => run_parse(args, &file_config),
        Command::Check(args) => run_check(args, file_config.pretty),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn run_parse(args: ParseArgs, file_config: &FileConfig) -> Result<()> {
    let parser = CoordinateParser::new(file_config.pipeline());
    let pretty = args.pretty || file_config.pretty;

    let progress = create_progress(args.files.len() as u64);
    let mut records = Vec::with_capacity(args.files.len());

    for path in &args.files {
        progress.set_message(path.display().to_string());

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read coordinate file: {}", path.display()))?;
        let report = parser.parse(&text);

        tracing::info!(
            file = %path.display(),
            points = report.accepted(),
            rejected = report.rejected(),
            "Parsed coordinate file"
        );

        records.push(build_record(path, &report, args.fallback, args.report)?);
        progress.inc(1);
    }

    progress.finish_and_clear();

    write_json(&Value::Array(records), args.output.as_deref(), pretty)
}

fn build_record(
    path: &Path,
    report: &ParseReport,
    fallback: bool,
    diagnostics: bool,
) -> Result<Value> {
    let geometry = if fallback {
        let candidate = report.polygon.clone().map(SurveyGeometry::from);
        serde_json::to_value(resolve(candidate))
    } else {
        serde_json::to_value(&report.polygon)
    }
    .with_context(|| format!("Failed to serialize geometry for {}", path.display()))?;

    let mut record = json!({
        "file": path.display().to_string(),
        "geometry": geometry,
        "points": report.accepted(),
        "rejected": report.rejected(),
        "grid_area_m2": report.grid_area(),
    });

    if diagnostics {
        record["diagnostics"] = report
            .diagnostics
            .iter()
            .map(|d| {
                json!({
                    "line": d.line,
                    "kind": d.reason.kind(),
                    "message": d.reason.to_string(),
                })
            })
            .collect();
    }

    Ok(record)
}

fn run_check(args: CheckArgs, config_pretty: bool) -> Result<()> {
    let contents = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read geometry from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read geometry file: {}", args.input.display()))?
    };

    // Unparseable JSON is treated like a missing geometry, not a hard error
    let candidate: Option<Value> = match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Input is not valid JSON: {e}");
            None
        }
    };

    let resolved = resolve_value(candidate.as_ref());
    let value = serde_json::to_value(&resolved).context("Failed to serialize geometry")?;
    write_json(&value, None, args.pretty || config_pretty)
}

fn write_json(value: &Value, output: Option<&Path>, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match output {
        Some(path) => std::fs::write(path, text + "\n")
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => println!("{text}"),
    }

    Ok(())
}

fn create_progress(len: u64) -> ProgressBar {
    if len < 2 {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{pos}/{len}] {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
