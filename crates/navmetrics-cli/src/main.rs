//! `navmetrics`: analyse navigation graphs from the command line.
//!
//! ```text
//! navmetrics analyze edges.json              # report + edges_metrics.json
//! navmetrics analyze clicks.jsonl --top 20 --skip-invalid
//! navmetrics compare current.json redesign.json
//! ```
//!
//! Logging goes to stderr; set `NAVMETRICS_LOG` (e.g. `navmetrics=debug`).

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use navmetrics::{export, ingest, report, AnalysisConfig, IngestPolicy, MetricsSnapshot};

#[derive(Parser, Debug)]
#[command(name = "navmetrics", about = "Navigation graph metrics for UI click graphs")]
struct Cli {
    /// Path to an analysis config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute metrics for one graph, print the report and export JSON.
    Analyze {
        /// Edge file: JSON array or JSON Lines
        input: PathBuf,
        /// Where to write the metrics JSON (default: <input stem>_metrics.json)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Number of pages in the centrality ranking
        #[arg(long)]
        top: Option<usize>,
        /// Skip malformed edge records instead of failing
        #[arg(long)]
        skip_invalid: bool,
        /// Print the report only
        #[arg(long)]
        no_export: bool,
    },

    /// Compare two graphs side by side (left is the baseline).
    Compare {
        left: PathBuf,
        right: PathBuf,
        /// Skip malformed edge records instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NAVMETRICS_LOG")
        .unwrap_or_else(|_| EnvFilter::new("navmetrics=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    match cli.command {
        Commands::Analyze { input, output, top, skip_invalid, no_export } => {
            if let Some(top) = top {
                config.report.top_n = top;
            }
            if skip_invalid {
                config.ingest_policy = IngestPolicy::Skip;
            }
            let output = (!no_export).then(|| output.unwrap_or_else(|| default_output_path(&input)));
            let text = cmd_analyze(&input, output.as_deref(), &config)?;
            println!("{text}");
        }
        Commands::Compare { left, right, skip_invalid } => {
            if skip_invalid {
                config.ingest_policy = IngestPolicy::Skip;
            }
            println!("{}", cmd_compare(&left, &right, &config)?);
        }
    }

    Ok(())
}

/// Load and analyse one file.
fn analyze_file(path: &Path, config: &AnalysisConfig) -> anyhow::Result<MetricsSnapshot> {
    let loaded = ingest::load_file(path, config.ingest_policy)
        .with_context(|| format!("loading edges from {}", path.display()))?;
    Ok(navmetrics::analyze(&loaded.graph, config))
}

/// Returns the text report; writes the export when `output` is set.
fn cmd_analyze(input: &Path, output: Option<&Path>, config: &AnalysisConfig) -> anyhow::Result<String> {
    let snapshot = analyze_file(input, config)?;

    if let Some(output) = output {
        export::export_metrics_file(&snapshot, output)
            .with_context(|| format!("writing metrics to {}", output.display()))?;
    }

    Ok(report::render_text(&snapshot, &config.report))
}

fn cmd_compare(left: &Path, right: &Path, config: &AnalysisConfig) -> anyhow::Result<String> {
    let a = analyze_file(left, config)?;
    let b = analyze_file(right, config)?;
    let comparison = report::compare(&display_name(left), &a, &display_name(right), &b);
    Ok(comparison.to_string())
}

/// `dir/edges.json` → `dir/edges_metrics.json`.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    input.with_file_name(format!("{stem}_metrics.json"))
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
