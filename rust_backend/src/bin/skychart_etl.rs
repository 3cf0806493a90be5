//! skychart-etl: batch preprocessing of sky-chart catalogs
//!
//! Usage:
//!   skychart-etl [--config skychart.toml] [--verbose] <pipeline> [--summary]
//!
//! Environment variables:
//! - `RUST_LOG`: Log filter (default: info, or debug with `--verbose`)

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skychart_etl::{EtlConfig, PipelineKind, PipelineReport, PreprocessPipeline};

#[derive(Parser)]
#[command(name = "skychart-etl")]
#[command(about = "Preprocess raw astronomical catalogs into sky-chart tables")]
#[command(version)]
struct Cli {
    /// Configuration file (default: skychart.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the run summary as JSON to stdout
    #[arg(long, global = true)]
    summary: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Group IAU boundary points into constellation polygons
    Boundaries,
    /// Enrich the HYG star catalog and write the naked-eye subset
    Stars,
    /// Build asterisms from the sky-culture line list (needs the stars output)
    Asterisms,
    /// Normalize the deep-sky object list
    DeepSky,
    /// Run every pipeline in order
    All,
}

impl Commands {
    fn pipelines(self) -> Vec<PipelineKind> {
        match self {
            Commands::Boundaries => vec![PipelineKind::Boundaries],
            Commands::Stars => vec![PipelineKind::Stars],
            Commands::Asterisms => vec![PipelineKind::Asterisms],
            Commands::DeepSky => vec![PipelineKind::DeepSky],
            Commands::All => PipelineKind::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = EtlConfig::load(cli.config.as_deref())?;
    info!(
        "Reading from {}, writing to {}",
        config.paths.data_dir.display(),
        config.paths.processed_dir.display()
    );

    let pipeline = PreprocessPipeline::with_config(config);
    let reports = cli
        .command
        .pipelines()
        .into_iter()
        .map(|kind| pipeline.run(kind))
        .collect::<Result<Vec<PipelineReport>>>()?;

    if cli.summary {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    info!("Finished {} pipeline(s)", reports.len());
    Ok(())
}
