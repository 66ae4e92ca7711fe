//! CLI entry point for the bus count pipeline.
//!
//! Reads the Polk vehicle registration dataset, keeps the bus records, and
//! writes per-zip bus counts by carrier and vehicle type to a CSV file.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use bus_count_zip::pipeline;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bus_count_zip")]
#[command(about = "Count registered buses by zip code and carrier type", long_about = None)]
struct Cli {
    /// Vehicle registration dataset (Parquet)
    #[arg(short, long, default_value = "Data/trucks.parquet")]
    input: PathBuf,

    /// Destination CSV for the aggregated counts
    #[arg(short, long, default_value = "Result/bus_cnt_zip.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bus_count_zip.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bus_count_zip.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let summary = pipeline::run(&cli.input, &cli.output)?;

    info!(
        total_rows = summary.total_rows,
        bus_rows = summary.bus_rows,
        groups = summary.groups,
        "Pipeline finished"
    );

    Ok(())
}
