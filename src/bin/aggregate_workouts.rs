use activity_charts::labels::DEFAULT_INPUT_FORMAT;
use activity_charts::normalize::parse_records;
use activity_charts::summary::summarize;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Aggregate a `date;walked;ran;cycled` log into totals, yearly and monthly sums.
#[derive(Parser)]
#[command(name = "aggregate_workouts")]
struct Cli {
    /// Semicolon-delimited input log.
    file: PathBuf,

    /// Where to write the aggregated JSON.
    #[arg(long, default_value = "workout_data.json")]
    out: PathBuf,

    /// chrono format of the first column.
    #[arg(long, default_value = DEFAULT_INPUT_FORMAT)]
    date_format: String,
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let records = parse_records(&String::from_utf8_lossy(&bytes));
    let summary = summarize(&records, &cli.date_format);
    info!(
        records = records.len(),
        months = summary.monthly.len(),
        "aggregated workout log"
    );

    let payload = serde_json::to_vec_pretty(&summary)?;
    std::fs::write(&cli.out, payload)
        .with_context(|| format!("failed to write {}", cli.out.display()))?;

    println!("Workout data aggregated -> {}", cli.out.display());
    Ok(())
}
