//! CLI entry point for the training report generator.
//!
//! Provides subcommands for generating a single-subject wellness trend
//! report and a multi-athlete training-load comparison.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tokio::sync::Semaphore;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use training_rater::analyzers::aggregate::{aggregate_athlete, rank};
use training_rater::analyzers::types::{AthleteAggregate, DateSpan};
use training_rater::loader::{MetricRecord, WorkoutRecord, load_rows};
use training_rater::normalize::{metric_samples, pivot, workout_sessions};
use training_rater::report;
use training_rater::stats::WellnessStats;

#[derive(Parser)]
#[command(name = "training_rater")]
#[command(about = "A tool to generate training and wellness reports from CSV exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a wellness trend report for one subject
    Report {
        /// Wellness metrics CSV (Timestamp, Type, Value)
        #[arg(short, long)]
        metrics: PathBuf,

        /// Workout sessions CSV
        #[arg(short, long)]
        workouts: PathBuf,

        /// HTML file to write the report to
        #[arg(short, long, default_value = "training_report.html")]
        output: PathBuf,
    },
    /// Compare athletes' training load, one CSV per athlete
    Compare {
        /// Workout CSVs, one per athlete; the file stem names the athlete
        #[arg(value_name = "CSV", required = true)]
        files: Vec<PathBuf>,

        /// HTML file to write the report to
        #[arg(short, long, default_value = "kopsavilkums.html")]
        output: PathBuf,

        /// Maximum number of tables loaded concurrently
        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/training_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("training_rater.log"));

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
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            metrics,
            workouts,
            output,
        } => run_report(&metrics, &workouts, &output)?,
        Commands::Compare {
            files,
            output,
            concurrency,
        } => run_compare(files, &output, concurrency).await?,
    }

    Ok(())
}

/// Runs the single-subject pipeline: both tables are required, so any load
/// failure ends the run.
#[tracing::instrument(skip_all, fields(metrics = %metrics.display(), workouts = %workouts.display()))]
fn run_report(metrics: &Path, workouts: &Path, output: &Path) -> Result<()> {
    let metric_rows = load_rows::<MetricRecord>(metrics)?;
    let workout_rows = load_rows::<WorkoutRecord>(workouts)?;

    let rows = pivot(&metric_samples(&metric_rows));
    let sessions = workout_sessions(&workout_rows);
    info!(days = rows.len(), sessions = sessions.len(), "Tables normalized");

    let stats = WellnessStats::from_tables(&rows, &sessions);
    let span = DateSpan::from_days(rows.iter().map(|r| r.day));

    let html = report::wellness::render(&stats, &rows, &sessions, span);
    report::write_report(output, &html)?;

    info!(path = %output.display(), "Wellness report generated");
    Ok(())
}

/// Runs the comparison pipeline. Tables load concurrently; a table that
/// fails to load is reported and its athlete skipped, and the run fails
/// only when no table loads at all.
#[tracing::instrument(skip(files), fields(tables = files.len()))]
async fn run_compare(files: Vec<PathBuf>, output: &Path, concurrency: usize) -> Result<()> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let mut tasks = Vec::new();
    for path in files {
        let sem = semaphore.clone();
        tasks.push(tokio::spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            score_athlete(&path)
        }));
    }

    let mut aggregates = Vec::new();
    let mut span: Option<DateSpan> = None;
    for task in tasks {
        match task.await? {
            Ok((aggregate, table_span)) => {
                span = DateSpan::merge(span, table_span);
                aggregates.push(aggregate);
            }
            Err(e) => error!(error = %e, "Skipping athlete table"),
        }
    }

    if aggregates.is_empty() {
        bail!("no athlete table could be loaded");
    }

    let ranked = rank(aggregates);
    let html = report::compare::render(&ranked, span);
    report::write_report(output, &html)?;

    info!(path = %output.display(), athletes = ranked.len(), "Comparison report generated");
    Ok(())
}

/// Loads and scores one athlete's table. The athlete is named after the
/// file stem.
fn score_athlete(
    path: &Path,
) -> training_rater::error::Result<(AthleteAggregate, Option<DateSpan>)> {
    let name = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("athlete");

    let rows = load_rows::<WorkoutRecord>(path)?;
    let sessions = workout_sessions(&rows);

    let aggregate = aggregate_athlete(name, &sessions);
    let span = DateSpan::from_days(sessions.iter().filter_map(|s| s.day));

    info!(
        athlete = name,
        sessions = sessions.len(),
        counted = aggregate.counted_sessions,
        load_minutes = aggregate.load_minutes,
        "Athlete table aggregated"
    );
    Ok((aggregate, span))
}
