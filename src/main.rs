//! CLI entry point for the TMDB budget/revenue report.
//!
//! Loads the movie and credits exports, prepares them once, and prints the
//! requested analyses to stdout. Diagnostics go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tmdb_roi::analyzers::analyzer::run_all;
use tmdb_roi::analyzers::breakout::breakout_ratio;
use tmdb_roi::analyzers::director::{top_director_uplift, top_directors_by_roi};
use tmdb_roi::analyzers::genre::genre_roi_participation;
use tmdb_roi::analyzers::growth::annual_growth;
use tmdb_roi::analyzers::types::Metric;
use tmdb_roi::config::AnalysisConfig;
use tmdb_roi::output::{self, OutputFormat};
use tmdb_roi::prepare::prepare_from_paths;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "tmdb_roi")]
#[command(about = "Budget, revenue and ROI statistics for the TMDB 5000 dataset", long_about = None)]
struct Cli {
    /// Movie metadata CSV
    #[arg(
        long,
        global = true,
        env = "TMDB_MOVIES_PATH",
        default_value = "../data/tmdb_5000_movies.csv"
    )]
    movies: PathBuf,

    /// Credits CSV
    #[arg(
        long,
        global = true,
        env = "TMDB_CREDITS_PATH",
        default_value = "../data/tmdb_5000_credits.csv"
    )]
    credits: PathBuf,

    /// Optional JSON file overriding analysis thresholds
    #[arg(long, global = true, env = "TMDB_THRESHOLDS_PATH")]
    thresholds: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run every analysis (default)
    Report,
    /// Show what data preparation kept and dropped
    Prepare,
    /// Share of low-budget films with high revenue
    Breakout,
    /// Compound annual growth of total budget and revenue
    Growth,
    /// Per-genre share of mid-budget films beating the ROI cut
    Genres,
    /// Large-budget directors ranked by median ROI
    Directors,
    /// ROI uplift of top directors on large-budget films
    Uplift,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging()?;

    let cli = Cli::parse();
    let config = AnalysisConfig::load_or_default(cli.thresholds.as_deref())?;
    let (table, prep) = prepare_from_paths(&cli.movies, &cli.credits, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let format = cli.format;

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => {
            let report = run_all(&table, &config);
            match format {
                OutputFormat::Text => output::write_report(&mut out, &report)?,
                OutputFormat::Json => output::write_json(&mut out, &report)?,
            }
        }
        Commands::Prepare => match format {
            OutputFormat::Text => output::write_prep_report(&mut out, &prep)?,
            OutputFormat::Json => output::write_json(&mut out, &prep)?,
        },
        Commands::Breakout => {
            let summary = breakout_ratio(&table, &config);
            match format {
                OutputFormat::Text => output::write_breakout(&mut out, &summary)?,
                OutputFormat::Json => output::write_json(&mut out, &summary)?,
            }
        }
        Commands::Growth => {
            let growth = [
                annual_growth(&table, Metric::Budget),
                annual_growth(&table, Metric::Revenue),
            ];
            match format {
                OutputFormat::Text => {
                    for g in &growth {
                        output::write_growth(&mut out, g)?;
                    }
                }
                OutputFormat::Json => output::write_json(&mut out, &growth)?,
            }
        }
        Commands::Genres => {
            let participation = genre_roi_participation(&table, &config);
            match format {
                OutputFormat::Text => output::write_genre_participation(&mut out, &participation)?,
                OutputFormat::Json => output::write_json(&mut out, &participation)?,
            }
        }
        Commands::Directors => {
            let ranking = top_directors_by_roi(&table, &config);
            match format {
                OutputFormat::Text => output::write_director_ranking(&mut out, &ranking)?,
                OutputFormat::Json => output::write_json(&mut out, &ranking)?,
            }
        }
        Commands::Uplift => {
            let uplift = top_director_uplift(&table, &config);
            match format {
                OutputFormat::Text => output::write_uplift(&mut out, &uplift)?,
                OutputFormat::Json => output::write_json(&mut out, &uplift)?,
            }
        }
    }

    out.flush()?;
    info!(rows = table.len(), "Done");
    Ok(())
}

/// Colored stderr logging, plus a JSON daily-rolling log file when
/// `LOG_FILE_PATH` is set. The returned guard must outlive logging.
fn init_logging() -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .unwrap_or(Path::new("logs"));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("tmdb_roi.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}
