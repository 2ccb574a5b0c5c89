//! Top-level application orchestration.
//!
//! `src/main.rs` only maps the result to an exit code; this module:
//! - loads `.env` and parses CLI arguments
//! - sets up diagnostics on stderr (or silences them)
//! - runs the batch pipeline
//! - prints result lines and writes the optional export

use std::io::{IsTerminal, Write};

use clap::Parser;
use tracing::{Subscriber, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::cli::Cli;
use crate::domain::RunConfig;
use crate::error::{AppError, EXIT_IO, LookupError};
use crate::report::{BatchReport, QueryOutcome, format_index_stats, format_result_line, format_summary};

pub mod pipeline;

/// Entry point for the `slcsp` binary.
pub fn run() -> Result<(), AppError> {
    // Lets SLCSP_ZIPS / SLCSP_PLANS come from a local .env.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = run_config_from_args(&cli);
    init_tracing(config.show_diagnostics);

    let report = pipeline::run_batch(&config)?;
    info!("{}", format_index_stats(&report.index_stats));

    emit(&report, &mut std::io::stdout().lock())?;
    info!("{}", format_summary(&report.summary(), config.tier));

    if let Some(path) = &config.export_path {
        crate::io::export::write_results_csv(path, &report.outcomes)?;
        info!(path = %path.display(), "wrote results export");
    }

    Ok(())
}

pub fn run_config_from_args(cli: &Cli) -> RunConfig {
    RunConfig {
        query_path: cli.file.clone(),
        zips_path: cli.zips.clone(),
        plans_path: cli.plans.clone(),
        tier: cli.metal,
        show_diagnostics: cli.show_stderr,
        export_path: cli.export.clone(),
    }
}

/// Walk the outcomes once, in query order: resolved queries print a result
/// line to `out`, skipped ones emit a diagnostic.
pub fn emit<W: Write>(report: &BatchReport, out: &mut W) -> Result<(), AppError> {
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(rate) => writeln!(out, "{}", format_result_line(&outcome.query, *rate))
                .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write results: {e}")))?,
            Err(err) => log_skipped(outcome, err),
        }
    }
    out.flush()
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write results: {e}")))
}

/// Result lines in query order. Skipped queries have no line.
pub fn render(report: &BatchReport) -> Vec<String> {
    report
        .outcomes
        .iter()
        .filter_map(|outcome| {
            let rate = outcome.rate()?;
            Some(format_result_line(&outcome.query, rate))
        })
        .collect()
}

fn log_skipped(outcome: &QueryOutcome, err: &LookupError) {
    let line = outcome.query.line;
    match err {
        // Expected for some regions, so below warn.
        LookupError::NoRatesForRegion { .. } => info!(line = line, kind = err.kind(), "{err}"),
        LookupError::InvalidPostalCode { .. }
        | LookupError::UnknownPostalCode { .. }
        | LookupError::Undeterminable { .. } => warn!(line = line, kind = err.kind(), "{err}"),
    }
}

/// Filter directives for the diagnostic stream. `RUST_LOG` only applies when
/// diagnostics are shown.
fn filter_directives(show_diagnostics: bool, rust_log: Option<String>) -> String {
    if !show_diagnostics {
        return "off".to_string();
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| "info".to_string())
}

fn diagnostics_subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .with_ansi(ansi)
        .finish()
}

/// Diagnostics go to stderr. With `show_diagnostics` off nothing is emitted;
/// fatal errors are still printed by `main`.
fn init_tracing(show_diagnostics: bool) {
    let directives = filter_directives(show_diagnostics, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let subscriber = diagnostics_subscriber(
        EnvFilter::new(directives),
        std::io::stderr,
        std::io::stderr().is_terminal(),
    );

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing::subscriber::set_global_default(subscriber);
}
