// wine-probe/src/main.rs
// ============================================================================
// Module: Wine Probe CLI Entry Point
// Description: Command-line runner for the prediction endpoint probe.
// Purpose: Resolve configuration, run both checks, and report an exit code.
// Dependencies: clap, tokio, wine-probe
// ============================================================================

//! ## Overview
//! The CLI loads configuration from the environment, applies flag overrides,
//! and runs the two checks sequentially on a current-thread runtime. Exit code
//! `0` means both checks passed; every failure, including invalid
//! configuration, maps to `1`. Check diagnostics are written to stdout by the
//! runner; configuration and output errors go to stderr.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use wine_probe::PredictionClient;
use wine_probe::ProbeConfig;
use wine_probe::ProbeError;
use wine_probe::config::ProbeOverrides;
use wine_probe::events::open_sink;
use wine_probe::run_checks;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "wine-probe",
    version,
    about = "Checks a wine-quality prediction endpoint with a valid and an invalid payload"
)]
struct Cli {
    /// Prediction endpoint URL (overrides `WINE_PROBE_URL`).
    #[arg(long, value_name = "URL")]
    url: Option<String>,
    /// Per-request timeout in seconds (overrides `WINE_PROBE_TIMEOUT_SEC`).
    #[arg(long = "timeout-sec", value_name = "SECONDS")]
    timeout_sec: Option<u64>,
    /// Event log target: `stderr`, `off`, or a file path (overrides `WINE_PROBE_EVENT_LOG`).
    #[arg(long, value_name = "TARGET")]
    event_log: Option<String>,
}

impl Cli {
    /// Converts parsed flags into configuration overrides.
    fn into_overrides(self) -> ProbeOverrides {
        ProbeOverrides {
            url: self.url,
            timeout_secs: self.timeout_sec,
            event_log: self.event_log,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug)]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.message),
    }
}

/// Resolves configuration and runs the probe.
async fn run() -> CliResult<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return Ok(if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS });
        }
    };
    let config = ProbeConfig::load()
        .and_then(|config| config.with_overrides(cli.into_overrides()))
        .map_err(|err| CliError::new(format!("invalid configuration: {err}")))?;
    let sink = open_sink(&config.event_log)
        .map_err(|err| CliError::new(format!("failed to open event log: {err}")))?;
    let client = PredictionClient::new(config.endpoint, config.timeout)
        .map_err(|err| CliError::new(err.to_string()))?;

    let mut stdout = std::io::stdout().lock();
    match run_checks(&client, sink.as_ref(), &mut stdout).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(ProbeError::Check {
            ..
        }) => Ok(ExitCode::FAILURE),
        Err(err @ ProbeError::Output(_)) => Err(CliError::new(err.to_string())),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
