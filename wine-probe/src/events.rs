// wine-probe/src/events.rs
// ============================================================================
// Module: Probe Events
// Description: Structured run events for probe checks.
// Purpose: Emit JSON-line records of each check without payload contents.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every check produces one `probe_check` event and every run ends with one
//! `probe_summary` event. Events record status codes, outcome labels, and
//! timings only; request and response bodies are never written.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::checks::CheckName;
use crate::config::EventLogTarget;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome label shared by check and summary events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    /// Check or run passed.
    Pass,
    /// Check or run failed.
    Fail,
}

/// Per-check event payload.
#[derive(Debug, Clone, Serialize)]
pub struct CheckEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Check that produced the event.
    pub check: CheckName,
    /// Endpoint URL.
    pub endpoint: String,
    /// HTTP status when a response was received.
    pub status: Option<u16>,
    /// Check outcome.
    pub outcome: EventOutcome,
    /// Normalized failure label when the check failed.
    pub error_kind: Option<&'static str>,
    /// Wall-clock duration of the check.
    pub elapsed_ms: u128,
}

/// End-of-run event payload.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Endpoint URL.
    pub endpoint: String,
    /// Run outcome.
    pub outcome: EventOutcome,
    /// Number of checks that passed.
    pub checks_passed: usize,
    /// Check that ended the run, if any failed.
    pub failed_check: Option<CheckName>,
}

/// Inputs required to construct a check event.
pub struct CheckEventParams {
    /// Check that produced the event.
    pub check: CheckName,
    /// Endpoint URL.
    pub endpoint: String,
    /// HTTP status when a response was received.
    pub status: Option<u16>,
    /// Normalized failure label; `None` marks a pass.
    pub error_kind: Option<&'static str>,
    /// Wall-clock duration of the check.
    pub elapsed: Duration,
}

impl CheckEvent {
    /// Creates a new check event with a consistent timestamp.
    #[must_use]
    pub fn new(params: CheckEventParams) -> Self {
        let outcome =
            if params.error_kind.is_some() { EventOutcome::Fail } else { EventOutcome::Pass };
        Self {
            event: "probe_check",
            timestamp_ms: now_millis(),
            check: params.check,
            endpoint: params.endpoint,
            status: params.status,
            outcome,
            error_kind: params.error_kind,
            elapsed_ms: params.elapsed.as_millis(),
        }
    }
}

impl SummaryEvent {
    /// Creates a summary event; `failed_check` is `None` for a passing run.
    #[must_use]
    pub fn new(endpoint: String, checks_passed: usize, failed_check: Option<CheckName>) -> Self {
        let outcome = if failed_check.is_some() { EventOutcome::Fail } else { EventOutcome::Pass };
        Self {
            event: "probe_summary",
            timestamp_ms: now_millis(),
            endpoint,
            outcome,
            checks_passed,
            failed_check,
        }
    }
}

/// Milliseconds since the Unix epoch; zero if the clock is before it.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for probe events.
pub trait EventSink: Send + Sync {
    /// Record a per-check event.
    fn record_check(&self, event: &CheckEvent);

    /// Record the end-of-run summary.
    fn record_summary(&self, _event: &SummaryEvent) {}
}

/// Sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl EventSink for StderrEventSink {
    fn record_check(&self, event: &CheckEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_summary(&self, event: &SummaryEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the event log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Serializes `event` and appends it as one line.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl EventSink for FileEventSink {
    fn record_check(&self, event: &CheckEvent) {
        self.append(event);
    }

    fn record_summary(&self, event: &SummaryEvent) {
        self.append(event);
    }
}

/// Sink that discards events.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record_check(&self, _event: &CheckEvent) {}
}

/// Opens the sink selected by `target`.
///
/// # Errors
///
/// Returns an error when a file target cannot be opened.
pub fn open_sink(target: &EventLogTarget) -> io::Result<Box<dyn EventSink>> {
    Ok(match target {
        EventLogTarget::Stderr => Box::new(StderrEventSink),
        EventLogTarget::Off => Box::new(NoopEventSink),
        EventLogTarget::File(path) => Box::new(FileEventSink::new(path)?),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
