// wine-probe/src/runner.rs
// ============================================================================
// Module: Probe Runner
// Description: Sequential driver for the valid and invalid request checks.
// Purpose: Run both checks in order, print the console transcript, and stop
//          at the first failure.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The runner writes a banner before each check, a success line after it,
//! and a single diagnostic line on failure. The second check never starts
//! unless the first passed. Output goes to any [`std::io::Write`]; the binary
//! passes stdout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::io;
use std::io::Write;
use std::time::Instant;

use thiserror::Error;

use crate::checks::CheckError;
use crate::checks::CheckName;
use crate::checks::InvalidOutcome;
use crate::checks::ValidOutcome;
use crate::checks::check_invalid_request;
use crate::checks::check_valid_request;
use crate::client::PredictionClient;
use crate::events::CheckEvent;
use crate::events::CheckEventParams;
use crate::events::EventSink;
use crate::events::SummaryEvent;
use crate::response::Prediction;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Values observed by a fully passing run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSummary {
    /// Prediction returned for the valid payload.
    pub prediction: Prediction,
    /// Status returned for the invalid payload.
    pub rejected_status: u16,
}

/// Run failure. The diagnostic has already been written when `Check` is returned.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A check failed.
    #[error("{check} check failed: {source}")]
    Check {
        /// Check that failed.
        check: CheckName,
        /// Underlying failure.
        #[source]
        source: CheckError,
    },
    /// Writing the console transcript failed.
    #[error("failed to write probe output: {0}")]
    Output(#[from] io::Error),
}

/// Status accessor shared by check outcomes.
trait CheckOutcome {
    /// Status code that satisfied the check.
    fn status(&self) -> u16;
}

impl CheckOutcome for ValidOutcome {
    fn status(&self) -> u16 {
        self.status
    }
}

impl CheckOutcome for InvalidOutcome {
    fn status(&self) -> u16 {
        self.status
    }
}

// ============================================================================
// SECTION: Driver
// ============================================================================

/// Runs the valid-request check, then the invalid-request check.
///
/// # Errors
///
/// Returns [`ProbeError::Check`] for the first failing check and
/// [`ProbeError::Output`] when the transcript cannot be written.
pub async fn run_checks<W: Write>(
    client: &PredictionClient,
    sink: &dyn EventSink,
    out: &mut W,
) -> Result<ProbeSummary, ProbeError> {
    let valid =
        run_stage(CheckName::ValidRequest, client, sink, out, check_valid_request(client)).await?;
    writeln!(out, "Success! Prediction received: {}", valid.prediction)?;

    let invalid =
        run_stage(CheckName::InvalidRequest, client, sink, out, check_invalid_request(client))
            .await?;
    writeln!(out, "Success! API correctly handled invalid input. Error: {}", invalid.status)?;

    sink.record_summary(&SummaryEvent::new(client.endpoint().to_string(), 2, None));
    Ok(ProbeSummary {
        prediction: valid.prediction,
        rejected_status: invalid.status,
    })
}

/// Runs one check with its banner, event, and failure diagnostic.
async fn run_stage<T, W, F>(
    check: CheckName,
    client: &PredictionClient,
    sink: &dyn EventSink,
    out: &mut W,
    pending: F,
) -> Result<T, ProbeError>
where
    T: CheckOutcome,
    W: Write,
    F: Future<Output = Result<T, CheckError>>,
{
    writeln!(out, "{}", check.banner())?;
    let started = Instant::now();
    let result = pending.await;
    let elapsed = started.elapsed();
    let endpoint = client.endpoint().to_string();
    match result {
        Ok(outcome) => {
            sink.record_check(&CheckEvent::new(CheckEventParams {
                check,
                endpoint,
                status: Some(outcome.status()),
                error_kind: None,
                elapsed,
            }));
            Ok(outcome)
        }
        Err(err) => {
            sink.record_check(&CheckEvent::new(CheckEventParams {
                check,
                endpoint: endpoint.clone(),
                status: err.status(),
                error_kind: Some(err.label()),
                elapsed,
            }));
            sink.record_summary(&SummaryEvent::new(endpoint, check.position(), Some(check)));
            writeln!(out, "{}", err.diagnostic())?;
            Err(ProbeError::Check {
                check,
                source: err,
            })
        }
    }
}
