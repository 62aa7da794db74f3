// wine-probe/src/checks.rs
// ============================================================================
// Module: Endpoint Checks
// Description: The valid-request and invalid-request checks.
// Purpose: Turn one HTTP exchange each into a pass outcome or a typed failure.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The valid-request check requires status `200`, a JSON body, and a numeric
//! `wine_quality` field. The invalid-request check accepts any status other
//! than `200`; it does not insist on a particular error code such as `422`.
//!
//! Failures fall into two kinds: assertion failures (the service answered but
//! broke the contract) and exceptions (transport or decoding problems). Both
//! end the run the same way; the kind only selects the diagnostic prefix.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::client::PredictionClient;
use crate::payload::INVALID_PAYLOAD;
use crate::payload::VALID_PAYLOAD;
use crate::response::Prediction;
use crate::response::extract_prediction;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// The only status the valid-request check accepts, and the one the
/// invalid-request check refuses.
pub const STATUS_OK: u16 = 200;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Identifies one of the two sequential checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    /// Well-formed payload must be scored.
    ValidRequest,
    /// Ill-typed payload must be rejected.
    InvalidRequest,
}

impl CheckName {
    /// Returns the stable label used in structured events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidRequest => "valid_request",
            Self::InvalidRequest => "invalid_request",
        }
    }

    /// Returns the console banner printed before the check runs.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::ValidRequest => "--- Stage 4: Testing Valid Request ---",
            Self::InvalidRequest => "--- Stage 5: Testing Invalid Request ---",
        }
    }

    /// Number of checks that completed before this one started.
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::ValidRequest => 0,
            Self::InvalidRequest => 1,
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic class of a [`CheckError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service answered but violated the expected contract.
    Assertion,
    /// The exchange itself failed (transport or decoding).
    Exception,
}

/// Failure of a single check.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Valid payload was answered with a status other than `200`.
    #[error("Expected status 200, got {status} - {body}")]
    StatusMismatch {
        /// Received status code.
        status: u16,
        /// Received body text.
        body: String,
    },
    /// Invalid payload was answered with `200`.
    #[error("API should have returned an error for invalid input")]
    InvalidInputAccepted,
    /// Response JSON lacks the prediction field.
    #[error("'{field}' field missing")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// Prediction field is neither a number nor a sequence of numbers.
    #[error("Prediction is not numeric")]
    NonNumericPrediction,
    /// Request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(String),
    /// Response body is not JSON.
    #[error("response body is not valid JSON: {0}")]
    MalformedJson(String),
}

impl CheckError {
    /// Returns the diagnostic class of the failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::StatusMismatch {
                ..
            }
            | Self::InvalidInputAccepted
            | Self::MissingField {
                ..
            }
            | Self::NonNumericPrediction => FailureKind::Assertion,
            Self::Transport(_) | Self::MalformedJson(_) => FailureKind::Exception,
        }
    }

    /// Returns a normalized label for structured events.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StatusMismatch {
                ..
            } => "status_mismatch",
            Self::InvalidInputAccepted => "invalid_input_accepted",
            Self::MissingField {
                ..
            } => "missing_field",
            Self::NonNumericPrediction => "non_numeric_prediction",
            Self::Transport(_) => "transport",
            Self::MalformedJson(_) => "malformed_json",
        }
    }

    /// Returns the HTTP status observed before the failure, if any.
    ///
    /// Body-level failures only arise after a `200` was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::StatusMismatch {
                status, ..
            } => Some(*status),
            Self::InvalidInputAccepted
            | Self::MissingField {
                ..
            }
            | Self::NonNumericPrediction
            | Self::MalformedJson(_) => Some(STATUS_OK),
            Self::Transport(_) => None,
        }
    }

    /// Formats the console diagnostic for this failure.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        match self.kind() {
            FailureKind::Assertion => format!("Failed: {self}"),
            FailureKind::Exception => format!("Exception occurred: {self}"),
        }
    }
}

/// Result of a passing valid-request check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidOutcome {
    /// Received status (always `200`).
    pub status: u16,
    /// Extracted prediction.
    pub prediction: Prediction,
}

/// Result of a passing invalid-request check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOutcome {
    /// Received non-`200` status.
    pub status: u16,
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// POSTs the valid payload and validates the prediction response.
///
/// # Errors
///
/// Returns a [`CheckError`] for a non-`200` status, a non-JSON body, a
/// missing `wine_quality` field, a non-numeric prediction, or a transport
/// failure.
pub async fn check_valid_request(client: &PredictionClient) -> Result<ValidOutcome, CheckError> {
    let reply = client.post_json(&VALID_PAYLOAD).await?;
    if reply.status != STATUS_OK {
        return Err(CheckError::StatusMismatch {
            status: reply.status,
            body: reply.body,
        });
    }
    let body = reply.json()?;
    let prediction = extract_prediction(&body)?;
    Ok(ValidOutcome {
        status: reply.status,
        prediction,
    })
}

/// POSTs the invalid payload and requires it to be refused.
///
/// # Errors
///
/// Returns [`CheckError::InvalidInputAccepted`] when the service answers
/// `200`, or [`CheckError::Transport`] when the exchange fails.
pub async fn check_invalid_request(
    client: &PredictionClient,
) -> Result<InvalidOutcome, CheckError> {
    let reply = client.post_json(&INVALID_PAYLOAD).await?;
    if reply.status == STATUS_OK {
        return Err(CheckError::InvalidInputAccepted);
    }
    Ok(InvalidOutcome {
        status: reply.status,
    })
}
