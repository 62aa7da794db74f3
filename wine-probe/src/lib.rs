// wine-probe/src/lib.rs
// ============================================================================
// Module: Wine Probe Library
// Description: Integration probe for a remote wine-quality prediction endpoint.
// Purpose: Provide payloads, checks, and the sequential driver used by the CLI.
// Dependencies: reqwest, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! Wine Probe exercises a remote prediction endpoint with two sequential
//! checks: a well-formed payload must yield `200` with a numeric
//! `wine_quality` field, and a malformed payload must yield any non-`200`
//! status. The binary entry point (`src/main.rs`) wires configuration and an
//! event sink into [`runner::run_checks`] and maps the outcome to an exit code.
//!
//! Security posture: responses from the endpoint are untrusted and are
//! validated before any value is reported.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod checks;
pub mod client;
pub mod config;
pub mod events;
pub mod payload;
pub mod response;
pub mod runner;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use checks::CheckError;
pub use checks::FailureKind;
pub use client::PredictionClient;
pub use config::ProbeConfig;
pub use payload::INVALID_PAYLOAD;
pub use payload::InvalidWineFeatures;
pub use payload::VALID_PAYLOAD;
pub use payload::ValidWineFeatures;
pub use payload::WineFeatures;
pub use response::Prediction;
pub use runner::ProbeError;
pub use runner::run_checks;
