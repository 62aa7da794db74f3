// system-tests/src/lib.rs
// ============================================================================
// Module: Wine Probe System Tests Library
// Description: Shared configuration and the prediction stub for system tests.
// Purpose: Provide common utilities for wine-probe system-test binaries.
// Dependencies: axum, serde_json, tokio, url, wine-probe
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration and a local stand-in for the wine
//! prediction endpoint, used by the system-tests binaries in
//! `system-tests/tests` and by the `wine_predict_stub` binary.
//! Security posture: system-test inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod predict_stub;
