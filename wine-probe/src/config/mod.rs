// wine-probe/src/config/mod.rs
// ============================================================================
// Module: Probe Configuration
// Description: Centralized configuration for the wine probe.
// Purpose: Provide typed access to endpoint, timeout, and event-log settings.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Probe configuration is read from environment variables, then overridden by
//! command-line flags, and mapped into a small typed structure. Without any
//! override the probe targets the built-in endpoint with no request timeout.
//! Security posture: environment inputs are untrusted and fail closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ConfigError;
pub use env::DEFAULT_ENDPOINT;
pub use env::EventLogTarget;
pub use env::ProbeConfig;
pub use env::ProbeEnv;
pub use env::ProbeOverrides;
pub use env::read_env_strict;
