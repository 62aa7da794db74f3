// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized configuration for wine-probe system tests.
// Purpose: Provide typed access to test environment settings and defaults.
// Dependencies: std
// ============================================================================

//! ## Overview
//! System-test configuration is read from environment variables and mapped into
//! a small typed structure for reuse across test helpers.
//! Security posture: environment inputs are untrusted.

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

pub use env::DEFAULT_STUB_BIND;
pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
