// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Bind address used by the stub binary when no override is set.
pub const DEFAULT_STUB_BIND: &str = "127.0.0.1:8002";

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional run root override.
    RunRoot,
    /// Optional bind override for the prediction stub binary.
    StubBind,
    /// Optional probe timeout override in seconds (positive integer).
    TimeoutSeconds,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "WINE_PROBE_SYSTEM_TEST_RUN_ROOT",
            Self::StubBind => "WINE_PROBE_SYSTEM_TEST_STUB_BIND",
            Self::TimeoutSeconds => "WINE_PROBE_SYSTEM_TEST_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional stub bind override.
    pub stub_bind: Option<SocketAddr>,
    /// Optional probe timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid bind address or timeout).
    pub fn load() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var_os(key.as_str()))
    }

    /// Builds configuration from an arbitrary key lookup instead of the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SystemTestConfig::load`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(SystemTestEnv) -> Option<OsString>,
    {
        let read = |key: SystemTestEnv| read_nonempty(key.as_str(), lookup(key));
        let run_root = read(SystemTestEnv::RunRoot)?.map(PathBuf::from);
        let stub_bind = read(SystemTestEnv::StubBind)?
            .map(|value| parse_bind(SystemTestEnv::StubBind.as_str(), &value))
            .transpose()?;
        let timeout = read(SystemTestEnv::TimeoutSeconds)?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        Ok(Self {
            run_root,
            stub_bind,
            timeout,
        })
    }

    /// Returns the stub bind address, falling back to [`DEFAULT_STUB_BIND`].
    ///
    /// # Errors
    ///
    /// Returns an error when the default address fails to parse.
    pub fn stub_bind_or_default(&self) -> Result<SocketAddr, String> {
        self.stub_bind.map_or_else(|| parse_bind("default stub bind", DEFAULT_STUB_BIND), Ok)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a looked-up value: UTF-8 and not blank.
fn read_nonempty(name: &str, raw: Option<OsString>) -> Result<Option<String>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value = raw.into_string().map_err(|_| format!("{name} must be valid UTF-8"))?;
    if value.trim().is_empty() {
        return Err(format!("{name} must not be empty"));
    }
    Ok(Some(value))
}

/// Parses a socket address such as `127.0.0.1:8002`.
fn parse_bind(name: &str, raw: &str) -> Result<SocketAddr, String> {
    raw.trim().parse().map_err(|_| format!("{name} must be a socket address like 127.0.0.1:8002"))
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
