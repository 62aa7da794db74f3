// wine-probe/src/config/env.rs
// ============================================================================
// Module: Probe Environment
// Description: Environment-backed configuration for the wine probe.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8, empty values, malformed URLs, and
//! non-positive timeouts fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Endpoint targeted when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "http://10.2.133.39:8002/predict";

/// Environment keys for probe configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEnv {
    /// Optional prediction endpoint URL override.
    Url,
    /// Optional per-request timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Optional event log target (`stderr`, `off`, or a file path).
    EventLog,
}

impl ProbeEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Url => "WINE_PROBE_URL",
            Self::TimeoutSeconds => "WINE_PROBE_TIMEOUT_SEC",
            Self::EventLog => "WINE_PROBE_EVENT_LOG",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors. `setting` names the env var or flag at fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Value is not valid UTF-8.
    #[error("{setting} must be valid UTF-8")]
    NonUtf8 {
        /// Offending setting.
        setting: &'static str,
    },
    /// Value is empty or whitespace.
    #[error("{setting} must not be empty")]
    Empty {
        /// Offending setting.
        setting: &'static str,
    },
    /// Timeout is not a positive integer.
    #[error("{setting} must be a positive integer number of seconds")]
    InvalidTimeout {
        /// Offending setting.
        setting: &'static str,
    },
    /// Timeout is zero.
    #[error("{setting} must be greater than zero")]
    ZeroTimeout {
        /// Offending setting.
        setting: &'static str,
    },
    /// URL does not parse.
    #[error("{setting} is not a valid URL: {reason}")]
    InvalidUrl {
        /// Offending setting.
        setting: &'static str,
        /// Parser message.
        reason: String,
    },
    /// URL scheme is not HTTP.
    #[error("{setting} must use http or https, got {scheme}")]
    UnsupportedScheme {
        /// Offending setting.
        setting: &'static str,
        /// Rejected scheme.
        scheme: String,
    },
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Destination for structured run events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventLogTarget {
    /// JSON lines on standard error.
    #[default]
    Stderr,
    /// Events are discarded.
    Off,
    /// JSON lines appended to a file.
    File(PathBuf),
}

impl EventLogTarget {
    /// Parses `stderr`, `off` (case-insensitive), or treats the value as a path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("stderr") {
            Self::Stderr
        } else if trimmed.eq_ignore_ascii_case("off") {
            Self::Off
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

/// Command-line overrides applied on top of environment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOverrides {
    /// `--url` value.
    pub url: Option<String>,
    /// `--timeout-sec` value.
    pub timeout_secs: Option<u64>,
    /// `--event-log` value.
    pub event_log: Option<String>,
}

/// Typed probe configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Prediction endpoint receiving both POSTs.
    pub endpoint: Url,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Structured event destination.
    pub event_log: EventLogTarget,
}

impl ProbeConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid URL or timeout).
    pub fn load() -> Result<Self, ConfigError> {
        let url_name = ProbeEnv::Url.as_str();
        let endpoint = match read_env_nonempty(url_name)? {
            Some(raw) => parse_endpoint(url_name, &raw)?,
            None => parse_endpoint(url_name, DEFAULT_ENDPOINT)?,
        };
        let timeout = read_env_nonempty(ProbeEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(ProbeEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let event_log = read_env_nonempty(ProbeEnv::EventLog.as_str())?
            .map_or_else(EventLogTarget::default, |value| EventLogTarget::parse(&value));
        Ok(Self {
            endpoint,
            timeout,
            event_log,
        })
    }

    /// Applies command-line overrides, which take precedence over the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when an override is empty or fails validation.
    pub fn with_overrides(mut self, overrides: ProbeOverrides) -> Result<Self, ConfigError> {
        if let Some(raw) = overrides.url {
            self.endpoint = parse_endpoint("--url", require_nonempty("--url", raw)?.as_str())?;
        }
        if let Some(secs) = overrides.timeout_secs {
            if secs == 0 {
                return Err(ConfigError::ZeroTimeout {
                    setting: "--timeout-sec",
                });
            }
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(raw) = overrides.event_log {
            self.event_log =
                EventLogTarget::parse(require_nonempty("--event-log", raw)?.as_str());
        }
        Ok(self)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &'static str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::NonUtf8 {
            setting: name,
        })
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &'static str) -> Result<Option<String>, ConfigError> {
    read_env_strict(name)?.map(|value| require_nonempty(name, value)).transpose()
}

/// Rejects empty or whitespace-only values.
fn require_nonempty(setting: &'static str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty {
            setting,
        });
    }
    Ok(value)
}

/// Parses a positive timeout value in seconds.
fn parse_timeout_seconds(setting: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
        setting,
    })?;
    if secs == 0 {
        return Err(ConfigError::ZeroTimeout {
            setting,
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Parses an endpoint URL and restricts it to HTTP schemes.
fn parse_endpoint(setting: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidUrl {
        setting,
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            setting,
            scheme: other.to_string(),
        }),
    }
}
