//! Replay configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::{ReplayError, ReplayResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

// =============================================================================
// Configuration
// =============================================================================

/// Replay configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (test, development, production)
    pub environment: Environment,

    /// Scenario file to replay
    pub scenario_path: PathBuf,

    /// Evaluation mode
    pub mode: Mode,

    /// Attach the tracing observer to the engine
    pub show_logs: bool,

    /// Log output format
    pub log_format: LogFormat,
}

/// Environment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment
    Test,
    /// Development environment
    Development,
    /// Production environment
    Production,
}

/// How each scenario is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One decision on the full history
    Single,
    /// One decision per tick, on every prefix of the history
    Replay,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable
    Text,
    /// One JSON object per event
    Json,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> ReplayResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ReplayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Self::load_environment(&lookup)?;
        let scenario_path = lookup("AG95_SCENARIO_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("scenarios.json"));
        let mode = Self::load_mode(&lookup)?;
        let show_logs = Self::load_bool(&lookup, "AG95_SHOW_LOGS", false)?;
        let log_format = Self::load_log_format(&lookup)?;

        Ok(Self {
            environment,
            scenario_path,
            mode,
            show_logs,
            log_format,
        })
    }

    /// Create test configuration.
    pub fn test() -> Self {
        Self {
            environment: Environment::Test,
            scenario_path: PathBuf::from("scenarios.json"),
            mode: Mode::Single,
            show_logs: false,
            log_format: LogFormat::Text,
        }
    }

    fn load_environment<F: Fn(&str) -> Option<String>>(lookup: &F) -> ReplayResult<Environment> {
        let env_str = lookup("AG95_ENV").unwrap_or_else(|| "development".to_string());

        match env_str.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ReplayError::Config(format!(
                "Invalid AG95_ENV: {}. Expected: test, development, production",
                other
            ))),
        }
    }

    fn load_mode<F: Fn(&str) -> Option<String>>(lookup: &F) -> ReplayResult<Mode> {
        let mode_str = lookup("AG95_MODE").unwrap_or_else(|| "single".to_string());

        match mode_str.to_lowercase().as_str() {
            "single" => Ok(Mode::Single),
            "replay" => Ok(Mode::Replay),
            other => Err(ReplayError::Config(format!(
                "Invalid AG95_MODE: {}. Expected: single, replay",
                other
            ))),
        }
    }

    fn load_log_format<F: Fn(&str) -> Option<String>>(lookup: &F) -> ReplayResult<LogFormat> {
        let format_str = lookup("AG95_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        match format_str.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ReplayError::Config(format!(
                "Invalid AG95_LOG_FORMAT: {}. Expected: text, json",
                other
            ))),
        }
    }

    fn load_bool<F: Fn(&str) -> Option<String>>(
        lookup: &F,
        key: &str,
        default: bool,
    ) -> ReplayResult<bool> {
        match lookup(key) {
            Some(val) => match val.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" | "" => Ok(false),
                _ => Err(ReplayError::Config(format!("Invalid {} value: {}", key, val))),
            },
            None => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            scenario_path: PathBuf::from("scenarios.json"),
            mode: Mode::Single,
            show_logs: false,
            log_format: LogFormat::Text,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Single => write!(f, "single"),
            Mode::Replay => write!(f, "replay"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
