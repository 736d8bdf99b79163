//! Replay error types.

use std::path::PathBuf;

use ag95_engine::EngineError;
use thiserror::Error;

/// Replay-level errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Engine rejected a scenario's amounts
    #[error("Scenario '{scenario}': {source}")]
    Engine {
        /// Scenario name
        scenario: String,
        /// Underlying engine error
        #[source]
        source: EngineError,
    },

    /// Scenario file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Output could not be written
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file or output is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;
