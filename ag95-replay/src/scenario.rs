//! Scenario files.
//!
//! ```json
//! { "scenarios": [ { "name": "btc", "price_history": ["1", 1.1], ..., "direction": "UP" } ] }
//! ```

use std::fs;
use std::path::Path;

use ag95_engine::RawTrailingRequest;
use serde::{Deserialize, Serialize};

use crate::error::{ReplayError, ReplayResult};

/// One named trailing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Label echoed in the output
    pub name: String,
    /// Request fields, inline
    #[serde(flatten)]
    pub request: RawTrailingRequest,
}

/// Top-level scenario document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    /// Scenarios in file order
    pub scenarios: Vec<Scenario>,
}

impl ScenarioFile {
    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a scenario document.
    pub fn from_json(text: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
