//! ag95 Replay
//!
//! Feeds recorded price histories through the trailing engine and prints one
//! JSON decision per scenario.

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod runner;
pub mod scenario;

pub use config::{Config, Environment, LogFormat, Mode};
pub use error::{ReplayError, ReplayResult};
pub use runner::{RunSummary, Runner, ScenarioReport};
pub use scenario::{Scenario, ScenarioFile};
