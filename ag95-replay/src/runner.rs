//! Scenario runner.
//!
//! Evaluates scenarios and writes one JSON report per line.
//!
//! In `replay` mode every prefix of the history is evaluated in order, as if
//! the prices arrived one tick at a time; amounts are parsed once per scenario. The report names the first tick
//! whose decision was `true` and carries the decision on the full history.

use std::io::Write;
use std::sync::Arc;

use ag95_domain::timed;
use ag95_engine::{RawTrailingRequest, TracingObserver, TrailingDecision, TrailingEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Config, Mode};
use crate::error::{ReplayError, ReplayResult};
use crate::scenario::{Scenario, ScenarioFile};

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,
    /// Evaluation mode
    pub mode: Mode,
    /// Number of prices in the history
    pub ticks: usize,
    /// Replay mode: history length at the first `true` decision
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub triggered_at: Option<usize>,
    /// Decision on the full history
    pub result: TrailingDecision,
}

/// Counters for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Scenarios evaluated
    pub scenarios: usize,
    /// Final decision `true`
    pub fulfilled: usize,
    /// Final decision `None`
    pub invalid: usize,
}

/// Runs scenarios through a shared engine.
#[derive(Debug, Clone)]
pub struct Runner {
    engine: TrailingEngine,
    mode: Mode,
}

impl Runner {
    /// Runner configured from `config`.
    pub fn new(config: &Config) -> Self {
        let engine = if config.show_logs {
            TrailingEngine::with_observer(Arc::new(TracingObserver))
        } else {
            TrailingEngine::new()
        };
        Self::with_engine(engine, config.mode)
    }

    /// Runner over an existing engine.
    pub fn with_engine(engine: TrailingEngine, mode: Mode) -> Self {
        Self { engine, mode }
    }

    /// Evaluate every scenario, writing one JSON line each to `out`.
    ///
    /// Stops at the first scenario with unreadable amounts.
    pub fn run<W: Write>(&self, file: &ScenarioFile, out: &mut W) -> ReplayResult<RunSummary> {
        let mut summary = RunSummary::default();

        for scenario in &file.scenarios {
            let report = self.evaluate(scenario)?;

            summary.scenarios += 1;
            match report.result.decision {
                Some(true) => summary.fulfilled += 1,
                None => summary.invalid += 1,
                Some(false) => {},
            }

            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
        }
        out.flush()?;

        info!(
            scenarios = summary.scenarios,
            fulfilled = summary.fulfilled,
            invalid = summary.invalid,
            "Run complete"
        );
        Ok(summary)
    }

    /// Evaluate one scenario.
    pub fn evaluate(&self, scenario: &Scenario) -> ReplayResult<ScenarioReport> {
        let ticks = scenario.request.price_history.len();

        let triggered_at = match self.mode {
            Mode::Single => None,
            Mode::Replay => self.first_trigger(scenario)?,
        };
        let result = self.take(scenario, &scenario.request)?;

        Ok(ScenarioReport {
            name: scenario.name.clone(),
            mode: self.mode,
            ticks,
            triggered_at,
            result,
        })
    }

    fn first_trigger(&self, scenario: &Scenario) -> ReplayResult<Option<usize>> {
        let outcome = timed(|| self.engine.first_fulfilled_tick(&scenario.request))
            .transpose()
            .map_err(|source| ReplayError::Engine {
                scenario: scenario.name.clone(),
                source,
            })?;

        debug!(
            scenario = %scenario.name,
            tick = ?outcome.value,
            elapsed_secs = outcome.elapsed_secs(),
            "First fulfilled tick"
        );
        Ok(outcome.value)
    }

    fn take(&self, scenario: &Scenario, request: &RawTrailingRequest) -> ReplayResult<TrailingDecision> {
        let outcome = timed(|| self.engine.take_raw(request))
            .transpose()
            .map_err(|source| ReplayError::Engine {
                scenario: scenario.name.clone(),
                source,
            })?;

        debug!(
            scenario = %scenario.name,
            ticks = request.price_history.len(),
            elapsed_secs = outcome.elapsed_secs(),
            reason = %outcome.value.reason,
            "Evaluated"
        );
        Ok(outcome.value)
    }
}
