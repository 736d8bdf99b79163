//! ag95 Replay
//!
//! Runs the trailing engine over a scenario file and prints JSON lines.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate scenarios.json once per scenario
//! cargo run -p ag95-replay
//!
//! # Tick-by-tick replay with engine logs as JSON
//! AG95_MODE=replay AG95_SHOW_LOGS=true AG95_LOG_FORMAT=json cargo run -p ag95-replay
//! ```
//!
//! # Environment Variables
//!
//! - `AG95_ENV`: Environment (test, development, production)
//! - `AG95_SCENARIO_PATH`: Scenario file (default: scenarios.json)
//! - `AG95_MODE`: single or replay (default: single)
//! - `AG95_SHOW_LOGS`: Log engine decision points (default: false)
//! - `AG95_LOG_FORMAT`: text or json (default: text)

use std::io;

use ag95_replay::{Config, LogFormat, Runner, ScenarioFile};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load configuration first so the log format is known
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the reports
    let filter = EnvFilter::from_default_env()
        .add_directive("ag95_replay=info".parse()?)
        .add_directive("ag95_engine=info".parse()?);
    match config.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(io::stderr))
            .with(filter)
            .init(),
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        mode = %config.mode,
        scenario_path = %config.scenario_path.display(),
        "ag95 replay"
    );

    let file = ScenarioFile::load(&config.scenario_path)?;
    let runner = Runner::new(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    runner.run(&file, &mut out)?;

    Ok(())
}
