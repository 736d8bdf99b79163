//! Integration test: scenario file on disk through the replay runner.
//!
//! Flow:
//! 1. Write the reference table to a temporary scenario file
//! 2. Load it back and run it in single and replay mode
//! 3. Verify each JSON line against the expected decision

use std::io::Write;

use ag95_engine::{DecisionReason, TrailingEngine};
use ag95_replay::{Mode, Runner, ScenarioFile, ScenarioReport};
use ag95_testkit::{reference_scenarios, scenario_file_json};

fn write_scenarios() -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    let body = scenario_file_json(&reference_scenarios());
    file.write_all(serde_json::to_string_pretty(&body)?.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn run(mode: Mode) -> anyhow::Result<Vec<ScenarioReport>> {
    let tmp = write_scenarios()?;
    let file = ScenarioFile::load(tmp.path())?;

    let mut out = Vec::new();
    Runner::with_engine(TrailingEngine::new(), mode).run(&file, &mut out)?;

    let text = String::from_utf8(out)?;
    text.lines()
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_single_mode_matches_reference_table() -> anyhow::Result<()> {
    let expected = reference_scenarios();
    let reports = run(Mode::Single)?;

    assert_eq!(reports.len(), expected.len());
    for (report, scenario) in reports.iter().zip(&expected) {
        assert_eq!(report.name, scenario.name);
        assert_eq!(report.mode, Mode::Single);
        assert_eq!(report.ticks, scenario.history.len());
        assert_eq!(report.triggered_at, None);
        assert_eq!(report.result.decision, scenario.decision, "{}", scenario.name);
        assert_eq!(report.result.reason, scenario.reason, "{}", scenario.name);
    }
    Ok(())
}

#[test]
fn test_replay_mode_trigger_is_consistent_with_final_decision() -> anyhow::Result<()> {
    for report in run(Mode::Replay)? {
        if report.result.reason == DecisionReason::TrailingEndFulfilled {
            let tick = report.triggered_at.expect("fulfilled scenario has a trigger");
            assert!(tick <= report.ticks, "{}", report.name);
        }
        if let Some(tick) = report.triggered_at {
            assert!(tick >= 2, "{}: a trigger needs at least two samples", report.name);
        }
    }
    Ok(())
}

#[test]
fn test_replay_mode_finds_earliest_trigger() -> anyhow::Result<()> {
    let reports = run(Mode::Replay)?;

    let exact = reports.iter().find(|r| r.name == "up exact end").unwrap();
    assert_eq!(exact.triggered_at, Some(3));

    // Retraced straight through the safety net, no tick was ever fulfilled
    let crash = reports.iter().find(|r| r.name == "up crash").unwrap();
    assert_eq!(crash.result.reason, DecisionReason::SafetyNet);
    assert_eq!(crash.triggered_at, None);

    let late = reports.iter().find(|r| r.name == "down rebound to end").unwrap();
    assert_eq!(late.triggered_at, Some(8));
    Ok(())
}
