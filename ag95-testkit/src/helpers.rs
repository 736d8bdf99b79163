//! Builders and fixtures shared by integration tests.

use std::str::FromStr;
use std::sync::Mutex;

use ag95_domain::{Direction, RawAmount};
use ag95_engine::{
    DecisionEvent, DecisionObserver, DecisionReason, RawTrailingRequest, TrailingRequest,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};

/// Parse decimal literals. Panics on bad input; test use only.
pub fn prices(values: &[&str]) -> Vec<Decimal> {
    values
        .iter()
        .map(|v| Decimal::from_str(v).unwrap_or_else(|_| panic!("bad decimal literal {v}")))
        .collect()
}

fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|_| panic!("bad decimal literal {value}"))
}

/// Trailing parameters for a request, as decimal literals.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Reference price
    pub position_price: &'static str,
    /// Start trailing unit
    pub start: &'static str,
    /// End trailing unit
    pub end: &'static str,
    /// Safety-net detector unit
    pub safety_net: &'static str,
    /// Direction
    pub direction: Direction,
}

impl Default for RequestOptions {
    /// Position 1, start 0.1, end 0.05, safety net 0.03, UP
    fn default() -> Self {
        Self {
            position_price: "1",
            start: "0.1",
            end: "0.05",
            safety_net: "0.03",
            direction: Direction::Up,
        }
    }
}

impl RequestOptions {
    /// Default parameters trailing downwards
    pub fn down() -> Self {
        Self {
            direction: Direction::Down,
            ..Self::default()
        }
    }

    /// Position 1.0084, start 0.18, end 0.03, safety net 0.03
    pub fn wide(direction: Direction) -> Self {
        Self {
            position_price: "1.0084",
            start: "0.18",
            end: "0.03",
            safety_net: "0.03",
            direction,
        }
    }
}

/// Typed request from literals.
pub fn request(history: &[&str], options: &RequestOptions) -> TrailingRequest {
    TrailingRequest {
        price_history: prices(history),
        position_price: decimal(options.position_price),
        start_trailing_unit: decimal(options.start),
        end_trailing_unit: decimal(options.end),
        safety_net_detector_unit: decimal(options.safety_net),
        direction: options.direction,
    }
}

/// Raw request from literals with a free direction tag.
pub fn raw_request(history: &[&str], options: &RequestOptions, direction: &str) -> RawTrailingRequest {
    RawTrailingRequest {
        price_history: history.iter().map(|p| RawAmount::from(*p)).collect(),
        position_price: RawAmount::from(options.position_price),
        start_trailing_unit: RawAmount::from(options.start),
        end_trailing_unit: RawAmount::from(options.end),
        safety_net_detector_unit: RawAmount::from(options.safety_net),
        direction: direction.to_string(),
    }
}

// =============================================================================
// Reference table
// =============================================================================

/// One reference case with its expected decision.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Short label
    pub name: &'static str,
    /// Price history literals
    pub history: Vec<&'static str>,
    /// Parameters
    pub options: RequestOptions,
    /// Expected decision
    pub decision: Option<bool>,
    /// Expected reason
    pub reason: DecisionReason,
}

impl Scenario {
    /// Typed request for this case
    pub fn request(&self) -> TrailingRequest {
        request(&self.history, &self.options)
    }
}

fn case(
    name: &'static str,
    history: &[&'static str],
    options: RequestOptions,
    decision: bool,
    reason: DecisionReason,
) -> Scenario {
    Scenario {
        name,
        history: history.to_vec(),
        options,
        decision: Some(decision),
        reason,
    }
}

const WIDE: [&str; 6] = ["0.8226", "0.8197", "0.8049", "0.7994", "0.7997", "0.826888"];

fn wide(tail: &[&'static str]) -> Vec<&'static str> {
    WIDE.iter().chain(tail.iter()).copied().collect()
}

/// Reference histories with their expected outcomes, both directions.
///
/// Most rows come from recorded runs. A few differ from those recordings
/// because only-last-value means a following window of exactly one sample;
/// those rows are marked.
pub fn reference_scenarios() -> Vec<Scenario> {
    use DecisionReason::*;

    let up = RequestOptions::default;
    let down = RequestOptions::down;
    let wide_up = || RequestOptions::wide(Direction::Up);
    let wide_down = || RequestOptions::wide(Direction::Down);

    vec![
        case("up only last", &["1", "1.1"], up(), false, OnlyLastValue),
        case("up exact end", &["1", "1.1", "1.045"], up(), true, TrailingEndFulfilled),
        case("up shy of end", &["1", "1.1", "1.046"], up(), false, TrailingEndNotFulfilled),
        case(
            "down safety net after rebound",
            &wide(&["0.85169464"]),
            wide_down(),
            false,
            SafetyNet,
        ),
        case(
            "down following",
            &["0.8226", "0.8197", "0.8049", "0.7994", "0.7997"],
            wide_down(),
            false,
            TrailingEndNotFulfilled,
        ),
        case("wide up exact end", &wide(&["1.189912", "1.15421464"]), wide_up(), true, TrailingEndFulfilled),
        case(
            "wide up one tick shy",
            &wide(&["1.189912", "1.15421465"]),
            wide_up(),
            false,
            TrailingEndNotFulfilled,
        ),
        case(
            "wide up exact safety net",
            &wide(&["1.189912", "1.15421464", "1.1195882008"]),
            wide_up(),
            false,
            SafetyNet,
        ),
        case(
            "wide up just inside safety net",
            &wide(&["1.189912", "1.15421464", "1.1195882009"]),
            wide_up(),
            true,
            TrailingEndFulfilled,
        ),
        case(
            "up crash",
            &["1", "1.01", "1.05", "1.08", "1.045", "1.1", "1.01", "0.99", "0.7", "0.5"],
            up(),
            false,
            SafetyNet,
        ),
        case("up from below", &["0.5", "0.8", "1.1", "1.02"], up(), true, TrailingEndFulfilled),
        case("up spike then crash", &["1", "5", "3", "4", "2"], up(), false, SafetyNet),
        // Window of one sample, so only-last-value rather than not-fulfilled
        case("up gap only last", &["1", "10"], up(), false, OnlyLastValue),
        case("down exact end", &["1", "0.9", "0.945"], down(), true, TrailingEndFulfilled),
        case("down shy of end", &["1", "0.9", "0.9449"], down(), false, TrailingEndNotFulfilled),
        case("down only last", &["1", "0.9"], down(), false, OnlyLastValue),
        case(
            "down rebound past safety net",
            &["1", "1.01", "0.9", "1.05", "1.08", "1.045", "1.01"],
            down(),
            false,
            SafetyNet,
        ),
        case(
            "down rebound to end",
            &["1", "1.01", "0.9", "1.05", "1.08", "1.045", "1.01", "0.95"],
            down(),
            true,
            TrailingEndFulfilled,
        ),
        case(
            "down from above",
            &["1", "2", "3", "0.9", "0.91", "0.92", "0.93", "0.94", "0.95"],
            down(),
            true,
            TrailingEndFulfilled,
        ),
        case(
            "down late trough",
            &["1", "1.01", "1.05", "1.08", "1.045", "1.1", "1.2", "0.9", "1.3", "0.91", "0.905"],
            down(),
            false,
            TrailingEndNotFulfilled,
        ),
        case(
            "down never reached",
            &["1", "1.01", "1.05", "1.08", "1.045", "1.1", "1.2", "1.3", "0.91", "0.905"],
            down(),
            false,
            Standby,
        ),
        // Two samples at the start limit form a window of two, so this is
        // following (not-fulfilled) rather than only-last-value
        case("up flat at peak", &["1", "1.01", "1.05", "1.1", "1.1"], up(), false, TrailingEndNotFulfilled),
    ]
}

/// Scenario file body for the replay binary.
pub fn scenario_file_json(scenarios: &[Scenario]) -> Value {
    let entries: Vec<Value> = scenarios
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "price_history": s.history,
                "position_price": s.options.position_price,
                "start_trailing_unit": s.options.start,
                "end_trailing_unit": s.options.end,
                "safety_net_detector_unit": s.options.safety_net,
                "direction": s.options.direction.as_str(),
            })
        })
        .collect();

    json!({ "scenarios": entries })
}

// =============================================================================
// Observer
// =============================================================================

/// Observer that keeps every event in memory.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<DecisionEvent>>,
}

impl CollectingObserver {
    /// Snapshot of recorded events
    pub fn events(&self) -> Vec<DecisionEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Forget recorded events
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl DecisionObserver for CollectingObserver {
    fn observe(&self, event: &DecisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(*event);
        }
    }
}
