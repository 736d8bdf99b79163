//! Trailing Decision Logic (Pure Functions)
//!
//! This module decides, from a price history, whether a trailing condition
//! has been fulfilled. Evaluation is deterministic and has no side effects:
//! callers re-run it with the updated history on every new tick.
//!
//! # Trailing Algorithm
//!
//! ```text
//! UP:   start_limit = position × (1 + start_unit)
//! DOWN: start_limit = position × (1 − start_unit)
//!
//! window          = history from the first sample that reached start_limit
//! new_start_limit = max(window ∪ {start_limit})            (min for DOWN)
//! end_limit       = new_start_limit × (1 − end_unit)       (1 + for DOWN)
//! safety_limit    = end_limit × (1 − safety_unit)          (1 + for DOWN)
//!
//! last beyond safety_limit  → SAFETY_NET, false
//! last reached end_limit    → FULFILLED, true
//! otherwise                 → NOT_FULFILLED, false
//! ```
//!
//! Key invariants:
//! - Sanity checks run first, in a fixed order, and short-circuit
//! - The running extreme is never less extreme than the start limit
//! - Only the last sample is tested against the safety net
//! - Equality counts: a retracement of exactly `end_unit` is fulfilled
//! - Limit arithmetic is checked; overflow is an error, never a panic

use std::sync::Arc;

use ag95_domain::{Direction, DomainError, Unit};
use rust_decimal::Decimal;

use crate::decision::{DecisionExtra, DecisionReason, FollowingLimits, TrailingDecision};
use crate::error::{EngineError, EngineResult};
use crate::observer::{DecisionEvent, DecisionObserver};
use crate::request::{RawTrailingRequest, TrailingRequest};

/// Borrowed view of one evaluation's inputs.
#[derive(Clone, Copy)]
struct Evaluation<'a> {
    history: &'a [Decimal],
    position_price: Decimal,
    start_unit: Decimal,
    end_unit: Decimal,
    safety_net_unit: Decimal,
    direction: Option<Direction>,
}

/// Inputs that passed every sanity check.
struct Checked<'a> {
    history: &'a [Decimal],
    position_price: Decimal,
    start_unit: Unit,
    end_unit: Unit,
    safety_net_unit: Unit,
    direction: Direction,
}

/// Stateless trailing decision engine.
///
/// Holds only an optional observer, so one engine can be shared freely
/// across threads and calls.
///
/// # Examples
///
/// ```
/// # use ag95_engine::{DecisionReason, TrailingEngine, TrailingRequest};
/// # use ag95_domain::Direction;
/// # use rust_decimal_macros::dec;
/// let request = TrailingRequest {
///     price_history: vec![dec!(1), dec!(1.1), dec!(1.045)],
///     position_price: dec!(1),
///     start_trailing_unit: dec!(0.1),
///     end_trailing_unit: dec!(0.05),
///     safety_net_detector_unit: dec!(0.03),
///     direction: Direction::Up,
/// };
///
/// let result = TrailingEngine::new().take(&request).unwrap();
/// assert_eq!(result.decision, Some(true));
/// assert_eq!(result.reason, DecisionReason::TrailingEndFulfilled);
/// assert_eq!(result.limits().unwrap().end_limit, dec!(1.045));
/// ```
#[derive(Clone, Default)]
pub struct TrailingEngine {
    observer: Option<Arc<dyn DecisionObserver>>,
}

impl std::fmt::Debug for TrailingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrailingEngine")
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl TrailingEngine {
    /// Engine without diagnostics
    pub fn new() -> Self {
        Self { observer: None }
    }

    /// Engine reporting decision points to `observer`
    pub fn with_observer(observer: Arc<dyn DecisionObserver>) -> Self {
        Self {
            observer: Some(observer),
        }
    }

    /// Evaluate a typed request.
    ///
    /// # Errors
    /// Returns `EngineError::Overflow` when a limit leaves the decimal range.
    pub fn take(&self, request: &TrailingRequest) -> EngineResult<TrailingDecision> {
        self.evaluate(Evaluation {
            history: &request.price_history,
            position_price: request.position_price,
            start_unit: request.start_trailing_unit,
            end_unit: request.end_trailing_unit,
            safety_net_unit: request.safety_net_detector_unit,
            direction: Some(request.direction),
        })
    }

    /// Evaluate a raw request.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidField` when an amount cannot be read as a
    /// decimal, and `EngineError::Overflow` when a limit leaves the decimal
    /// range. An unknown direction tag is not an error: it yields an
    /// `InvalidDirection` decision.
    pub fn take_raw(&self, request: &RawTrailingRequest) -> EngineResult<TrailingDecision> {
        let parsed = request.parse()?;

        self.evaluate(Evaluation {
            history: &parsed.price_history,
            position_price: parsed.position_price,
            start_unit: parsed.start_trailing_unit,
            end_unit: parsed.end_trailing_unit,
            safety_net_unit: parsed.safety_net_detector_unit,
            direction: parsed.direction,
        })
    }

    /// Replay a raw request one tick at a time.
    ///
    /// Amounts are parsed once; each prefix of the history is then evaluated
    /// in order. Returns the length of the shortest prefix whose decision is
    /// `true`, or `None` when no tick fulfilled.
    ///
    /// # Errors
    /// Same as [`TrailingEngine::take_raw`].
    pub fn first_fulfilled_tick(&self, request: &RawTrailingRequest) -> EngineResult<Option<usize>> {
        let parsed = request.parse()?;
        let full = Evaluation {
            history: &parsed.price_history,
            position_price: parsed.position_price,
            start_unit: parsed.start_trailing_unit,
            end_unit: parsed.end_trailing_unit,
            safety_net_unit: parsed.safety_net_detector_unit,
            direction: parsed.direction,
        };

        for len in 1..=full.history.len() {
            let tick = Evaluation {
                history: &full.history[..len],
                ..full
            };
            if self.evaluate(tick)?.should_act() {
                return Ok(Some(len));
            }
        }
        Ok(None)
    }

    fn emit(&self, event: DecisionEvent) {
        if let Some(observer) = &self.observer {
            observer.observe(&event);
        }
    }

    fn evaluate(&self, input: Evaluation<'_>) -> EngineResult<TrailingDecision> {
        let checked = match sanity_check(&input) {
            Ok(checked) => checked,
            Err(reason) => {
                self.emit(DecisionEvent::SanityFailed { reason });
                return Ok(TrailingDecision::invalid(reason));
            },
        };

        let direction = checked.direction;
        let start_limit = start_limit(direction, checked.position_price, checked.start_unit)
            .map_err(EngineError::Overflow)?;

        // Sanity checks guarantee a non-empty history
        let Some(&last_price) = checked.history.last() else {
            return Ok(TrailingDecision::invalid(DecisionReason::InvalidPriceHistory));
        };

        let mut extra = DecisionExtra {
            position_price: checked.position_price,
            start_limit,
            last_price,
            limits: None,
        };

        let Some(window) = following_window(checked.history, direction, start_limit) else {
            self.emit(DecisionEvent::Standby { start_limit });
            return Ok(TrailingDecision::wait(DecisionReason::Standby, extra));
        };

        self.emit(DecisionEvent::FollowingEntered {
            direction,
            start_limit,
            window_len: window.len(),
        });

        if window.len() == 1 {
            self.emit(DecisionEvent::OnlyLastValue { last_price });
            return Ok(TrailingDecision::wait(DecisionReason::OnlyLastValue, extra));
        }

        let limits = following_limits(
            window,
            direction,
            start_limit,
            checked.end_unit,
            checked.safety_net_unit,
        )
        .map_err(EngineError::Overflow)?;
        extra.limits = Some(limits);

        if direction.retraced(last_price, limits.safety_net_limit) {
            self.emit(DecisionEvent::SafetyNetActivated { limits, last_price });
            return Ok(TrailingDecision::wait(DecisionReason::SafetyNet, extra));
        }

        let fulfilled = direction.retraced(last_price, limits.end_limit);
        self.emit(DecisionEvent::Decided {
            fulfilled,
            limits,
            last_price,
        });

        Ok(TrailingDecision::trailing(fulfilled, extra))
    }
}

/// Validate in order: history, start unit, end unit, safety-net unit, direction.
fn sanity_check<'a>(input: &Evaluation<'a>) -> Result<Checked<'a>, DecisionReason> {
    if input.history.is_empty() {
        return Err(DecisionReason::InvalidPriceHistory);
    }
    let start_unit =
        Unit::new(input.start_unit).map_err(|_| DecisionReason::InvalidStartUnit)?;
    let end_unit = Unit::new(input.end_unit).map_err(|_| DecisionReason::InvalidEndUnit)?;
    let safety_net_unit =
        Unit::new(input.safety_net_unit).map_err(|_| DecisionReason::InvalidSafetyNetUnit)?;
    let direction = input.direction.ok_or(DecisionReason::InvalidDirection)?;

    Ok(Checked {
        history: input.history,
        position_price: input.position_price,
        start_unit,
        end_unit,
        safety_net_unit,
        direction,
    })
}

/// Absolute start threshold.
///
/// # Errors
/// Returns `DomainError::Overflow` when the threshold leaves the decimal range.
pub fn start_limit(
    direction: Direction,
    position_price: Decimal,
    start_unit: Unit,
) -> Result<Decimal, DomainError> {
    match direction {
        Direction::Up => start_unit.grow(position_price),
        Direction::Down => start_unit.shrink(position_price),
    }
}

/// Suffix of `history` beginning at the first sample that reached
/// `start_limit`, or `None` when no sample did.
pub fn following_window(
    history: &[Decimal],
    direction: Direction,
    start_limit: Decimal,
) -> Option<&[Decimal]> {
    history
        .iter()
        .position(|price| direction.reached(*price, start_limit))
        .map(|first| &history[first..])
}

/// Running extreme, end limit and safety-net limit for a following window.
///
/// # Errors
/// Returns `DomainError::Overflow` when a limit leaves the decimal range.
pub fn following_limits(
    window: &[Decimal],
    direction: Direction,
    start_limit: Decimal,
    end_unit: Unit,
    safety_net_unit: Unit,
) -> Result<FollowingLimits, DomainError> {
    match direction {
        Direction::Up => {
            let new_start_limit = window.iter().copied().fold(start_limit, Decimal::max);
            let end_limit = end_unit.shrink(new_start_limit)?;
            Ok(FollowingLimits {
                new_start_limit,
                end_limit,
                safety_net_limit: safety_net_unit.shrink(end_limit)?,
            })
        },
        Direction::Down => {
            let new_start_limit = window.iter().copied().fold(start_limit, Decimal::min);
            let end_limit = end_unit.grow(new_start_limit)?;
            Ok(FollowingLimits {
                new_start_limit,
                end_limit,
                safety_net_limit: safety_net_unit.grow(end_limit)?,
            })
        },
    }
}

// =============================================================================
// Tests
// =============================================================================
