//! Diagnostic sink for the trailing engine.
//!
//! The engine reports what it is doing through an optional
//! [`DecisionObserver`]. Observers only watch: the decision is identical
//! with or without one.

use ag95_domain::Direction;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::decision::{DecisionReason, FollowingLimits};

/// Decision points reported to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionEvent {
    /// A sanity check failed; evaluation stopped
    SanityFailed {
        /// Which check
        reason: DecisionReason,
    },
    /// No sample reached the start limit
    Standby {
        /// Absolute start threshold
        start_limit: Decimal,
    },
    /// At least one sample reached the start limit
    FollowingEntered {
        /// Direction being trailed
        direction: Direction,
        /// Absolute start threshold
        start_limit: Decimal,
        /// Length of the following window
        window_len: usize,
    },
    /// Only the current sample reached the start limit
    OnlyLastValue {
        /// Current price
        last_price: Decimal,
    },
    /// Retracement breached the safety net; abstaining
    SafetyNetActivated {
        /// Limits in force
        limits: FollowingLimits,
        /// Current price
        last_price: Decimal,
    },
    /// Final trailing verdict
    Decided {
        /// Whether to act now
        fulfilled: bool,
        /// Limits in force
        limits: FollowingLimits,
        /// Current price
        last_price: Decimal,
    },
}

/// Receives engine decision points.
pub trait DecisionObserver: Send + Sync {
    /// Called synchronously at each decision point.
    fn observe(&self, event: &DecisionEvent);
}

/// Observer that emits `tracing` events.
///
/// Sanity failures log at error, safety net at warn, the rest at info.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DecisionObserver for TracingObserver {
    fn observe(&self, event: &DecisionEvent) {
        match event {
            DecisionEvent::SanityFailed { reason } => {
                error!(reason = %reason, "Failed sanity checks");
            },
            DecisionEvent::Standby { start_limit } => {
                info!(%start_limit, "Limit NOT reached, standby mode");
            },
            DecisionEvent::FollowingEntered {
                direction,
                start_limit,
                window_len,
            } => {
                info!(%direction, %start_limit, window_len, "Limit reached, following mode");
            },
            DecisionEvent::OnlyLastValue { last_price } => {
                info!(%last_price, "Only the last value reached the limit");
            },
            DecisionEvent::SafetyNetActivated { limits, last_price } => {
                warn!(
                    %last_price,
                    end_limit = %limits.end_limit,
                    safety_net_limit = %limits.safety_net_limit,
                    "Safety net mode activated"
                );
            },
            DecisionEvent::Decided {
                fulfilled,
                limits,
                last_price,
            } => {
                if *fulfilled {
                    info!(%last_price, end_limit = %limits.end_limit, "Decided that an order should be made");
                } else {
                    info!(%last_price, end_limit = %limits.end_limit, "Decided that an order should NOT be made");
                }
            },
        }
    }
}
