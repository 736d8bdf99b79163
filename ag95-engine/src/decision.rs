//! Trailing decision result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Reason
// =============================================================================

/// Why the engine reached its decision.
///
/// The five `Invalid*` reasons come with `decision: None`; every other reason
/// comes with `Some(true)` or `Some(false)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionReason {
    /// Price history is empty
    InvalidPriceHistory,
    /// Start trailing unit <= 0
    InvalidStartUnit,
    /// End trailing unit <= 0
    InvalidEndUnit,
    /// Safety-net detector unit <= 0
    InvalidSafetyNetUnit,
    /// Direction tag is neither UP nor DOWN
    InvalidDirection,
    /// Start threshold never reached
    Standby,
    /// Only the last sample reached the start threshold
    OnlyLastValue,
    /// Retracement went past the safety margin
    SafetyNet,
    /// Retracement reached the end threshold
    TrailingEndFulfilled,
    /// Following, retracement not deep enough yet
    TrailingEndNotFulfilled,
}

impl DecisionReason {
    /// Human readable message
    pub fn message(&self) -> &'static str {
        match self {
            DecisionReason::InvalidPriceHistory => "invalid price history",
            DecisionReason::InvalidStartUnit => "invalid start trailing unit",
            DecisionReason::InvalidEndUnit => "invalid end trailing unit",
            DecisionReason::InvalidSafetyNetUnit => "invalid safety net detector unit",
            DecisionReason::InvalidDirection => "invalid direction",
            DecisionReason::Standby => "in standby mode",
            DecisionReason::OnlyLastValue => "only last value fulfilled",
            DecisionReason::SafetyNet => "in safety mode",
            DecisionReason::TrailingEndFulfilled => "trailing end condition fulfilled",
            DecisionReason::TrailingEndNotFulfilled => "trailing end condition NOT fulfilled",
        }
    }

    /// True for the input validation reasons
    pub fn is_sanity_failure(&self) -> bool {
        matches!(
            self,
            DecisionReason::InvalidPriceHistory
                | DecisionReason::InvalidStartUnit
                | DecisionReason::InvalidEndUnit
                | DecisionReason::InvalidSafetyNetUnit
                | DecisionReason::InvalidDirection
        )
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Limits computed once the engine is following.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowingLimits {
    /// Running peak (Up) or trough (Down), never less extreme than the start limit
    pub new_start_limit: Decimal,
    /// Retracement level that triggers the decision
    pub end_limit: Decimal,
    /// Retracement level past which the signal is distrusted
    pub safety_net_limit: Decimal,
}

/// Intermediate values, for logging and debugging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionExtra {
    /// Reference price
    pub position_price: Decimal,
    /// Absolute start threshold
    pub start_limit: Decimal,
    /// Current (last) price
    pub last_price: Decimal,
    /// Present once following with at least two samples
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub limits: Option<FollowingLimits>,
}

// =============================================================================
// Decision
// =============================================================================

/// Result of one trailing evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailingDecision {
    /// `Some(true)` act now, `Some(false)` wait, `None` invalid input
    pub decision: Option<bool>,
    /// Why
    pub reason: DecisionReason,
    /// Diagnostics; absent for invalid input
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extra: Option<DecisionExtra>,
}

impl TrailingDecision {
    /// Invalid input result
    pub fn invalid(reason: DecisionReason) -> Self {
        Self {
            decision: None,
            reason,
            extra: None,
        }
    }

    /// A `false` decision
    pub fn wait(reason: DecisionReason, extra: DecisionExtra) -> Self {
        Self {
            decision: Some(false),
            reason,
            extra: Some(extra),
        }
    }

    /// Final decision once following
    pub fn trailing(fulfilled: bool, extra: DecisionExtra) -> Self {
        let reason = if fulfilled {
            DecisionReason::TrailingEndFulfilled
        } else {
            DecisionReason::TrailingEndNotFulfilled
        };
        Self {
            decision: Some(fulfilled),
            reason,
            extra: Some(extra),
        }
    }

    /// True only for `Some(true)`
    pub fn should_act(&self) -> bool {
        self.decision == Some(true)
    }

    /// Following limits, when the engine got that far
    pub fn limits(&self) -> Option<FollowingLimits> {
        self.extra.and_then(|extra| extra.limits)
    }
}
