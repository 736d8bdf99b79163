//! Trailing requests: typed, and raw (as read from JSON or user input).

use ag95_domain::{Direction, RawAmount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A fully typed evaluation request.
///
/// Units are not validated here; the engine reports out-of-range units as
/// `decision: None` results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailingRequest {
    /// Chronological prices, last is current
    pub price_history: Vec<Decimal>,
    /// Reference (entry) price
    pub position_price: Decimal,
    /// Fraction of the position price that activates following
    pub start_trailing_unit: Decimal,
    /// Fraction of retracement from the peak/trough that triggers
    pub end_trailing_unit: Decimal,
    /// Extra fraction beyond the end limit that means "abstain"
    pub safety_net_detector_unit: Decimal,
    /// Up or Down
    pub direction: Direction,
}

/// A request whose amounts are still raw and whose direction is a free tag.
///
/// Amounts may be JSON strings or numbers. The direction tag is only checked
/// by the engine, after the unit checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrailingRequest {
    /// Chronological prices, last is current
    pub price_history: Vec<RawAmount>,
    /// Reference (entry) price
    pub position_price: RawAmount,
    /// Start trailing unit
    pub start_trailing_unit: RawAmount,
    /// End trailing unit
    pub end_trailing_unit: RawAmount,
    /// Safety-net detector unit
    pub safety_net_detector_unit: RawAmount,
    /// `"UP"` or `"DOWN"`
    pub direction: String,
}

/// Raw request with every amount converted, direction still unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedRequest {
    pub price_history: Vec<Decimal>,
    pub position_price: Decimal,
    pub start_trailing_unit: Decimal,
    pub end_trailing_unit: Decimal,
    pub safety_net_detector_unit: Decimal,
    pub direction: Option<Direction>,
}

fn field(name: &'static str, amount: &RawAmount) -> EngineResult<Decimal> {
    amount
        .to_decimal()
        .map_err(|source| EngineError::InvalidField { field: name, source })
}

impl RawTrailingRequest {
    /// Convert every amount; fails on the first unreadable one.
    pub(crate) fn parse(&self) -> EngineResult<ParsedRequest> {
        let price_history = RawAmount::to_decimals(&self.price_history).map_err(|source| {
            EngineError::InvalidField {
                field: "price_history",
                source,
            }
        })?;

        Ok(ParsedRequest {
            price_history,
            position_price: field("position_price", &self.position_price)?,
            start_trailing_unit: field("start_trailing_unit", &self.start_trailing_unit)?,
            end_trailing_unit: field("end_trailing_unit", &self.end_trailing_unit)?,
            safety_net_detector_unit: field(
                "safety_net_detector_unit",
                &self.safety_net_detector_unit,
            )?,
            direction: self.direction.parse().ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw(direction: &str) -> RawTrailingRequest {
        RawTrailingRequest {
            price_history: vec![RawAmount::Int(1), RawAmount::Float(1.1), RawAmount::from("1.045")],
            position_price: RawAmount::Int(1),
            start_trailing_unit: RawAmount::Float(0.1),
            end_trailing_unit: RawAmount::Float(0.05),
            safety_net_detector_unit: RawAmount::Float(0.03),
            direction: direction.to_string(),
        }
    }

    #[test]
    fn test_parse_converts_every_amount() {
        let parsed = raw("UP").parse().unwrap();
        assert_eq!(parsed.price_history, vec![dec!(1), dec!(1.1), dec!(1.045)]);
        assert_eq!(parsed.start_trailing_unit, dec!(0.1));
        assert_eq!(parsed.direction, Some(Direction::Up));
    }

    #[test]
    fn test_bad_direction_is_not_a_parse_error() {
        let parsed = raw("UPY").parse().unwrap();
        assert_eq!(parsed.direction, None);
    }

    #[test]
    fn test_bad_amount_names_the_field() {
        let mut request = raw("UP");
        request.end_trailing_unit = RawAmount::from("five percent");

        let err = request.parse().unwrap_err();
        assert!(matches!(err, EngineError::InvalidField { field: "end_trailing_unit", .. }));
    }

    #[test]
    fn test_raw_request_from_json() {
        let json = r#"{
            "price_history": [1, "1.1", 1.046],
            "position_price": 1,
            "start_trailing_unit": 0.1,
            "end_trailing_unit": "0.05",
            "safety_net_detector_unit": 0.03,
            "direction": "UP"
        }"#;
        let request: RawTrailingRequest = serde_json::from_str(json).unwrap();
        let parsed = request.parse().unwrap();
        assert_eq!(parsed.price_history, vec![dec!(1), dec!(1.1), dec!(1.046)]);
        assert_eq!(parsed.end_trailing_unit, dec!(0.05));
    }
}
