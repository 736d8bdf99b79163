//! Value Objects for the ag95 Domain
//!
//! Immutable, validated domain primitives.
//! Every amount that reaches the engine passes through [`RawAmount`], which
//! converts to `Decimal` via text so no binary float expansion leaks in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain errors for value object validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Amount could not be converted to an exact decimal
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Unit fraction must be positive
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    /// Direction tag must be UP or DOWN
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    /// Number text could not be normalised
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Alignment deviation must not be negative
    #[error("Invalid deviation: {0}")]
    InvalidDeviation(String),

    /// Interpolation range is empty or not finite
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Arithmetic result outside the decimal range
    #[error("Overflow: {0}")]
    Overflow(String),
}

// =============================================================================
// RawAmount
// =============================================================================

/// A decimal-convertible input value: text, integer or float.
///
/// Conversion always goes through the textual form. A float is rendered with
/// its shortest round-trip representation (`1.1_f64` becomes `"1.1"`) and then
/// parsed, so `0.1 + 0.2` style artifacts never reach the arithmetic.
///
/// # Examples
/// ```
/// # use ag95_domain::value_objects::RawAmount;
/// # use rust_decimal_macros::dec;
/// assert_eq!(RawAmount::Float(1.1).to_decimal().unwrap(), dec!(1.1));
/// assert_eq!(RawAmount::from("0.85169464").to_decimal().unwrap(), dec!(0.85169464));
/// assert!(RawAmount::from("abc").to_decimal().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// Whole number
    Int(i64),
    /// Binary float, converted through its shortest round-trip text
    Float(f64),
    /// Decimal text, e.g. `"1.0451"` or `"1E-3"`
    Text(String),
}

impl RawAmount {
    /// Convert to an exact decimal.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidAmount` for unparseable text, NaN,
    /// infinities and values outside the decimal range.
    pub fn to_decimal(&self) -> Result<Decimal, DomainError> {
        match self {
            RawAmount::Int(value) => Ok(Decimal::from(*value)),
            RawAmount::Float(value) => {
                if !value.is_finite() {
                    return Err(DomainError::InvalidAmount(format!(
                        "Non-finite float: {}",
                        value
                    )));
                }
                parse_decimal_text(&value.to_string())
            },
            RawAmount::Text(text) => parse_decimal_text(text),
        }
    }

    /// Convert a whole slice, failing on the first bad entry.
    pub fn to_decimals(amounts: &[RawAmount]) -> Result<Vec<Decimal>, DomainError> {
        amounts.iter().map(RawAmount::to_decimal).collect()
    }
}

fn parse_decimal_text(text: &str) -> Result<Decimal, DomainError> {
    let trimmed = text.trim();
    let parsed = if trimmed.contains(|c: char| c == 'e' || c == 'E') {
        Decimal::from_scientific(trimmed)
    } else {
        Decimal::from_str(trimmed)
    };

    parsed.map_err(|e| DomainError::InvalidAmount(format!("Cannot parse '{}': {}", text, e)))
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        RawAmount::Text(value)
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        RawAmount::Int(value)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Float(value)
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawAmount::Int(value) => write!(f, "{}", value),
            RawAmount::Float(value) => write!(f, "{}", value),
            RawAmount::Text(value) => write!(f, "{}", value),
        }
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Trailing direction
///
/// `Up` trails a rally (e.g. deciding an exit), `Down` trails a drop
/// (e.g. deciding an entry). The two are mirror images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Rising thresholds, follow the running peak
    #[serde(rename = "UP")]
    Up,
    /// Falling thresholds, follow the running trough
    #[serde(rename = "DOWN")]
    Down,
}

impl Direction {
    /// Tag used on the wire and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }

    /// True when `price` is at or beyond `limit` in this direction
    /// (`>=` for Up, `<=` for Down).
    pub fn reached(&self, price: Decimal, limit: Decimal) -> bool {
        match self {
            Direction::Up => price >= limit,
            Direction::Down => price <= limit,
        }
    }

    /// True when `price` has retraced to or past `limit` against this
    /// direction (`<=` for Up, `>=` for Down).
    pub fn retraced(&self, price: Decimal, limit: Decimal) -> bool {
        match self {
            Direction::Up => price <= limit,
            Direction::Down => price >= limit,
        }
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    /// Tags are exact and case-sensitive: `"UP"` or `"DOWN"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            other => Err(DomainError::InvalidDirection(format!(
                "Expected UP or DOWN, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Unit
// =============================================================================

/// A strictly positive fractional unit (0.1 = 10%)
///
/// # Invariants
/// - Must be > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Unit(Decimal);

impl Unit {
    /// Create a new Unit with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidUnit` if value <= 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidUnit(format!("Unit must be positive, got {}", value)));
        }
        Ok(Self(value))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// `value × (1 + unit)`
    ///
    /// # Errors
    /// Returns `DomainError::Overflow` when the product leaves the decimal range.
    pub fn grow(&self, value: Decimal) -> Result<Decimal, DomainError> {
        Decimal::ONE
            .checked_add(self.0)
            .and_then(|factor| value.checked_mul(factor))
            .ok_or_else(|| DomainError::Overflow(format!("{} grown by {}", value, self.0)))
    }

    /// `value × (1 − unit)`
    ///
    /// # Errors
    /// Returns `DomainError::Overflow` when the product leaves the decimal range.
    pub fn shrink(&self, value: Decimal) -> Result<Decimal, DomainError> {
        Decimal::ONE
            .checked_sub(self.0)
            .and_then(|factor| value.checked_mul(factor))
            .ok_or_else(|| DomainError::Overflow(format!("{} shrunk by {}", value, self.0)))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_float_goes_through_shortest_text() {
        assert_eq!(RawAmount::Float(1.1).to_decimal().unwrap(), dec!(1.1));
        assert_eq!(RawAmount::Float(0.85169464).to_decimal().unwrap(), dec!(0.85169464));
        assert_eq!(RawAmount::Float(1.1195882008).to_decimal().unwrap(), dec!(1.1195882008));
    }

    #[test]
    fn test_int_and_text_amounts() {
        assert_eq!(RawAmount::Int(-3).to_decimal().unwrap(), dec!(-3));
        assert_eq!(RawAmount::from(" 1.0451 ").to_decimal().unwrap(), dec!(1.0451));
        assert_eq!(RawAmount::from("1E-3").to_decimal().unwrap(), dec!(0.001));
    }

    #[test]
    fn test_invalid_amounts_fail_fast() {
        assert!(matches!(
            RawAmount::from("1,5").to_decimal(),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(RawAmount::Float(f64::NAN).to_decimal().is_err());
        assert!(RawAmount::Float(f64::INFINITY).to_decimal().is_err());
        assert!(RawAmount::from("").to_decimal().is_err());
    }

    #[test]
    fn test_to_decimals_stops_on_first_error() {
        let amounts = vec![RawAmount::Int(1), RawAmount::from("x"), RawAmount::Float(1.1)];
        assert!(RawAmount::to_decimals(&amounts).is_err());

        let amounts = vec![RawAmount::Int(1), RawAmount::Float(1.1)];
        assert_eq!(RawAmount::to_decimals(&amounts).unwrap(), vec![dec!(1), dec!(1.1)]);
    }

    #[test]
    fn test_raw_amount_deserializes_numbers_and_strings() {
        let amounts: Vec<RawAmount> = serde_json::from_str(r#"[1, 1.1, "0.826888"]"#).unwrap();
        assert_eq!(
            amounts,
            vec![RawAmount::Int(1), RawAmount::Float(1.1), RawAmount::from("0.826888")]
        );
    }

    #[test]
    fn test_direction_parsing_is_exact() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("DOWN".parse::<Direction>().unwrap(), Direction::Down);
        assert!("UPY".parse::<Direction>().is_err());
        assert!("DOWNL".parse::<Direction>().is_err());
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_comparisons_mirror() {
        // Reaching is inclusive on both sides
        assert!(Direction::Up.reached(dec!(1.1), dec!(1.1)));
        assert!(!Direction::Up.reached(dec!(1.09), dec!(1.1)));
        assert!(Direction::Down.reached(dec!(0.9), dec!(0.9)));
        assert!(!Direction::Down.reached(dec!(0.91), dec!(0.9)));

        assert!(Direction::Up.retraced(dec!(1.045), dec!(1.045)));
        assert!(!Direction::Up.retraced(dec!(1.046), dec!(1.045)));
        assert!(Direction::Down.retraced(dec!(0.945), dec!(0.945)));
        assert!(!Direction::Down.retraced(dec!(0.9449), dec!(0.945)));
    }

    #[test]
    fn test_direction_serde_tags() {
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"UP\"");
        let down: Direction = serde_json::from_str("\"DOWN\"").unwrap();
        assert_eq!(down, Direction::Down);
    }

    #[test]
    fn test_unit_must_be_positive() {
        assert!(Unit::new(dec!(0.1)).is_ok());
        assert!(matches!(Unit::new(dec!(0)), Err(DomainError::InvalidUnit(_))));
        assert!(Unit::new(dec!(-0.05)).is_err());
    }

    #[test]
    fn test_unit_grow_and_shrink_are_exact() {
        let unit = Unit::new(dec!(0.05)).unwrap();
        assert_eq!(unit.shrink(dec!(1.1)).unwrap(), dec!(1.045));
        assert_eq!(unit.grow(dec!(0.9)).unwrap(), dec!(0.945));
    }

    #[test]
    fn test_unit_grow_overflow_is_an_error() {
        let unit = Unit::new(dec!(1)).unwrap();
        assert!(matches!(unit.grow(Decimal::MAX), Err(DomainError::Overflow(_))));
        assert!(matches!(
            unit.grow(dec!(50000000000000000000000000000)),
            Err(DomainError::Overflow(_))
        ));

        // Large unit: 1 - u stays in range, the product does not
        let unit = Unit::new(dec!(3)).unwrap();
        assert!(matches!(unit.shrink(Decimal::MAX), Err(DomainError::Overflow(_))));
        assert_eq!(unit.shrink(dec!(1)).unwrap(), dec!(-2));
    }
}
