//! Number Helpers
//!
//! Decimal-place counting and truncating normalisation of number text.
//! Normalisation never rounds: extra decimals are cut, trailing zeros and a
//! dangling separator are removed. Both `.` and `,` are accepted as the
//! decimal separator, but not in the same number.

use rust_decimal::Decimal;

use crate::value_objects::DomainError;

/// Number of significant decimal places once trailing zeros are removed.
///
/// # Examples
/// ```
/// # use ag95_domain::numbers::decimal_places;
/// # use rust_decimal_macros::dec;
/// assert_eq!(decimal_places(dec!(1.10)), 1);
/// assert_eq!(decimal_places(dec!(-4.56000)), 2);
/// assert_eq!(decimal_places(dec!(5464)), 0);
/// ```
pub fn decimal_places(value: Decimal) -> u32 {
    value.normalize().scale()
}

/// Normalise number text, optionally truncating to `max_decimals`.
///
/// `None` keeps every significant decimal. The separator found in the input
/// is kept in the output.
///
/// # Errors
/// Returns `DomainError::InvalidNumber` when the text contains both `.` and `,`.
///
/// # Examples
/// ```
/// # use ag95_domain::numbers::normalise_number;
/// assert_eq!(normalise_number("34.2345", Some(2)).unwrap(), "34.23");
/// assert_eq!(normalise_number("34,2000", None).unwrap(), "34,2");
/// assert!(normalise_number("34,2345.7", Some(2)).is_err());
/// ```
pub fn normalise_number(raw: &str, max_decimals: Option<usize>) -> Result<String, DomainError> {
    let trimmed = strip_insignificant(raw);

    let separator = match (trimmed.contains('.'), trimmed.contains(',')) {
        (false, false) => return Ok(trimmed.to_string()),
        (true, false) => '.',
        (false, true) => ',',
        (true, true) => {
            return Err(DomainError::InvalidNumber(format!(
                "Mixed decimal separators in {}",
                raw
            )))
        },
    };

    let Some((whole, decimals)) = trimmed.split_once(separator) else {
        return Ok(trimmed.to_string());
    };

    let kept: String = match max_decimals {
        Some(limit) => decimals.chars().take(limit).collect(),
        None => decimals.to_string(),
    };

    let joined = format!("{}{}{}", whole, separator, kept);
    Ok(strip_insignificant(&joined).to_string())
}

/// Normalise a decimal value; see [`normalise_number`].
pub fn normalise_decimal(value: Decimal, max_decimals: Option<usize>) -> String {
    let text = value.to_string();
    // Decimal's Display only ever emits '.'
    normalise_number(&text, max_decimals).unwrap_or(text)
}

/// Add one unit in the `max_decimals`-th place, then truncate to it.
///
/// ```
/// # use ag95_domain::numbers::round_up_closer;
/// # use rust_decimal_macros::dec;
/// assert_eq!(round_up_closer(dec!(34.2345), 2), "34.24");
/// ```
pub fn round_up_closer(value: Decimal, max_decimals: u32) -> String {
    let step = place_unit(max_decimals);
    normalise_decimal((value + step).normalize(), Some(max_decimals as usize))
}

/// Subtract one unit in the `max_decimals`-th place, then truncate to it.
pub fn round_down_closer(value: Decimal, max_decimals: u32) -> String {
    let step = place_unit(max_decimals);
    normalise_decimal((value - step).normalize(), Some(max_decimals as usize))
}

fn place_unit(decimals: u32) -> Decimal {
    // Decimal scale tops out at 28
    Decimal::new(1, decimals.min(28))
}

/// Drop trailing zeros after a separator, then one dangling separator.
fn strip_insignificant(text: &str) -> &str {
    let mut out = text;
    if out.contains('.') || out.contains(',') {
        while out.len() > 1 && out.ends_with('0') {
            out = &out[..out.len() - 1];
        }
    }
    out.strip_suffix(['.', ','].as_slice()).unwrap_or(out)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_places() {
        let cases = [
            (dec!(1.0), 0),
            (dec!(1.00), 0),
            (dec!(0.00), 0),
            (dec!(-1.00), 0),
            (dec!(5464), 0),
            (dec!(1.1), 1),
            (dec!(1.114), 3),
            (dec!(-4.56), 2),
            (dec!(1.11400), 3),
            (dec!(0.1456), 4),
        ];

        for (value, expected) in cases {
            assert_eq!(decimal_places(value), expected, "value {}", value);
        }
    }

    #[test]
    fn test_normalise_with_truncation() {
        let cases = [
            ("34.2345", Some(2), "34.23"),
            ("34.2", Some(1), "34.2"),
            ("34", Some(1), "34"),
            ("34", Some(5), "34"),
            ("34.0", Some(1), "34"),
            ("34.0", Some(5), "34"),
            ("34.2345", Some(0), "34"),
            ("43234.23231450000", Some(0), "43234"),
            ("34.5345", Some(0), "34"),
            ("43234.73231450000", Some(0), "43234"),
        ];

        for (raw, decimals, expected) in cases {
            assert_eq!(normalise_number(raw, decimals).unwrap(), expected, "input {}", raw);
        }
    }

    #[test]
    fn test_normalise_without_truncation() {
        assert_eq!(normalise_number("1.0", None).unwrap(), "1");
        assert_eq!(normalise_number("-1.0", None).unwrap(), "-1");
        assert_eq!(normalise_number("34.2345", None).unwrap(), "34.2345");
        assert_eq!(normalise_number("43234.23231450000", None).unwrap(), "43234.2323145");
        // No separator: zeros are significant
        assert_eq!(normalise_number("3400", None).unwrap(), "3400");
    }

    #[test]
    fn test_normalise_comma_separator() {
        let cases = [
            ("34,2345", Some(2), "34,23"),
            ("34,2", Some(1), "34,2"),
            ("34,", Some(1), "34"),
            ("34,0", Some(1), "34"),
            ("34,2345", Some(0), "34"),
            ("43234,23231450000", Some(0), "43234"),
        ];

        for (raw, decimals, expected) in cases {
            assert_eq!(normalise_number(raw, decimals).unwrap(), expected, "input {}", raw);
        }
    }

    #[test]
    fn test_normalise_rejects_mixed_separators() {
        assert!(matches!(
            normalise_number("34,2345.7", Some(2)),
            Err(DomainError::InvalidNumber(_))
        ));
        assert!(normalise_number("34,.2", Some(1)).is_err());
    }

    #[test]
    fn test_normalise_decimal() {
        assert_eq!(normalise_decimal(dec!(34.0), Some(1)), "34");
        assert_eq!(normalise_decimal(dec!(34.2345), Some(0)), "34");
        assert_eq!(normalise_decimal(dec!(43234.23231450000), None), "43234.2323145");
    }

    #[test]
    fn test_round_up_closer() {
        assert_eq!(round_up_closer(dec!(34.2345), 4), "34.2346");
        assert_eq!(round_up_closer(dec!(34.0000), 4), "34.0001");
        assert_eq!(round_up_closer(dec!(34.2345), 2), "34.24");
        assert_eq!(round_up_closer(dec!(34.0000), 2), "34.01");
    }

    #[test]
    fn test_round_down_closer() {
        assert_eq!(round_down_closer(dec!(34.2345), 4), "34.2344");
        assert_eq!(round_down_closer(dec!(34.0000), 4), "33.9999");
        assert_eq!(round_down_closer(dec!(34.2345), 2), "34.22");
        assert_eq!(round_down_closer(dec!(34.0000), 2), "33.99");
    }
}
