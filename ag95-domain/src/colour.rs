//! Red/green colour interpolation over a value range.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::DomainError;

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Rgb {
    /// `#RRGGBB`, upper-case hex
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Interpolate from green (at `min`) to red (at `max`).
///
/// `value` is clamped into the range first. Channels are truncated, not
/// rounded.
///
/// # Errors
/// Returns `DomainError::InvalidRange` when `min >= max` or a bound is not finite.
///
/// # Examples
/// ```
/// # use ag95_domain::colour::red_green;
/// assert_eq!(red_green(0.0, 0.0, 100.0).unwrap().to_hex(), "#00FF00");
/// assert_eq!(red_green(150.0, 0.0, 100.0).unwrap().to_hex(), "#FF0000");
/// ```
pub fn red_green(value: f64, min: f64, max: f64) -> Result<Rgb, DomainError> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(DomainError::InvalidRange(format!("[{}, {}]", min, max)));
    }

    let clamped = value.clamp(min, max);
    let ratio = (clamped - min) / (max - min);

    Ok(Rgb {
        red: (ratio * 255.0) as u8,
        green: ((1.0 - ratio) * 255.0) as u8,
        blue: 0,
    })
}
