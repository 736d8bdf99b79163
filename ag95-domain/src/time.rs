//! Time helpers
//!
//! Human readable durations and a stopwatch around a closure.

use std::time::{Duration, Instant};

const INTERVALS: [(&str, u64); 5] = [
    ("weeks", 604_800),
    ("days", 86_400),
    ("hours", 3_600),
    ("minutes", 60),
    ("seconds", 1),
];

/// Format a number of seconds as e.g. `"2 hours, 1 minute"`.
///
/// Only non-zero parts are listed, largest first, and at most `granularity`
/// of them. A part equal to one uses the singular name. Zero seconds yields an
/// empty string.
///
/// # Examples
/// ```
/// # use ag95_domain::time::format_from_seconds;
/// assert_eq!(format_from_seconds(7_260, 2), "2 hours, 1 minute");
/// assert_eq!(format_from_seconds(60, 2), "1 minute");
/// ```
pub fn format_from_seconds(seconds: u64, granularity: usize) -> String {
    let mut remaining = seconds;
    let mut parts = Vec::new();

    for (name, count) in INTERVALS {
        let value = remaining / count;
        if value == 0 {
            continue;
        }
        remaining -= value * count;

        let name = if value == 1 { name.trim_end_matches('s') } else { name };
        parts.push(format!("{} {}", value, name));
    }

    parts.truncate(granularity);
    parts.join(", ")
}

/// [`format_from_seconds`] for a `Duration`; sub-second precision is dropped.
pub fn format_duration(duration: Duration, granularity: usize) -> String {
    format_from_seconds(duration.as_secs(), granularity)
}

// =============================================================================
// Stopwatch
// =============================================================================

/// Output of [`timed`]: the closure's value and the wall time it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    /// Value returned by the closure
    pub value: T,
    /// Elapsed wall time
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in fractional seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl<T, E> Timed<Result<T, E>> {
    /// Split a timed `Result` so the error can be propagated with `?` while
    /// keeping the measurement on success.
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

/// Run `f` and record how long it took.
///
/// Fallible work returns a `Result` from the closure; the caller decides
/// whether to propagate it (see [`Timed::transpose`]).
pub fn timed<T, F>(f: F) -> Timed<T>
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_seconds() {
        assert_eq!(format_from_seconds(60, 2), "1 minute");
        assert_eq!(format_from_seconds(60 * 2, 2), "2 minutes");
        assert_eq!(format_from_seconds(60 * 60, 2), "1 hour");
        assert_eq!(format_from_seconds(60 * 60 * 2, 2), "2 hours");
        assert_eq!(format_from_seconds(60 * 60 * 2 + 60, 2), "2 hours, 1 minute");
    }

    #[test]
    fn test_granularity_cuts_smaller_parts() {
        let seconds = 604_800 + 86_400 * 2 + 3_600 + 5;
        assert_eq!(format_from_seconds(seconds, 2), "1 week, 2 days");
        assert_eq!(format_from_seconds(seconds, 5), "1 week, 2 days, 1 hour, 5 seconds");
        assert_eq!(format_from_seconds(seconds, 0), "");
    }

    #[test]
    fn test_zero_seconds_is_empty() {
        assert_eq!(format_from_seconds(0, 2), "");
    }

    #[test]
    fn test_format_duration_drops_subseconds() {
        assert_eq!(format_duration(Duration::from_millis(61_900), 2), "1 minute, 1 second");
    }

    #[test]
    fn test_timed_returns_value() {
        let result = timed(|| 10 / 2);
        assert_eq!(result.value, 5);
        assert!(result.elapsed_secs() >= 0.0);
    }

    #[test]
    fn test_timed_transpose() {
        let ok: Timed<Result<u32, String>> = timed(|| Ok(3));
        assert_eq!(ok.transpose().unwrap().value, 3);

        let err: Timed<Result<u32, String>> = timed(|| Err("division by zero".to_string()));
        assert_eq!(err.transpose().unwrap_err(), "division by zero");
    }
}
