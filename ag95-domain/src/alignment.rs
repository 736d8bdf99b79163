//! Datetime List Alignment
//!
//! Aligns N independently timestamped series onto shared reference
//! timestamps.
//!
//! # Matching rule
//!
//! ```text
//! references = unique(all timestamps of all series)
//! for r in references:
//!     for each series i:
//!         match_i = earliest entry with r - dev <= at <= r + dev
//!     emit r only if every series produced a match
//! ```
//!
//! Each series is sorted once (stable, so equal timestamps keep input order)
//! and the earliest in-tolerance entry is found with a binary search.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::DomainError;

/// A value observed at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    /// Observation time
    pub at: DateTime<Utc>,
    /// Observed value
    pub value: T,
}

impl<T> Stamped<T> {
    /// Create a new stamped value.
    pub fn new(at: DateTime<Utc>, value: T) -> Self {
        Self { at, value }
    }
}

/// Order of the emitted rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    /// Oldest reference first
    #[default]
    Asc,
    /// Newest reference first
    Desc,
    /// First-seen order, series by series
    Discovery,
}

/// Alignment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignOptions {
    /// Inclusive tolerance on both sides of a reference timestamp
    pub max_deviation: Duration,
    /// Row ordering
    pub order: SortOrder,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            max_deviation: Duration::milliseconds(50),
            order: SortOrder::Asc,
        }
    }
}

impl AlignOptions {
    /// Default options with a different tolerance in milliseconds.
    pub fn with_deviation_ms(ms: i64) -> Self {
        Self {
            max_deviation: Duration::milliseconds(ms),
            ..Self::default()
        }
    }

    /// Same options, different ordering.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

/// One aligned reference timestamp.
///
/// `values[i]` comes from series `i`. `total` is the per-row hook output of
/// [`align_with`], `()` for [`align`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow<T, A = ()> {
    /// Reference timestamp
    pub at: DateTime<Utc>,
    /// One matched value per series
    pub values: Vec<T>,
    /// Row hook output
    pub total: A,
}

/// Align series without hooks; matched values are cloned.
///
/// # Errors
/// Returns `DomainError::InvalidDeviation` for a negative or out-of-range
/// tolerance.
pub fn align<T: Clone>(
    series: &[Vec<Stamped<T>>],
    options: &AlignOptions,
) -> Result<Vec<AlignedRow<T>>, DomainError> {
    align_with(series, options, T::clone, |_| ())
}

/// Align series, mapping each matched value with `step` and each complete
/// row with `total`.
///
/// `step` only runs for series that matched; `total` only runs for rows that
/// are emitted.
///
/// # Errors
/// Returns `DomainError::InvalidDeviation` for a negative tolerance, or one so
/// large that the window around a reference leaves the datetime range.
pub fn align_with<T, U, A, S, G>(
    series: &[Vec<Stamped<T>>],
    options: &AlignOptions,
    mut step: S,
    mut total: G,
) -> Result<Vec<AlignedRow<U, A>>, DomainError>
where
    S: FnMut(&T) -> U,
    G: FnMut(&[U]) -> A,
{
    if options.max_deviation < Duration::zero() {
        return Err(DomainError::InvalidDeviation(format!(
            "max deviation must not be negative, got {} ms",
            options.max_deviation.num_milliseconds()
        )));
    }

    let sorted: Vec<Vec<&Stamped<T>>> = series
        .iter()
        .map(|entries| {
            let mut refs: Vec<&Stamped<T>> = entries.iter().collect();
            refs.sort_by_key(|entry| entry.at);
            refs
        })
        .collect();

    let references = reference_timestamps(series, options.order);
    let mut rows = Vec::new();

    for reference in references {
        let (Some(low), Some(high)) = (
            reference.checked_sub_signed(options.max_deviation),
            reference.checked_add_signed(options.max_deviation),
        ) else {
            return Err(DomainError::InvalidDeviation(format!(
                "max deviation of {} s around {} leaves the datetime range",
                options.max_deviation.num_seconds(),
                reference
            )));
        };

        let matched: Option<Vec<&Stamped<T>>> = sorted
            .iter()
            .map(|entries| earliest_within(entries, low, high))
            .collect();

        // Strict AND: a single missing series drops the reference
        let Some(matched) = matched else {
            continue;
        };

        let values: Vec<U> = matched.iter().map(|entry| step(&entry.value)).collect();
        let row_total = total(&values);
        rows.push(AlignedRow {
            at: reference,
            values,
            total: row_total,
        });
    }

    Ok(rows)
}

fn reference_timestamps<T>(series: &[Vec<Stamped<T>>], order: SortOrder) -> Vec<DateTime<Utc>> {
    let mut seen = HashSet::new();
    let mut references: Vec<DateTime<Utc>> = series
        .iter()
        .flatten()
        .map(|entry| entry.at)
        .filter(|at| seen.insert(*at))
        .collect();

    match order {
        SortOrder::Asc => references.sort(),
        SortOrder::Desc => references.sort_by(|a, b| b.cmp(a)),
        SortOrder::Discovery => {},
    }

    references
}

/// First entry (sorted by time) inside `[low, high]`.
fn earliest_within<'a, T>(
    entries: &[&'a Stamped<T>],
    low: DateTime<Utc>,
    high: DateTime<Utc>,
) -> Option<&'a Stamped<T>> {
    let index = entries.partition_point(|entry| entry.at < low);
    entries.get(index).copied().filter(|entry| entry.at <= high)
}

// =============================================================================
// Tests
// =============================================================================
