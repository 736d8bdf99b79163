//! ag95 Domain Layer
//!
//! Pure helpers with zero I/O dependencies.
//! Contains the value objects used by the trailing engine, exact-decimal
//! ingestion, number/text/time/colour helpers and the datetime list aligner.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod alignment;
pub mod colour;
pub mod numbers;
pub mod text;
pub mod time;
pub mod value_objects;

// Re-export commonly used types
pub use alignment::{align, align_with, AlignOptions, AlignedRow, SortOrder, Stamped};
pub use colour::{red_green, Rgb};
pub use numbers::{
    decimal_places, normalise_decimal, normalise_number, round_down_closer, round_up_closer,
};
pub use text::shorten;
pub use time::{format_duration, format_from_seconds, timed, Timed};
pub use value_objects::{Direction, DomainError, RawAmount, Unit};
