//! # date-hour
//!
//! Hour-granular calendar periods and ranges.
//!
//! A truncated date string — `"2024"`, `"2024-01"`, `"2024-01-15"`,
//! `"2024-01-15 14"`, or a full `"2024-01-15 14:30:45"` — parses into a
//! [`DateHour`]: an instant normalized to hour resolution plus the
//! granularity the text implied. From that, the period's inclusive start and
//! stop boundaries fall out exactly, including variable-length months and
//! leap years. A [`TimeRange`] pairs two such periods and counts the whole
//! hours it spans.
//!
//! Everything is zone-naive, immutable, and pure: no clock access, no I/O,
//! no shared state.
//!
//! ## Modules
//!
//! - [`period`] — [`DateHour`]: parsing, boundaries, hour-shift arithmetic
//! - [`range`] — [`TimeRange`]: auto-expanding ranges and inclusive hour counts
//! - [`error`] — Error types

pub mod error;
pub mod period;
pub mod range;

pub use error::DateHourError;
pub use period::{DateHour, Granularity, CANONICAL_FORMAT, SUPPORTED_SHAPES};
pub use range::TimeRange;
