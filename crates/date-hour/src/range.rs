//! Time ranges built from two [`DateHour`] boundaries.
//!
//! A [`TimeRange`] pairs a start and a stop period and counts the whole
//! hours it spans, inclusive of both endpoints. A single self-sufficient
//! period expands to its own boundaries: `TimeRange::parse("2024")` covers
//! every hour of the year.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DateHourError, Result};
use crate::period::DateHour;

/// An ordered pair of periods with an inclusive hour count.
///
/// # Examples
///
/// ```
/// use date_hour::TimeRange;
///
/// let day = TimeRange::parse("2024-01-15").unwrap();
/// assert_eq!(day.len_hours().unwrap(), 24);
///
/// let shift = TimeRange::parse_bounds("2024-01-15 10:00:00", "2024-01-15 14:00:00").unwrap();
/// assert_eq!(shift.len_hours().unwrap(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateHour,
    pub stop: DateHour,
}

impl TimeRange {
    /// A range with explicit bounds. The granularities of both periods are
    /// kept as supplied; no relationship between them is required.
    pub fn new(start: DateHour, stop: DateHour) -> Self {
        Self { start, stop }
    }

    /// Expand a self-sufficient period to its own boundaries.
    ///
    /// The stop is re-derived from the start period's stop boundary and so
    /// collapses to `Hour` granularity.
    pub fn from_period(start: DateHour) -> Self {
        let stop = DateHour::from(start.stop());
        Self { start, stop }
    }

    /// Parse a single period text and expand it to its own boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`DateHourError::Format`] when the text is not a valid period.
    pub fn parse(start: &str) -> Result<Self> {
        Ok(Self::from_period(DateHour::parse(start)?))
    }

    /// Parse explicit start and stop texts.
    ///
    /// # Errors
    ///
    /// Returns [`DateHourError::Format`] when either text is not a valid
    /// period.
    pub fn parse_bounds(start: &str, stop: &str) -> Result<Self> {
        Ok(Self::new(DateHour::parse(start)?, DateHour::parse(stop)?))
    }

    /// Whole hours between the boundaries, inclusive of both endpoints: a
    /// single-hour range has length 1, a day 24, a leap year 8784.
    ///
    /// # Errors
    ///
    /// Returns [`DateHourError::ReversedRange`] when the stop instant
    /// precedes the start instant.
    pub fn len_hours(&self) -> Result<i64> {
        if self.stop.instant() < self.start.instant() {
            return Err(DateHourError::ReversedRange {
                start: self.start.to_string(),
                stop: self.stop.to_string(),
            });
        }
        Ok((self.stop.instant() - self.start.instant()).num_hours() + 1)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.stop)
    }
}

// Serializes to a { start, stop } object of canonical texts.
impl Serialize for TimeRange {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("TimeRange", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("stop", &self.stop)?;
        s.end()
    }
}

// Accepts either a single period text (expanded to its own boundaries) or a
// { start, stop } object; a missing stop also triggers expansion.
impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Period(DateHour),
            Bounds {
                start: DateHour,
                stop: Option<DateHour>,
            },
        }

        match Raw::deserialize(deserializer)? {
            Raw::Period(start) => Ok(TimeRange::from_period(start)),
            Raw::Bounds {
                start,
                stop: Some(stop),
            } => Ok(TimeRange::new(start, stop)),
            Raw::Bounds { start, stop: None } => Ok(TimeRange::from_period(start)),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
