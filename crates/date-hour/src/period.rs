//! Hour-granular calendar periods.
//!
//! A [`DateHour`] is a civil datetime normalized to hour resolution plus the
//! granularity implied by its input text: `"2024"` is a year-wide period,
//! `"2024-01-15 14"` a single hour. The granularity drives boundary
//! derivation ([`DateHour::start`] / [`DateHour::stop`]) and nothing else —
//! identity, ordering, and the canonical text come from the normalized
//! instant alone.
//!
//! # Design Principle
//!
//! Parsing is deterministic: each recognized shape is matched exactly and
//! anchored over the whole input, and an input matching no shape is an error
//! rather than a guess. Once a value exists, boundary and shift arithmetic
//! cannot fail.
//!
//! All values are zone-naive and use the proleptic Gregorian calendar.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DateHourError, Result};

/// Canonical text form. Minutes and seconds are always `00`.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input shapes, in match order. Listed in [`DateHourError::Format`]
/// diagnostics.
pub const SUPPORTED_SHAPES: &[&str] = &[
    "YYYY",
    "YYYY-MM",
    "YYYY-MM-DD",
    "YYYY-MM-DD HH",
    "YYYY-MM-DD HH:MM:SS",
];

/// The precision category implied by a period's input text.
///
/// A fully specified timestamp collapses to `Hour` after truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Granularity {
    Year,
    Month,
    Day,
    Hour,
}

/// A calendar period anchored at an hour-truncated instant.
///
/// Immutable after construction. Shifting produces a new value anchored at
/// the shifted hour (see [`DateHour::shift`]).
///
/// # Examples
///
/// ```
/// use date_hour::DateHour;
///
/// let month = DateHour::parse("2024-02").unwrap();
/// assert_eq!(month.start_text(), "2024-02-01 00:00:00");
/// assert_eq!(month.stop_text(), "2024-02-29 23:00:00"); // leap year
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DateHour {
    instant: NaiveDateTime,
    granularity: Granularity,
}

impl DateHour {
    /// Parse a truncated date string into a period.
    ///
    /// The five shapes in [`SUPPORTED_SHAPES`] are tried in order with
    /// first-match-wins semantics; every match is exact and anchored, so a
    /// four-digit year never claims a longer input by prefix. Minutes and
    /// seconds in the full-timestamp shape are accepted but discarded.
    ///
    /// # Errors
    ///
    /// Returns [`DateHourError::Format`] when no shape matches or the matched
    /// text names an impossible calendar date.
    ///
    /// # Examples
    ///
    /// ```
    /// use date_hour::DateHour;
    ///
    /// let hour = DateHour::parse("2024-01-15 14:59:59").unwrap();
    /// assert_eq!(hour.to_string(), "2024-01-15 14:00:00");
    /// assert!(DateHour::parse("2024-13").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let (instant, granularity) = parse_text(input)?;
        Ok(Self {
            instant: truncate_to_hour(instant),
            granularity,
        })
    }

    /// The normalized instant: minutes, seconds, and sub-seconds are zero.
    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    /// The precision category recorded at construction.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// First hour of the period.
    pub fn start(&self) -> NaiveDateTime {
        let date = self.instant.date();
        match self.granularity {
            Granularity::Year => at_hour(first_of_month(date.year(), 1), 0),
            Granularity::Month => at_hour(first_of_month(date.year(), date.month()), 0),
            Granularity::Day => at_hour(date, 0),
            Granularity::Hour => self.instant,
        }
    }

    /// Last hour of the period — never the last second; the whole system is
    /// hour-granular.
    pub fn stop(&self) -> NaiveDateTime {
        let date = self.instant.date();
        match self.granularity {
            Granularity::Year => at_hour(last_of_month(date.year(), 12), 23),
            Granularity::Month => at_hour(last_of_month(date.year(), date.month()), 23),
            Granularity::Day => at_hour(date, 23),
            Granularity::Hour => self.instant,
        }
    }

    /// [`DateHour::start`] rendered canonically.
    pub fn start_text(&self) -> String {
        self.start().format(CANONICAL_FORMAT).to_string()
    }

    /// [`DateHour::stop`] rendered canonically.
    pub fn stop_text(&self) -> String {
        self.stop().format(CANONICAL_FORMAT).to_string()
    }

    /// Shift the period's start boundary by whole hours.
    ///
    /// The result is always a fresh `Hour`-granularity period anchored at the
    /// shifted hour: shifting a year-wide period does not produce another
    /// year. Crossing day, month, or year boundaries is calendar-correct, so
    /// shifting a year's first hour by `-1` lands in the previous year's last
    /// hour.
    ///
    /// ```
    /// use date_hour::DateHour;
    ///
    /// let year = DateHour::parse("2024").unwrap();
    /// assert_eq!((year - 1).to_string(), "2023-12-31 23:00:00");
    /// ```
    pub fn shift(&self, hours: i64) -> Self {
        Self::from(self.start() + Duration::hours(hours))
    }
}

impl From<NaiveDateTime> for DateHour {
    /// A civil datetime truncates to its containing hour with `Hour`
    /// granularity. Equivalent to rendering the full timestamp and re-parsing
    /// it, minus the round trip.
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            instant: truncate_to_hour(dt),
            granularity: Granularity::Hour,
        }
    }
}

impl FromStr for DateHour {
    type Err = DateHourError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DateHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format(CANONICAL_FORMAT))
    }
}

// Identity is the normalized instant; granularity determines boundary
// derivation only. Periods parsed from "2024" and "2024-01-01 00:00:00"
// compare equal even though their stop boundaries differ.
impl PartialEq for DateHour {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for DateHour {}

impl PartialOrd for DateHour {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateHour {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Hash for DateHour {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
    }
}

impl Add<i64> for DateHour {
    type Output = DateHour;

    fn add(self, hours: i64) -> DateHour {
        self.shift(hours)
    }
}

impl Sub<i64> for DateHour {
    type Output = DateHour;

    fn sub(self, hours: i64) -> DateHour {
        self.shift(-hours)
    }
}

// Serialized as the canonical string; deserialized from any accepted shape.
// This is the whole contract with surrounding serialization frameworks.
impl Serialize for DateHour {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateHour {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ── Shape matchers ──────────────────────────────────────────────────────────

/// Try each recognized shape in order, most truncated first.
fn parse_text(input: &str) -> Result<(NaiveDateTime, Granularity)> {
    try_year(input)
        .or_else(|| try_month(input))
        .or_else(|| try_day(input))
        .or_else(|| try_hour(input))
        .or_else(|| try_timestamp(input))
        .ok_or_else(|| DateHourError::Format {
            input: input.to_string(),
            supported: SUPPORTED_SHAPES,
        })
}

/// "YYYY" → first hour of the year.
fn try_year(s: &str) -> Option<(NaiveDateTime, Granularity)> {
    let year = numeric_field(s, 4)? as i32;
    let dt = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    Some((dt, Granularity::Year))
}

/// "YYYY-MM" → first hour of the month.
fn try_month(s: &str) -> Option<(NaiveDateTime, Granularity)> {
    let (year_part, month_part) = s.split_once('-')?;
    let year = numeric_field(year_part, 4)? as i32;
    let month = numeric_field(month_part, 2)?;
    let dt = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    Some((dt, Granularity::Month))
}

/// "YYYY-MM-DD" → first hour of the day.
fn try_day(s: &str) -> Option<(NaiveDateTime, Granularity)> {
    let dt = parse_ymd(s)?.and_hms_opt(0, 0, 0)?;
    Some((dt, Granularity::Day))
}

/// "YYYY-MM-DD HH" → that hour.
fn try_hour(s: &str) -> Option<(NaiveDateTime, Granularity)> {
    let (date_part, hour_part) = s.split_once(' ')?;
    let hour = numeric_field(hour_part, 2)?;
    let dt = parse_ymd(date_part)?.and_hms_opt(hour, 0, 0)?;
    Some((dt, Granularity::Hour))
}

/// "YYYY-MM-DD HH:MM:SS" → the containing hour. Minutes and seconds are
/// validated, then discarded by the caller's truncation.
fn try_timestamp(s: &str) -> Option<(NaiveDateTime, Granularity)> {
    let (date_part, time_part) = s.split_once(' ')?;
    let mut fields = time_part.splitn(3, ':');
    let hour = numeric_field(fields.next()?, 2)?;
    let minute = numeric_field(fields.next()?, 2)?;
    let second = numeric_field(fields.next()?, 2)?;
    let dt = parse_ymd(date_part)?.and_hms_opt(hour, minute, second)?;
    Some((dt, Granularity::Hour))
}

/// An exact-width, all-ASCII-digit field. Any other length or byte rejects
/// the whole shape, which keeps every matcher anchored.
fn numeric_field(s: &str, width: usize) -> Option<u32> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// A full "YYYY-MM-DD" date with calendar validation.
fn parse_ymd(s: &str) -> Option<NaiveDate> {
    let mut parts = s.splitn(3, '-');
    let year = numeric_field(parts.next()?, 4)? as i32;
    let month = numeric_field(parts.next()?, 2)?;
    let day = numeric_field(parts.next()?, 2)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// ── Calendar helpers ────────────────────────────────────────────────────────

fn truncate_to_hour(dt: NaiveDateTime) -> NaiveDateTime {
    at_hour(dt.date(), dt.hour())
}

fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, 0, 0)
        .expect("whole hours below 24 are valid on any date")
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("parsed four-digit years stay well inside chrono's range")
}

/// Last calendar day of a month: the day before the first of the next month.
/// Handles December→January rollover and leap-year February without a
/// days-per-month table.
fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month)
        .pred_opt()
        .expect("the day before a first-of-month always exists")
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── Shape recognition ───────────────────────────────────────────────

    #[test]
    fn test_parse_year_shape() {
        let p = DateHour::parse("2024").unwrap();
        assert_eq!(p.granularity(), Granularity::Year);
        assert_eq!(p.to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_parse_month_shape() {
        let p = DateHour::parse("2024-01").unwrap();
        assert_eq!(p.granularity(), Granularity::Month);
        assert_eq!(p.to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_parse_day_shape() {
        let p = DateHour::parse("2024-01-15").unwrap();
        assert_eq!(p.granularity(), Granularity::Day);
        assert_eq!(p.to_string(), "2024-01-15 00:00:00");
    }

    #[test]
    fn test_parse_hour_shape() {
        let p = DateHour::parse("2024-01-15 14").unwrap();
        assert_eq!(p.granularity(), Granularity::Hour);
        assert_eq!(p.to_string(), "2024-01-15 14:00:00");
    }

    #[test]
    fn test_parse_full_timestamp_truncates_to_hour() {
        let p = DateHour::parse("2024-01-15 14:59:59").unwrap();
        assert_eq!(p.granularity(), Granularity::Hour);
        assert_eq!(p.to_string(), "2024-01-15 14:00:00");
    }

    #[test]
    fn test_canonical_round_trip() {
        let text = "2024-01-15 14:00:00";
        assert_eq!(DateHour::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_shapes_are_anchored() {
        // A four-digit year must not claim a longer input by prefix, and
        // loose widths or separators must not sneak through.
        for input in [
            "20240",
            "202",
            "2024-1",
            "2024-01-5",
            "2024/01/15",
            "2024-01-15 4",
            "2024-01-15 14:30",
            "2024-01-15 14:30:45:99",
            "2024-01-15T14:30:45",
            " 2024",
            "2024 ",
        ] {
            assert!(DateHour::parse(input).is_err(), "accepted: {input:?}");
        }
    }

    #[test]
    fn test_rejects_unparseable_and_impossible_dates() {
        for input in [
            "not-a-date",
            "2024-13",
            "2024-02-30",
            "2024-01-15 24",
            "2024-01-15 14:60:00",
        ] {
            let err = DateHour::parse(input).unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains(input), "got: {msg}");
            assert!(msg.contains("YYYY-MM-DD HH:MM:SS"), "got: {msg}");
        }
    }

    // ── Boundary derivation ─────────────────────────────────────────────

    #[test]
    fn test_year_boundaries() {
        let p = DateHour::parse("2024").unwrap();
        assert_eq!(p.start_text(), "2024-01-01 00:00:00");
        assert_eq!(p.stop_text(), "2024-12-31 23:00:00");
    }

    #[test]
    fn test_month_boundaries_31_days() {
        let p = DateHour::parse("2024-01").unwrap();
        assert_eq!(p.start_text(), "2024-01-01 00:00:00");
        assert_eq!(p.stop_text(), "2024-01-31 23:00:00");
    }

    #[test]
    fn test_month_boundaries_leap_february() {
        let p = DateHour::parse("2024-02").unwrap();
        assert_eq!(p.stop_text(), "2024-02-29 23:00:00");
    }

    #[test]
    fn test_month_boundaries_common_february() {
        let p = DateHour::parse("2023-02").unwrap();
        assert_eq!(p.stop_text(), "2023-02-28 23:00:00");
    }

    #[test]
    fn test_december_stop_does_not_roll_into_next_year() {
        let p = DateHour::parse("2024-12").unwrap();
        assert_eq!(p.stop_text(), "2024-12-31 23:00:00");
    }

    #[test]
    fn test_day_boundaries() {
        let p = DateHour::parse("2024-01-15").unwrap();
        assert_eq!(p.start_text(), "2024-01-15 00:00:00");
        assert_eq!(p.stop_text(), "2024-01-15 23:00:00");
    }

    #[test]
    fn test_hour_boundaries_coincide() {
        let p = DateHour::parse("2024-01-15 14").unwrap();
        assert_eq!(p.start_text(), "2024-01-15 14:00:00");
        assert_eq!(p.stop_text(), "2024-01-15 14:00:00");
    }

    // ── Shift arithmetic ────────────────────────────────────────────────

    #[test]
    fn test_subtract_from_year_start_lands_in_previous_year() {
        let p = DateHour::parse("2024").unwrap() - 1;
        assert_eq!(p.start_text(), "2023-12-31 23:00:00");
        assert_eq!(p.granularity(), Granularity::Hour);
    }

    #[test]
    fn test_add_across_year_boundary() {
        let p = DateHour::parse("2024-12-31 23").unwrap() + 1;
        assert_eq!(p.start_text(), "2025-01-01 00:00:00");
    }

    #[test]
    fn test_shift_collapses_granularity() {
        for input in ["2024", "2024-06", "2024-06-15"] {
            let shifted = DateHour::parse(input).unwrap() + 0;
            assert_eq!(shifted.granularity(), Granularity::Hour);
            assert_eq!(shifted.start(), shifted.stop());
        }
    }

    #[test]
    fn test_shift_anchors_at_period_start() {
        // Shifting a month-wide period moves from its first hour, not from
        // whatever instant the original text happened to name.
        let p = DateHour::parse("2024-02").unwrap() + 2;
        assert_eq!(p.to_string(), "2024-02-01 02:00:00");
    }

    #[test]
    fn test_shift_across_leap_day() {
        let p = DateHour::parse("2024-02-28 23").unwrap() + 1;
        assert_eq!(p.to_string(), "2024-02-29 00:00:00");
        let q = DateHour::parse("2023-02-28 23").unwrap() + 1;
        assert_eq!(q.to_string(), "2023-03-01 00:00:00");
    }

    // ── Value semantics ─────────────────────────────────────────────────

    #[test]
    fn test_equality_ignores_granularity() {
        let year = DateHour::parse("2024").unwrap();
        let hour = DateHour::parse("2024-01-01 00:00:00").unwrap();
        assert_eq!(year, hour);
        assert_ne!(year.granularity(), hour.granularity());
        assert_ne!(year.stop(), hour.stop());
    }

    #[test]
    fn test_from_naive_datetime_truncates() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 45)
            .unwrap();
        let p = DateHour::from(dt);
        assert_eq!(p.to_string(), "2024-01-15 14:00:00");
        assert_eq!(p.granularity(), Granularity::Hour);
    }

    #[test]
    fn test_ordering_follows_instant() {
        let a = DateHour::parse("2024-01-15 13").unwrap();
        let b = DateHour::parse("2024-01-15 14").unwrap();
        assert!(a < b);
    }

    // ── Serde boundary ──────────────────────────────────────────────────

    #[test]
    fn test_serialize_to_canonical_string() {
        let p = DateHour::parse("2024-02").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"2024-02-01 00:00:00\"");
    }

    #[test]
    fn test_deserialize_from_any_shape() {
        let p: DateHour = serde_json::from_str("\"2024-02\"").unwrap();
        assert_eq!(p.granularity(), Granularity::Month);
        assert_eq!(p.stop_text(), "2024-02-29 23:00:00");
    }

    #[test]
    fn test_deserialize_rejects_bad_input() {
        let result: std::result::Result<DateHour, _> = serde_json::from_str("\"2024-13\"");
        assert!(result.is_err());
    }

    // ── Properties ──────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_canonical_text_round_trips(
            year in 1i32..=9999,
            month in 1u32..=12,
            day in 1u32..=31,
            hour in 0u32..=23,
        ) {
            prop_assume!(NaiveDate::from_ymd_opt(year, month, day).is_some());
            let text = format!("{year:04}-{month:02}-{day:02} {hour:02}:00:00");
            let p = DateHour::parse(&text).unwrap();
            prop_assert_eq!(p.to_string(), text);
        }

        #[test]
        fn prop_shift_is_invertible(
            year in 1900i32..=2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..=23,
            offset in -100_000i64..=100_000,
        ) {
            let text = format!("{year:04}-{month:02}-{day:02} {hour:02}");
            let p = DateHour::parse(&text).unwrap();
            prop_assert_eq!((p + offset) - offset, p);
        }

        #[test]
        fn prop_start_never_exceeds_stop(
            year in 1i32..=9999,
            month in 1u32..=12,
        ) {
            let p = DateHour::parse(&format!("{year:04}-{month:02}")).unwrap();
            prop_assert!(p.start() <= p.stop());
        }
    }
}
