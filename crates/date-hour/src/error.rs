//! Error types for date-hour operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateHourError {
    /// Input text matched none of the recognized shapes, or named an
    /// impossible calendar date (month 13, February 30, hour 24, ...).
    #[error("cannot parse date-hour '{input}'; supported shapes: {}", .supported.join(", "))]
    Format {
        input: String,
        supported: &'static [&'static str],
    },

    /// A range whose stop boundary precedes its start has no meaningful
    /// inclusive hour count.
    #[error("range stop '{stop}' precedes start '{start}'")]
    ReversedRange { start: String, stop: String },
}

pub type Result<T> = std::result::Result<T, DateHourError>;
