//! Error type shared by argument handling, calendar arithmetic and output.

use thiserror::Error;

use crate::types::{Instant, MAX_WEEKS};

#[derive(Debug, Error)]
pub enum CalError {
    #[error("Unknown option: {0}\nTry 'weekcal --help' for more information.")]
    UnknownOption(String),

    #[error("{option} must be in range [0, {max}], got {value}", max = MAX_WEEKS)]
    WeeksOutOfRange { option: &'static str, value: i64 },

    #[error("{0}")]
    InvalidArgument(String),

    /// The instant has no representation in the local time zone.
    #[error("cannot resolve local time for {0}")]
    LocalTime(Instant),

    #[error("date out of range: year {year}, month {month}, day {day}")]
    DateOutOfRange { year: i32, month: u32, day: i64 },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
