//! Type definitions and constants for week calendar rendering.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use clap::ValueEnum;

/// A point in time, independent of any time zone.
pub type Instant = DateTime<Utc>;

/// When to emit ANSI styling sequences.
#[derive(Debug, Clone, Copy, PartialEq, Default, ValueEnum)]
pub enum ColorMode {
    /// Style output only when stdout is a terminal.
    #[default]
    Auto,
    /// Always style output.
    Always,
    /// Never style output.
    Never,
}

/// A local calendar date.
///
/// Equality compares year, month and day only; the weekday is derived.
#[derive(Debug, Clone, Copy)]
pub struct CalendarDate {
    pub year: i32,
    /// Month of the year, 1-12.
    pub month: u32,
    pub day: u32,
    pub weekday: Weekday,
}

impl CalendarDate {
    pub fn from_naive(date: NaiveDate) -> Self {
        CalendarDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday(),
        }
    }

    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn is_same_day(&self, other: &CalendarDate) -> bool {
        self.year == other.year && self.month == other.month && self.day == other.day
    }
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_day(other)
    }
}

impl Eq for CalendarDate {}

/// Seven consecutive calendar dates rendered as one output line.
#[derive(Debug, Clone)]
pub struct WeekWindow {
    pub days: [CalendarDate; DAYS_PER_WEEK],
}

impl WeekWindow {
    pub fn first(&self) -> &CalendarDate {
        &self.days[0]
    }

    /// Month entered partway through the week, if any.
    pub fn month_change(&self) -> Option<u32> {
        self.days
            .windows(2)
            .rev()
            .find(|pair| pair[0].month != pair[1].month)
            .map(|pair| pair[1].month)
    }
}

/// Number of weeks shown around the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub weeks_before: u32,
    pub weeks_after: u32,
}

/// Rendering context fixed once per run.
#[derive(Clone, Debug)]
pub struct CalContext {
    pub config: RenderConfig,
    /// Whether to use ANSI styling in output.
    pub color: bool,
    /// The instant the run started, sampled once.
    pub now: Instant,
    /// Today's local date, derived from `now`.
    pub today: CalendarDate,
}

pub const DAYS_PER_WEEK: usize = 7;
pub const MAX_WEEKS: i64 = 52;
pub const DEFAULT_WEEKS_BEFORE: i64 = 2;
pub const DEFAULT_WEEKS_AFTER: i64 = 4;

// Month label column, also used to indent the weekday header
pub const MONTH_LABEL_WIDTH: usize = 4;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Sunday first
pub const WEEKDAY_ABBREVIATIONS: [&str; DAYS_PER_WEEK] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_BOLD: &str = "\x1b[1m";
pub const COLOR_BG_YELLOW: &str = "\x1b[43m";
pub const COLOR_DARK_GREY: &str = "\x1b[90m";
