//! Week-oriented calendar display centered on the current week.
//!
//! Features:
//! - Configurable number of weeks before and after the current one
//! - Today highlighted, month changes labelled inline
//! - Calendar-day arithmetic that stays correct across DST transitions

pub mod args;
pub mod calendar;
pub mod error;
pub mod formatter;
pub mod types;
