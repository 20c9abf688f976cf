//! Local calendar conversions and calendar-day week arithmetic.
//!
//! All day and week stepping goes through [`LocalCalendar::normalize`], which
//! rolls an out-of-range day of month over into later or earlier months and
//! resolves the result in the local zone, so DST transitions cannot shift a
//! date the way adding multiples of 24 hours would.

use chrono::{Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::CalError;
use crate::types::{CalendarDate, DAYS_PER_WEEK, Instant, WeekWindow};

const GAP_PROBE_STEP_MINUTES: i64 = 15;
// Covers the largest known skipped span (a whole calendar day) plus slack
const GAP_PROBE_LIMIT: usize = 26 * 4;

/// Calendar view of a time zone.
#[derive(Debug, Clone)]
pub struct LocalCalendar<Tz: TimeZone = Local> {
    tz: Tz,
}

impl LocalCalendar<Local> {
    /// Calendar in the process local time zone.
    pub fn local() -> Self {
        LocalCalendar { tz: Local }
    }
}

impl<Tz: TimeZone> LocalCalendar<Tz> {
    pub fn new(tz: Tz) -> Self {
        LocalCalendar { tz }
    }

    /// Resolve an instant to its local calendar date.
    pub fn to_calendar_date(&self, instant: Instant) -> Result<CalendarDate, CalError> {
        let local = self
            .tz
            .timestamp_opt(instant.timestamp(), instant.timestamp_subsec_nanos())
            .single()
            .ok_or(CalError::LocalTime(instant))?;
        Ok(CalendarDate::from_naive(local.date_naive()))
    }

    /// Instant of a local date and time, rolling `month` and `day` over as needed.
    ///
    /// `day` is a day of month and may be zero, negative or past the end of
    /// the month: day 0 is the last day of the previous month, day 32 of
    /// January is February 1st.
    pub fn normalize(
        &self,
        year: i32,
        month: u32,
        day: i64,
        time: NaiveTime,
    ) -> Result<Instant, CalError> {
        let out_of_range = || CalError::DateOutOfRange { year, month, day };

        let month_index = i64::from(month) - 1;
        let year_shift = i32::try_from(month_index.div_euclid(12)).map_err(|_| out_of_range())?;
        let first_of_month = year
            .checked_add(year_shift)
            .and_then(|y| NaiveDate::from_ymd_opt(y, month_index.rem_euclid(12) as u32 + 1, 1))
            .ok_or_else(out_of_range)?;
        let date = Duration::try_days(day - 1)
            .and_then(|offset| first_of_month.checked_add_signed(offset))
            .ok_or_else(out_of_range)?;

        self.resolve_local(date.and_time(time)).ok_or_else(out_of_range)
    }

    /// Local midnight of a possibly out-of-range date.
    pub fn normalize_date(&self, year: i32, month: u32, day: i64) -> Result<Instant, CalError> {
        self.normalize(year, month, day, NaiveTime::MIN)
    }

    /// Map a wall-clock time to an instant.
    ///
    /// Ambiguous times resolve to the earlier instant; times inside a DST gap
    /// move forward to the first valid local time.
    fn resolve_local(&self, local: NaiveDateTime) -> Option<Instant> {
        let step = Duration::minutes(GAP_PROBE_STEP_MINUTES);
        let mut probe = local;
        for _ in 0..=GAP_PROBE_LIMIT {
            match self.tz.from_local_datetime(&probe) {
                LocalResult::Single(t) => return Some(t.with_timezone(&Utc)),
                LocalResult::Ambiguous(earliest, _) => return Some(earliest.with_timezone(&Utc)),
                LocalResult::None => probe = probe.checked_add_signed(step)?,
            }
        }
        None
    }

    /// Local midnight of the Sunday starting the week that contains `instant`.
    pub fn start_of_week(&self, instant: Instant) -> Result<Instant, CalError> {
        let date = self.to_calendar_date(instant)?;
        let back = i64::from(date.weekday.num_days_from_sunday());
        self.normalize_date(date.year, date.month, i64::from(date.day) - back)
    }

    /// Start of the week `delta_weeks` away from `week_start`, which may be negative.
    pub fn week_offset(&self, week_start: Instant, delta_weeks: i32) -> Result<Instant, CalError> {
        if delta_weeks == 0 {
            return Ok(week_start);
        }
        let date = self.to_calendar_date(week_start)?;
        let shift = i64::from(delta_weeks) * DAYS_PER_WEEK as i64;
        self.normalize_date(date.year, date.month, i64::from(date.day) + shift)
    }

    /// The seven dates of the week starting at `week_start`.
    ///
    /// Each day is normalized independently. A day that cannot be resolved is
    /// logged and replaced by plain date arithmetic on the first day.
    pub fn week_window(&self, week_start: Instant) -> WeekWindow {
        let first = self.to_calendar_date(week_start).unwrap_or_else(|e| {
            log::warn!("{}; using UTC date of week start", e);
            CalendarDate::from_naive(week_start.date_naive())
        });

        let days = std::array::from_fn(|i| {
            if i == 0 {
                return first;
            }
            let offset = i64::from(first.day) + i as i64;
            self.normalize_date(first.year, first.month, offset)
                .and_then(|t| self.to_calendar_date(t))
                .unwrap_or_else(|e| {
                    log::warn!("{}; falling back to naive date arithmetic", e);
                    naive_day_after(first, i as i64)
                })
        });

        WeekWindow { days }
    }
}

/// Date `days` after `date` without any time zone involvement.
pub fn naive_day_after(date: CalendarDate, days: i64) -> CalendarDate {
    date.to_naive()
        .zip(Duration::try_days(days))
        .and_then(|(d, offset)| d.checked_add_signed(offset))
        .map(CalendarDate::from_naive)
        .unwrap_or(date)
}
