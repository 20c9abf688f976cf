//! Week line formatting and calendar output with optional ANSI styling.

use std::io::{BufWriter, Write};

use chrono::TimeZone;

use crate::calendar::LocalCalendar;
use crate::error::CalError;
use crate::types::{
    COLOR_BG_YELLOW, COLOR_BOLD, COLOR_DARK_GREY, COLOR_RESET, CalContext, DAYS_PER_WEEK,
    Instant, MONTH_ABBREVIATIONS, MONTH_LABEL_WIDTH, WEEKDAY_ABBREVIATIONS, WeekWindow,
};

/// Three-letter English abbreviation of a month (1-12).
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("???")
}

fn dimmed(ctx: &CalContext, text: &str) -> String {
    if ctx.color {
        format!("{}{}{}", COLOR_DARK_GREY, text, COLOR_RESET)
    } else {
        text.to_string()
    }
}

fn highlighted(ctx: &CalContext, text: &str) -> String {
    if ctx.color {
        format!("{}{}{}{}", COLOR_BOLD, COLOR_BG_YELLOW, text, COLOR_RESET)
    } else {
        text.to_string()
    }
}

/// Month label, plain in the current week when it names today's month.
fn format_month_label(ctx: &CalContext, month: u32, is_current_week: bool, width: usize) -> String {
    let label = format!("{:<width$}", month_abbreviation(month), width = width);
    if is_current_week && month == ctx.today.month {
        label
    } else {
        dimmed(ctx, &label)
    }
}

/// Format weekday header row, Sunday first, with today's column emphasized.
pub fn format_weekday_header(ctx: &CalContext) -> String {
    let mut result = " ".repeat(MONTH_LABEL_WIDTH);
    let today_column = ctx.today.weekday.num_days_from_sunday() as usize;

    for (i, name) in WEEKDAY_ABBREVIATIONS.iter().enumerate() {
        let cell = format!("{} ", name);
        if i == today_column {
            result.push_str(&cell);
        } else {
            result.push_str(&dimmed(ctx, &cell));
        }
    }

    result
}

/// Format one week: month label, seven day cells, and a trailing label when
/// the month changes within the week.
pub fn format_week(ctx: &CalContext, week: &WeekWindow, is_current_week: bool) -> String {
    let mut line = format_month_label(ctx, week.first().month, is_current_week, MONTH_LABEL_WIDTH);

    for day in &week.days {
        if day.is_same_day(&ctx.today) {
            line.push_str(&highlighted(ctx, &format!("{:>2}", day.day)));
            line.push(' ');
        } else {
            line.push_str(&dimmed(ctx, &format!("{:>2} ", day.day)));
        }
    }

    if let Some(new_month) = week.month_change() {
        line.push_str(&format_month_label(ctx, new_month, is_current_week, 0));
    }

    line
}

/// Render the header and every week line in chronological order.
///
/// Only the current week start is required to resolve; other weeks fall back
/// to fixed-length week stepping when their start cannot be normalized.
pub fn render_calendar<Tz: TimeZone>(
    ctx: &CalContext,
    calendar: &LocalCalendar<Tz>,
) -> Result<Vec<String>, CalError> {
    let current_week = calendar.start_of_week(ctx.now)?;
    log::debug!("{:?}, current week starts {}", ctx.config, current_week);

    let before = ctx.config.weeks_before as i32;
    let after = ctx.config.weeks_after as i32;
    let mut lines = Vec::with_capacity((before + after) as usize + 2);

    lines.push(format_weekday_header(ctx));

    for offset in -before..=after {
        let week_start = calendar
            .week_offset(current_week, offset)
            .unwrap_or_else(|e| {
                log::warn!("{}; stepping week {:+} by fixed length", e, offset);
                fixed_week_step(current_week, offset)
            });
        let week = calendar.week_window(week_start);
        lines.push(format_week(ctx, &week, offset == 0));
    }

    Ok(lines)
}

fn fixed_week_step(week_start: Instant, offset: i32) -> Instant {
    chrono::Duration::try_days(i64::from(offset) * DAYS_PER_WEEK as i64)
        .and_then(|d| week_start.checked_add_signed(d))
        .unwrap_or(week_start)
}

/// Print the calendar to stdout.
pub fn print_calendar<Tz: TimeZone>(
    ctx: &CalContext,
    calendar: &LocalCalendar<Tz>,
) -> Result<(), CalError> {
    let lines = render_calendar(ctx, calendar)?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}
