//! Command-line argument parsing using clap.
//!
//! Week counts are parsed permissively: a value that is not a base-10
//! integer keeps the default instead of failing.

use std::ffi::OsString;
use std::io::IsTerminal;
use std::num::IntErrorKind;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};

use crate::calendar::LocalCalendar;
use crate::error::CalError;
use crate::types::{
    CalContext, ColorMode, DEFAULT_WEEKS_AFTER, DEFAULT_WEEKS_BEFORE, Instant, MAX_WEEKS,
    RenderConfig,
};

/// Overrides the sampled clock, as local `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
pub const TEST_TIME_VAR: &str = "WEEKCAL_TEST_TIME";

#[derive(Parser, Debug)]
#[command(name = "weekcal")]
#[command(about = "Displays a calendar of the weeks around the current week", long_about = None)]
#[command(version)]
#[command(args_override_self = true)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Number of weeks to show before the current week (0-52, default 2).
    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Display options"
    )]
    pub weeks_before: Option<Option<String>>,

    /// Number of weeks to show after the current week (0-52, default 4).
    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Display options"
    )]
    pub weeks_after: Option<Option<String>>,

    /// When to use ANSI styling.
    #[arg(
        long,
        value_enum,
        default_value_t = ColorMode::Auto,
        value_name = "when",
        help_heading = "Output options"
    )]
    pub color: ColorMode,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Output styling:
  The weekday of today is shown in normal weight, other weekdays are dimmed.
  Today's date is bold on a highlighted background, other dates are dimmed.
  A month name follows a week in which a new month begins.
  Month names are emphasized only on the current week's line.

Examples:
  weekcal                                  Two weeks back, four ahead
  weekcal --weeks-before 0 --weeks-after 0 Current week only
  weekcal --weeks-after 12 --color never   A quarter ahead, no styling

Environment:
  WEEKCAL_TEST_TIME  Test-only fixed clock (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)";

/// What the command line asks for.
#[derive(Debug)]
pub enum Invocation {
    Help(String),
    Version(String),
    Run(Args),
}

impl Args {
    /// Parse a full argument vector, program name first.
    ///
    /// `--help` anywhere wins over every other argument, valid or not.
    pub fn parse_invocation<I, T>(argv: I) -> Result<Invocation, CalError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

        if argv.iter().skip(1).any(|a| a == "--help" || a == "-h") {
            let help = Args::command().render_help().to_string();
            return Ok(Invocation::Help(help));
        }

        match Args::try_parse_from(argv) {
            Ok(args) => Ok(Invocation::Run(args)),
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp => Ok(Invocation::Help(e.to_string())),
                ErrorKind::DisplayVersion => Ok(Invocation::Version(e.to_string())),
                ErrorKind::UnknownArgument => Err(CalError::UnknownOption(invalid_arg(&e))),
                _ => {
                    let message = e.to_string();
                    let message = message.trim_start_matches("error: ").trim_end();
                    Err(CalError::InvalidArgument(message.to_string()))
                }
            },
        }
    }

    pub fn weeks_before(&self) -> i64 {
        parse_weeks("--weeks-before", &self.weeks_before, DEFAULT_WEEKS_BEFORE)
    }

    pub fn weeks_after(&self) -> i64 {
        parse_weeks("--weeks-after", &self.weeks_after, DEFAULT_WEEKS_AFTER)
    }
}

fn invalid_arg(err: &clap::Error) -> String {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.clone(),
        _ => "<unknown>".to_string(),
    }
}

/// Parse a week count, keeping `default` when the value is missing or malformed.
///
/// Integers too large for `i64` saturate so range validation still rejects them.
fn parse_weeks(option: &str, value: &Option<Option<String>>, default: i64) -> i64 {
    match value {
        Some(Some(raw)) => match raw.trim().parse::<i64>() {
            Ok(n) => n,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
            Err(_) => {
                log::info!("ignoring {} value '{}', keeping {}", option, raw, default);
                default
            }
        },
        Some(None) => {
            log::info!("{} given without a value, keeping {}", option, default);
            default
        }
        None => default,
    }
}

impl RenderConfig {
    pub fn new(weeks_before: i64, weeks_after: i64) -> Result<Self, CalError> {
        Ok(RenderConfig {
            weeks_before: check_weeks("--weeks-before", weeks_before)?,
            weeks_after: check_weeks("--weeks-after", weeks_after)?,
        })
    }
}

fn check_weeks(option: &'static str, value: i64) -> Result<u32, CalError> {
    if (0..=MAX_WEEKS).contains(&value) {
        Ok(value as u32)
    } else {
        Err(CalError::WeeksOutOfRange { option, value })
    }
}

impl CalContext {
    /// Validate options and fix "now" and today for the whole run.
    pub fn new<Tz: TimeZone>(args: &Args, calendar: &LocalCalendar<Tz>) -> Result<Self, CalError> {
        let config = RenderConfig::new(args.weeks_before(), args.weeks_after())?;

        let color = match args.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        };

        let now = get_now(calendar)?;
        let today = calendar.to_calendar_date(now)?;

        Ok(CalContext {
            config,
            color,
            now,
            today,
        })
    }
}

/// Current instant, respecting the WEEKCAL_TEST_TIME environment variable for testing.
pub fn get_now<Tz: TimeZone>(calendar: &LocalCalendar<Tz>) -> Result<Instant, CalError> {
    if let Ok(test_time) = std::env::var(TEST_TIME_VAR)
        && let Some(local) = parse_test_time(&test_time)
    {
        return calendar.normalize(
            local.year(),
            local.month(),
            i64::from(local.day()),
            local.time(),
        );
    }
    Ok(Utc::now())
}

/// Date-only values mean local noon of that day.
fn parse_test_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
            Some(date.and_time(NaiveTime::from_hms_opt(12, 0, 0)?))
        })
}
