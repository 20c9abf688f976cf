//! Week calendar CLI application.
//!
//! # Usage
//! ```ignore
//! weekcal                                   // 2 weeks back, 4 ahead
//! weekcal --weeks-before 0 --weeks-after 0  // Current week only
//! weekcal --weeks-after 12 --color never    // No ANSI styling
//! ```

use flexi_logger::{Logger, LoggerHandle};

use weekcal::args::{Args, Invocation};
use weekcal::calendar::LocalCalendar;
use weekcal::error::CalError;
use weekcal::formatter::print_calendar;
use weekcal::types::CalContext;

// Diagnostics stay on stderr; raise with RUST_LOG
const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() {
    let _logger = init_logging();

    if let Err(e) = run() {
        eprintln!("weekcal: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() -> Option<LoggerHandle> {
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .and_then(|logger| logger.start())
        .map_err(|e| eprintln!("weekcal: logging disabled: {}", e))
        .ok()
}

fn run() -> Result<(), CalError> {
    let args = match Args::parse_invocation(std::env::args_os())? {
        Invocation::Help(text) | Invocation::Version(text) => {
            println!("{}", text.trim_end());
            return Ok(());
        }
        Invocation::Run(args) => args,
    };

    let calendar = LocalCalendar::local();
    let ctx = CalContext::new(&args, &calendar)?;
    print_calendar(&ctx, &calendar)
}
