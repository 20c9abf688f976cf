//! End-to-end tests for the weekcal binary.

use assert_cmd::Command;
use predicates::prelude::*;

use weekcal::args::TEST_TIME_VAR;

/// Binary pinned to UTC and Wednesday, 2024-01-17.
fn weekcal() -> Command {
    weekcal_at("2024-01-17")
}

fn weekcal_at(today: &str) -> Command {
    let mut cmd = Command::cargo_bin("weekcal").unwrap();
    cmd.env("TZ", "UTC")
        .env(TEST_TIME_VAR, today)
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_lines(cmd: &mut Command) -> Vec<String> {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

mod output_tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let lines = stdout_lines(&mut weekcal());
        // header + 2 before + current + 4 after
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "    Su Mo Tu We Th Fr Sa ");
        assert_eq!(lines[3], "Jan 14 15 16 17 18 19 20 ");
    }

    #[test]
    fn test_single_week() {
        let lines = stdout_lines(weekcal().args(["--weeks-before", "0", "--weeks-after", "0"]));
        assert_eq!(lines, vec!["    Su Mo Tu We Th Fr Sa ", "Jan 14 15 16 17 18 19 20 "]);
    }

    #[test]
    fn test_three_weeks() {
        weekcal()
            .args(["--weeks-before", "1", "--weeks-after", "1", "--color", "never"])
            .assert()
            .success()
            .stdout(
                "    Su Mo Tu We Th Fr Sa \n\
                 Jan  7  8  9 10 11 12 13 \n\
                 Jan 14 15 16 17 18 19 20 \n\
                 Jan 21 22 23 24 25 26 27 \n",
            );
    }

    #[test]
    fn test_maximum_window() {
        let lines = stdout_lines(weekcal().args(["--weeks-before", "52", "--weeks-after", "52"]));
        assert_eq!(lines.len(), 106);
        assert_eq!(lines[53], "Jan 14 15 16 17 18 19 20 ");
    }

    #[test]
    fn test_month_boundary_labels() {
        weekcal_at("2024-01-31")
            .args(["--weeks-before", "0", "--weeks-after", "0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Jan 28 29 30 31  1  2  3 Feb\n"));
    }

    #[test]
    fn test_test_time_with_clock() {
        let lines = stdout_lines(
            weekcal_at("2024-01-20T23:59:59").args(["--weeks-before", "0", "--weeks-after", "0"]),
        );
        assert_eq!(lines[1], "Jan 14 15 16 17 18 19 20 ");
    }

    #[test]
    fn test_color_always_highlights_today() {
        weekcal()
            .args(["--color", "always"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b[1m\x1b[43m17\x1b[0m "))
            .stdout(predicate::str::contains("\x1b[90m16 \x1b[0m"));
    }

    #[test]
    fn test_color_always_header() {
        let lines = stdout_lines(weekcal().args(["--color", "always"]));
        assert!(lines[0].contains("We "));
        assert!(lines[0].contains("\x1b[90mTu \x1b[0m"));
        assert!(!lines[0].contains("\x1b[90mWe "));
    }

    #[test]
    fn test_color_never() {
        weekcal()
            .args(["--color", "never"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b[").not());
    }

    #[test]
    fn test_color_auto_when_piped() {
        weekcal()
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b[").not());
    }
}

mod argument_tests {
    use super::*;

    #[test]
    fn test_help() {
        weekcal()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("weekcal"))
            .stdout(predicate::str::contains("--weeks-before"))
            .stdout(predicate::str::contains("--weeks-after"))
            .stdout(predicate::str::contains("Output styling"))
            .stdout(predicate::str::contains("Test-only fixed clock"));
    }

    #[test]
    fn test_help_with_other_flags() {
        weekcal()
            .args(["--weeks-before", "99", "--bogus", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--weeks-before"))
            .stdout(predicate::str::contains("Jan 14").not());
    }

    #[test]
    fn test_version() {
        weekcal()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_unknown_option() {
        weekcal()
            .arg("--bogus")
            .assert()
            .code(1)
            .stdout("")
            .stderr(predicate::str::contains("Unknown option: --bogus"))
            .stderr(predicate::str::contains("--help"));
    }

    #[test]
    fn test_unexpected_positional() {
        weekcal()
            .arg("2024")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Unknown option: 2024"));
    }

    #[test]
    fn test_weeks_before_out_of_range() {
        weekcal()
            .args(["--weeks-before", "53"])
            .assert()
            .code(1)
            .stdout("")
            .stderr(predicate::str::contains("[0, 52]"));
    }

    #[test]
    fn test_weeks_before_overflowing_value() {
        weekcal()
            .args(["--weeks-before", "99999999999999999999"])
            .assert()
            .code(1)
            .stdout("")
            .stderr(predicate::str::contains("[0, 52]"));
    }

    #[test]
    fn test_negative_weeks_after() {
        weekcal()
            .args(["--weeks-after", "-1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("[0, 52]"));
    }

    #[test]
    fn test_unparseable_value_keeps_default() {
        let lines = stdout_lines(weekcal().args(["--weeks-before", "abc", "--weeks-after", "0"]));
        // header + default 2 before + current
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_invalid_color_value() {
        weekcal().args(["--color", "sometimes"]).assert().code(1);
    }
}
