//! Interval utility functions
//!
//! Departure time, trip duration and arrival time are stored as day-relative
//! intervals. These helpers decode the stored forms into `TimeDelta` and
//! render them as fixed-width `HH:MM:SS` clock strings.

use chrono::TimeDelta;
use thiserror::Error;

const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_MINUTE: i64 = 60;

/// An interval value that cannot be turned into elapsed seconds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unparseable interval value: {0:?}")]
    Malformed(String),

    #[error("Negative interval: {0}")]
    Negative(TimeDelta),

    #[error("Interval has a calendar component of {months} month(s) and no fixed length")]
    CalendarMonths { months: i32 },

    #[error("Interval out of range")]
    OutOfRange,
}

/// Render an optional interval as `HH:MM:SS`.
///
/// A missing interval stays missing; it is never coerced to `00:00:00`.
pub fn interval_to_clock(value: Option<TimeDelta>) -> Result<Option<String>, FormatError> {
    value.map(format_clock).transpose()
}

/// Render an interval as `HH:MM:SS`.
///
/// Sub-second remainders are truncated. The hour field is not wrapped at 24
/// and widens past two digits when needed.
pub fn format_clock(value: TimeDelta) -> Result<String, FormatError> {
    if value < TimeDelta::zero() {
        return Err(FormatError::Negative(value));
    }

    let total_seconds = value.num_seconds();
    let hours = total_seconds / SECS_PER_HOUR;
    let minutes = (total_seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total_seconds % SECS_PER_MINUTE;

    Ok(format!("{:02}:{:02}:{:02}", hours, minutes, seconds))
}

/// Build an interval from PostgreSQL-style parts (months, days, microseconds).
///
/// Months have no fixed length, so any month component is rejected.
pub fn interval_from_parts(
    months: i32,
    days: i32,
    microseconds: i64,
) -> Result<TimeDelta, FormatError> {
    if months != 0 {
        return Err(FormatError::CalendarMonths { months });
    }

    TimeDelta::try_days(i64::from(days))
        .and_then(|d| d.checked_add(&TimeDelta::microseconds(microseconds)))
        .ok_or(FormatError::OutOfRange)
}

/// Parse the textual forms an interval column may hold.
///
/// Accepted:
/// - `H:MM:SS[.fraction]` with an unbounded hour field (`838:59:59`)
/// - `H:MM`
/// - bare seconds, `5400` or `5400.25`
/// - a day prefix, `1 day 02:00:00`, `0 days 01:30:00`, `2 days`
pub fn parse_interval_text(raw: &str) -> Result<TimeDelta, FormatError> {
    let malformed = || FormatError::Malformed(raw.to_string());
    let text = raw.trim();
    if text.is_empty() {
        return Err(malformed());
    }

    let (days, clock) = match text.split_once(" day") {
        Some((days, rest)) => {
            let days = parse_digits(days.trim()).ok_or_else(malformed)?;
            let rest = rest.strip_prefix('s').unwrap_or(rest);
            (days, rest.trim_start_matches(',').trim())
        }
        None => (0, text),
    };

    // `text` is non-empty, so an empty clock means a bare day count
    let (seconds, nanos) = if clock.is_empty() {
        (0, 0)
    } else {
        parse_clock(clock).ok_or_else(malformed)?
    };

    TimeDelta::try_days(days)
        .zip(TimeDelta::new(seconds, nanos))
        .and_then(|(d, c)| d.checked_add(&c))
        .ok_or(FormatError::OutOfRange)
}

/// Parse a clock or bare-seconds string into (whole seconds, nanoseconds)
fn parse_clock(clock: &str) -> Option<(i64, u32)> {
    let (whole, nanos) = match clock.split_once('.') {
        Some((whole, fraction)) => (whole, parse_fraction(fraction)?),
        None => (clock, 0),
    };

    let parts: Vec<&str> = whole.split(':').collect();
    let seconds = match parts.as_slice() {
        [s] => parse_digits(s)?,
        [h, m] => parse_digits(h)?
            .checked_mul(SECS_PER_HOUR)?
            .checked_add(parse_sexagesimal(m)? * SECS_PER_MINUTE)?,
        [h, m, s] => parse_digits(h)?
            .checked_mul(SECS_PER_HOUR)?
            .checked_add(parse_sexagesimal(m)? * SECS_PER_MINUTE + parse_sexagesimal(s)?)?,
        _ => return None,
    };

    Some((seconds, nanos))
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Minute/second field: exactly two digits, below 60
fn parse_sexagesimal(s: &str) -> Option<i64> {
    if s.len() != 2 {
        return None;
    }
    parse_digits(s).filter(|v| *v < 60)
}

/// Fractional seconds, truncated to nanosecond precision
fn parse_fraction(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits: String = s.chars().take(9).collect();
    format!("{:0<9}", digits).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_to_clock_none() {
        assert_eq!(interval_to_clock(None), Ok(None));
    }

    #[test]
    fn test_interval_to_clock_ninety_minutes() {
        let clock = interval_to_clock(Some(TimeDelta::minutes(90))).unwrap();
        assert_eq!(clock.as_deref(), Some("01:30:00"));
    }

    #[test]
    fn test_interval_to_clock_hours_not_wrapped() {
        let value = TimeDelta::hours(25) + TimeDelta::seconds(5);
        let clock = interval_to_clock(Some(value)).unwrap();
        assert_eq!(clock.as_deref(), Some("25:00:05"));
    }

    #[test]
    fn test_format_clock_zero() {
        assert_eq!(format_clock(TimeDelta::zero()).unwrap(), "00:00:00");
    }

    #[test]
    fn test_format_clock_three_digit_hours() {
        let value = TimeDelta::hours(838) + TimeDelta::minutes(59) + TimeDelta::seconds(59);
        assert_eq!(format_clock(value).unwrap(), "838:59:59");
    }

    #[test]
    fn test_format_clock_truncates_subsecond() {
        let value = TimeDelta::seconds(59) + TimeDelta::milliseconds(999);
        assert_eq!(format_clock(value).unwrap(), "00:00:59");
    }

    #[test]
    fn test_format_clock_negative_rejected() {
        let err = format_clock(TimeDelta::seconds(-1)).unwrap_err();
        assert!(matches!(err, FormatError::Negative(_)));
    }

    #[test]
    fn test_format_clock_is_deterministic() {
        let value = TimeDelta::seconds(12_345);
        let first = format_clock(value).unwrap();
        let second = format_clock(value).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "03:25:45");
    }

    #[test]
    fn test_interval_from_parts() {
        let value = interval_from_parts(0, 1, 3_600_000_000).unwrap();
        assert_eq!(format_clock(value).unwrap(), "25:00:00");
    }

    #[test]
    fn test_interval_from_parts_months_rejected() {
        assert_eq!(
            interval_from_parts(2, 0, 0),
            Err(FormatError::CalendarMonths { months: 2 })
        );
    }

    #[test]
    fn test_parse_interval_text_clock() {
        let value = parse_interval_text("01:30:00").unwrap();
        assert_eq!(value, TimeDelta::minutes(90));
    }

    #[test]
    fn test_parse_interval_text_long_hours() {
        let value = parse_interval_text("100:00:01").unwrap();
        assert_eq!(format_clock(value).unwrap(), "100:00:01");
    }

    #[test]
    fn test_parse_interval_text_fraction_truncated() {
        let value = parse_interval_text("00:00:10.987654321999").unwrap();
        assert_eq!(value.num_seconds(), 10);
        assert_eq!(value.subsec_nanos(), 987_654_321);
        assert_eq!(format_clock(value).unwrap(), "00:00:10");
    }

    #[test]
    fn test_parse_interval_text_bare_seconds() {
        assert_eq!(parse_interval_text("5400").unwrap(), TimeDelta::minutes(90));
        assert_eq!(
            format_clock(parse_interval_text("5400.75").unwrap()).unwrap(),
            "01:30:00"
        );
    }

    #[test]
    fn test_parse_interval_text_hours_minutes() {
        assert_eq!(parse_interval_text("07:45").unwrap(), TimeDelta::minutes(465));
    }

    #[test]
    fn test_parse_interval_text_day_prefix() {
        let value = parse_interval_text("1 day 01:00:05").unwrap();
        assert_eq!(format_clock(value).unwrap(), "25:00:05");

        let value = parse_interval_text("0 days 01:30:00").unwrap();
        assert_eq!(format_clock(value).unwrap(), "01:30:00");

        let value = parse_interval_text("2 days").unwrap();
        assert_eq!(format_clock(value).unwrap(), "48:00:00");

        let value = parse_interval_text("0 days").unwrap();
        assert_eq!(format_clock(value).unwrap(), "00:00:00");
    }

    #[test]
    fn test_parse_interval_text_trims_whitespace() {
        assert_eq!(parse_interval_text("  00:01:00 ").unwrap(), TimeDelta::minutes(1));
    }

    #[test]
    fn test_parse_interval_text_malformed() {
        for raw in [
            "",
            "   ",
            "not-a-time",
            "12:3:00",
            "12:60:00",
            "12:00:61",
            "-01:00:00",
            "1:2:3:4",
            "01:00:00.",
            "abc days 01:00:00",
        ] {
            assert_eq!(
                parse_interval_text(raw),
                Err(FormatError::Malformed(raw.to_string())),
                "expected malformed for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_format_error_display() {
        let err = FormatError::Malformed("xx".to_string());
        assert_eq!(err.to_string(), "Unparseable interval value: \"xx\"");
    }
}
