//! ISO 8601 input parsing.
//!
//! Accepts the subset of ISO 8601 that prototype data actually contains:
//! - `2021`, `2021-08`, `2021-08-17`
//! - any of those followed by `T18`, `T18:30`, `T18:30:00`, `T18:30:00.250`
//!   and an optional offset (`Z`, `+01`, `+01:00`, `+0100`)
//! - bare times such as `18:30` or `T18:30:00Z`, taken as today
//! - the keywords `today` and `now`

use std::sync::LazyLock;

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
};
use chrono_tz::Tz;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::config::types::FilterConfig;

/// Error type for date parsing and date filters.
///
/// The display text is what templates show in place of the formatted value,
/// so several variants share the same text; the payload says why.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid DateTime")]
    Unparsable(String),

    #[error("Invalid DateTime")]
    OutOfRange(String),

    #[error("Invalid DateTime")]
    InvalidMonth(String),

    #[error("Invalid unit {0}")]
    InvalidUnit(String),
}

/// How much of the date the input spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// `2021`
    Year,
    /// `2021-08`
    Month,
    /// `2021-08-17`
    Day,
    /// Any input that carries a time of day, including `today` and `now`.
    Time,
}

/// A parsed input resolved into the configured zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDate {
    pub datetime: DateTime<Tz>,
    pub precision: Precision,
}

const OFFSET: &str = r"(Z|[+-]\d{2}(?::?\d{2})?)";

static ISO_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(\d{{4}})(?:-(\d{{2}})(?:-(\d{{2}})(?:T(\d{{2}})(?::(\d{{2}})(?::(\d{{2}})(?:[.,](\d{{1,9}}))?)?)?{OFFSET}?)?)?)?$"
    ))
    .expect("valid regex")
});

static ISO_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^T?(\d{{2}}):(\d{{2}})(?::(\d{{2}})(?:[.,](\d{{1,9}}))?)?{OFFSET}?$"
    ))
    .expect("valid regex")
});

/// Whether the input is one of the keywords that stand for the current instant.
pub fn is_now_keyword(input: &str) -> bool {
    matches!(input, "today" | "now")
}

/// Parse a date input and resolve it in the configured zone.
pub fn parse_date(input: &str, cfg: &FilterConfig) -> Result<ParsedDate, DateError> {
    let input = input.trim();

    if is_now_keyword(input) {
        return Ok(ParsedDate { datetime: cfg.now(), precision: Precision::Time });
    }

    if let Some(caps) = ISO_DATE_TIME.captures(input) {
        return parse_date_time(input, &caps, cfg.time_zone);
    }

    if let Some(caps) = ISO_TIME.captures(input) {
        let time = civil_time(input, &caps[1], caps.get(2), caps.get(3), caps.get(4))?;
        let offset = caps.get(5).map(|m| parse_offset(input, m.as_str())).transpose()?;
        let today = cfg.now().date_naive();
        let datetime = localize(NaiveDateTime::new(today, time), offset, cfg.time_zone)?;
        return Ok(ParsedDate { datetime, precision: Precision::Time });
    }

    tracing::debug!(input, "unparsable date input");
    Err(DateError::Unparsable(input.to_string()))
}

fn parse_date_time(
    input: &str,
    caps: &Captures<'_>,
    zone: Tz,
) -> Result<ParsedDate, DateError> {
    let year: i32 =
        caps[1].parse().map_err(|_| DateError::OutOfRange(input.to_string()))?;
    let month = caps.get(2).map_or(Ok(1), |m| bounded(input, m.as_str(), 1, 12))?;
    let day = caps.get(3).map_or(Ok(1), |m| bounded(input, m.as_str(), 1, 31))?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateError::OutOfRange(input.to_string()))?;

    let precision = match (caps.get(2), caps.get(3), caps.get(4)) {
        (_, _, Some(_)) => Precision::Time,
        (_, Some(_), None) => Precision::Day,
        (Some(_), None, None) => Precision::Month,
        (None, None, None) => Precision::Year,
    };

    let time = match caps.get(4) {
        Some(hour) => civil_time(input, hour.as_str(), caps.get(5), caps.get(6), caps.get(7))?,
        None => NaiveTime::MIN,
    };
    let offset = caps.get(8).map(|m| parse_offset(input, m.as_str())).transpose()?;

    let datetime = localize(NaiveDateTime::new(date, time), offset, zone)?;
    Ok(ParsedDate { datetime, precision })
}

fn bounded(input: &str, digits: &str, min: u32, max: u32) -> Result<u32, DateError> {
    digits
        .parse::<u32>()
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or_else(|| DateError::OutOfRange(input.to_string()))
}

fn civil_time(
    input: &str,
    hour: &str,
    minute: Option<regex::Match<'_>>,
    second: Option<regex::Match<'_>>,
    fraction: Option<regex::Match<'_>>,
) -> Result<NaiveTime, DateError> {
    let hour = bounded(input, hour, 0, 23)?;
    let minute = minute.map_or(Ok(0), |m| bounded(input, m.as_str(), 0, 59))?;
    let second = second.map_or(Ok(0), |m| bounded(input, m.as_str(), 0, 59))?;
    let nanos = fraction.map_or(0, |m| {
        let digits = format!("{:0<9}", m.as_str());
        digits.parse::<u32>().unwrap_or(0)
    });

    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
        .ok_or_else(|| DateError::OutOfRange(input.to_string()))
}

fn parse_offset(input: &str, offset: &str) -> Result<FixedOffset, DateError> {
    let seconds = if offset == "Z" {
        0
    } else {
        let sign = if offset.starts_with('-') { -1 } else { 1 };
        let digits: String = offset[1..].chars().filter(char::is_ascii_digit).collect();
        let hours = bounded(input, &digits[..2], 0, 23)?;
        let minutes =
            if digits.len() > 2 { bounded(input, &digits[2..], 0, 59)? } else { 0 };
        sign * (hours * 3600 + minutes * 60) as i32
    };

    FixedOffset::east_opt(seconds).ok_or_else(|| DateError::OutOfRange(input.to_string()))
}

/// Attach a zone to a civil date-time.
///
/// With an explicit offset the instant is fixed and converted into `zone`.
/// Without one the civil time is read in `zone`; times skipped by a
/// daylight-saving jump move forward an hour.
pub(crate) fn localize(
    naive: NaiveDateTime,
    offset: Option<FixedOffset>,
    zone: Tz,
) -> Result<DateTime<Tz>, DateError> {
    let out_of_range = || DateError::OutOfRange(naive.to_string());

    if let Some(offset) = offset {
        return offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&zone))
            .ok_or_else(out_of_range);
    }

    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let shifted = naive.checked_add_signed(Duration::hours(1))?;
            zone.from_local_datetime(&shifted).earliest()
        })
        .ok_or_else(out_of_range)
}

/// Full ISO 8601 rendering with milliseconds and offset.
pub fn format_iso(datetime: &DateTime<Tz>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Clock;
    use chrono::{Datelike, Timelike, Utc};

    fn cfg() -> FilterConfig {
        let now = Utc.with_ymd_and_hms(2025, 1, 29, 17, 30, 0).unwrap();
        FilterConfig::default().with_clock(Clock::Fixed(now))
    }

    #[test]
    fn parses_date_only() {
        let parsed = parse_date("2021-08-17", &cfg()).unwrap();
        assert_eq!(parsed.precision, Precision::Day);
        assert_eq!(format_iso(&parsed.datetime), "2021-08-17T00:00:00.000+01:00");
    }

    #[test]
    fn parses_year_month() {
        let parsed = parse_date("2021-08", &cfg()).unwrap();
        assert_eq!(parsed.precision, Precision::Month);
        assert_eq!(parsed.datetime.day(), 1);
    }

    #[test]
    fn parses_date_time_with_fraction() {
        let parsed = parse_date("2021-08-17T18:30:05.25", &cfg()).unwrap();
        assert_eq!(parsed.precision, Precision::Time);
        assert_eq!(format_iso(&parsed.datetime), "2021-08-17T18:30:05.250+01:00");
    }

    #[test]
    fn converts_offsets_into_zone() {
        let parsed = parse_date("2021-08-17T18:30:00Z", &cfg()).unwrap();
        assert_eq!(parsed.datetime.hour(), 19);

        let parsed = parse_date("2021-01-17T18:30:00-0500", &cfg()).unwrap();
        assert_eq!(parsed.datetime.hour(), 23);
    }

    #[test]
    fn bare_time_uses_today() {
        let parsed = parse_date("18:30", &cfg()).unwrap();
        assert_eq!(format_iso(&parsed.datetime), "2025-01-29T18:30:00.000+00:00");
    }

    #[test]
    fn keywords_read_the_clock() {
        let parsed = parse_date("now", &cfg()).unwrap();
        assert_eq!(format_iso(&parsed.datetime), "2025-01-29T17:30:00.000+00:00");
        assert_eq!(parse_date("today", &cfg()).unwrap(), parsed);
    }

    #[test]
    fn rejects_invalid_inputs() {
        for input in ["2021-23-45", "2024-12-32", "2021-02-29", "2021-08-17T25:61:00", "soon", ""] {
            let err = parse_date(input, &cfg()).unwrap_err();
            assert_eq!(err.to_string(), "Invalid DateTime", "input {input:?}");
        }
    }

    #[test]
    fn skipped_local_times_move_forward() {
        let parsed = parse_date("2025-03-30T01:30", &cfg()).unwrap();
        assert_eq!(format_iso(&parsed.datetime), "2025-03-30T02:30:00.000+01:00");
    }
}
