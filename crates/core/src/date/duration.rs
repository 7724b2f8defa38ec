//! Date arithmetic.
//!
//! Supports:
//! - `duration("2023-05-11", 5, "days")` → `2023-05-16T00:00:00.000+01:00`
//! - `duration("today", -2, "weeks")`
//! - `duration("2023-01-31", 1, "months")` → `2023-02-28T00:00:00.000+00:00`
//!
//! Calendar units (days and up) keep the wall-clock time across daylight
//! saving changes; minutes and hours move the instant.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::config::types::FilterConfig;
use crate::date::parse::{DateError, format_iso, localize, parse_date};

/// Units for duration offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationUnit {
    Minutes,
    Hours,
    #[default]
    Days,
    Weeks,
    Months,
    Years,
}

impl FromStr for DurationUnit {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minute" | "minutes" => Ok(Self::Minutes),
            "hour" | "hours" => Ok(Self::Hours),
            "day" | "days" => Ok(Self::Days),
            "week" | "weeks" => Ok(Self::Weeks),
            "month" | "months" => Ok(Self::Months),
            "year" | "years" => Ok(Self::Years),
            _ => Err(DateError::InvalidUnit(s.to_string())),
        }
    }
}

/// Return the date a number of units away from another date.
///
/// `unit` defaults to days. The result is a full ISO 8601 date-time in the
/// configured zone.
pub fn duration(
    input: &str,
    amount: i64,
    unit: Option<&str>,
    cfg: &FilterConfig,
) -> Result<String, DateError> {
    let unit = unit.map_or(Ok(DurationUnit::Days), str::parse)?;
    let start = parse_date(input, cfg)?.datetime;
    let shifted = shift(start, amount, unit)?;
    Ok(format_iso(&shifted))
}

/// Return the date a number of units from today.
pub fn date_from_now(
    amount: i64,
    unit: Option<&str>,
    cfg: &FilterConfig,
) -> Result<String, DateError> {
    duration("today", amount, unit, cfg)
}

fn shift(start: DateTime<Tz>, amount: i64, unit: DurationUnit) -> Result<DateTime<Tz>, DateError> {
    let overflow = || DateError::OutOfRange(format!("{start} + {amount} {unit:?}"));

    let absolute = match unit {
        DurationUnit::Minutes => Duration::try_minutes(amount),
        DurationUnit::Hours => Duration::try_hours(amount),
        _ => None,
    };
    if let Some(delta) = absolute {
        return start.checked_add_signed(delta).ok_or_else(overflow);
    }
    if matches!(unit, DurationUnit::Minutes | DurationUnit::Hours) {
        return Err(overflow());
    }

    let civil = start.naive_local();
    let date = match unit {
        DurationUnit::Days => Duration::try_days(amount)
            .and_then(|d| civil.date().checked_add_signed(d)),
        DurationUnit::Weeks => Duration::try_weeks(amount)
            .and_then(|d| civil.date().checked_add_signed(d)),
        DurationUnit::Months => add_months(civil.date(), amount),
        DurationUnit::Years => amount.checked_mul(12).and_then(|m| add_months(civil.date(), m)),
        DurationUnit::Minutes | DurationUnit::Hours => None,
    }
    .ok_or_else(overflow)?;

    localize(NaiveDateTime::new(date, civil.time()), None, start.timezone())
}

/// Add calendar months, clamping the day to the end of the target month.
fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let year = i64::from(date.year());
    let month = i64::from(date.month());
    let day = date.day();

    let total_months = (year * 12 + month - 1).checked_add(months)?;
    let new_year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let new_month = (total_months.rem_euclid(12) + 1) as u32;

    // Handle day overflow (e.g., Jan 31 + 1 month = Feb 28/29)
    let new_day = day.min(days_in_month(new_year, new_month));

    NaiveDate::from_ymd_opt(new_year, new_month, new_day)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}
