//! Dates and times in the GOV.UK style.
//!
//! See <https://www.gov.uk/guidance/style-guide/a-to-z-of-gov-uk-style#dates>
//! and the `#times` entry of the same guide.

use chrono::{Datelike, NaiveTime, Timelike, Weekday};

use crate::config::types::FilterConfig;
use crate::date::options::{DateOptions, MiddayMidnight};
use crate::date::parse::{
    DateError, ParsedDate, Precision, is_now_keyword, parse_date,
};

static MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a month (1-12), three letters when truncated.
pub fn month_label(month: u32, truncate: bool) -> Option<&'static str> {
    let name = *MONTHS.get(month.checked_sub(1)? as usize)?;
    Some(if truncate { &name[..3] } else { name })
}

fn weekday_label(weekday: Weekday, truncate: bool) -> &'static str {
    let name = match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    if truncate { &name[..3] } else { name }
}

/// Convert an ISO 8601 date into a GOV.UK style date.
///
/// - `2021-08-17` → `17 August 2021`
/// - `2021-08-17` with `show_weekday` → `Tuesday, 17 August 2021`
/// - `2021-08-17` with `truncate` → `17 Aug 2021`
/// - `2021-08` → `August 2021`
/// - `today` → the current date
pub fn govuk_date(
    input: &str,
    opts: &DateOptions,
    cfg: &FilterConfig,
) -> Result<String, DateError> {
    let parsed = parse_date(input, cfg)?;
    Ok(format_govuk_date(&parsed, opts))
}

fn format_govuk_date(parsed: &ParsedDate, opts: &DateOptions) -> String {
    let date = parsed.datetime.date_naive();
    let month = MONTHS[date.month0() as usize];
    let month = if opts.truncate { &month[..3] } else { month };

    // A month-only input has no day to show, so no weekday either
    if parsed.precision == Precision::Month {
        return format!("{month} {}", date.year());
    }

    let mut out = String::new();
    if opts.show_weekday {
        out.push_str(weekday_label(date.weekday(), opts.truncate));
        out.push_str(", ");
    }
    out.push_str(&format!("{} {month} {}", date.day(), date.year()));
    out
}

/// Convert an ISO 8601 date-time or time into a GOV.UK style time.
///
/// - `2021-08-17T18:30:00` → `6:30pm`
/// - `2021-08-17T09:00:00` → `9am`
/// - `18:30` → `6:30pm`
/// - 12:00 → midnight or midday, written per [`MiddayMidnight`]
pub fn govuk_time(input: &str, cfg: &FilterConfig) -> Result<String, DateError> {
    let parsed = parse_date(input, cfg)?;
    Ok(format_govuk_time(parsed.datetime.time(), cfg.midday_midnight))
}

fn format_govuk_time(time: NaiveTime, policy: MiddayMidnight) -> String {
    let (pm, hour) = time.hour12();
    let meridiem = if pm { "pm" } else { "am" };

    if time.minute() != 0 {
        return format!("{hour}:{:02}{meridiem}", time.minute());
    }

    match (hour, pm, policy) {
        (12, false, MiddayMidnight::Parenthetical) => "12am (midnight)".to_string(),
        (12, true, MiddayMidnight::Parenthetical) => "12pm (midday)".to_string(),
        (12, false, MiddayMidnight::Word) => "midnight".to_string(),
        (12, true, MiddayMidnight::Word) => "midday".to_string(),
        _ => format!("{hour}{meridiem}"),
    }
}

/// Convert an ISO 8601 date-time into a GOV.UK style date and time.
///
/// - `2021-08-17T18:30:00` → `17 August 2021 at 6:30pm`
/// - with `time_first` → `6:30pm on 17 August 2021`
/// - `2021-08-17` → `17 August 2021`
/// - `18:30` → `6:30pm`
///
/// Both parts come from one parse, so an offset moves the date and the time
/// together into the configured zone. When the whole input does not parse,
/// each part is tried on its own and a failing part is written as its error
/// text.
pub fn govuk_date_time(
    input: &str,
    opts: &DateOptions,
    cfg: &FilterConfig,
) -> Result<String, DateError> {
    let input = input.trim();
    let parts = input.split_once('T').filter(|(date, _)| !date.is_empty());

    match (parse_date(input, cfg), parts) {
        (Ok(parsed), parts) if parsed.precision == Precision::Time => {
            let time = format_govuk_time(parsed.datetime.time(), cfg.midday_midnight);
            if parts.is_none() && !is_now_keyword(input) {
                return Ok(time);
            }
            Ok(join_date_time(&format_govuk_date(&parsed, opts), &time, opts))
        }
        (Ok(parsed), _) => Ok(format_govuk_date(&parsed, opts)),
        (Err(_), Some((date, time))) => {
            let date = govuk_date(date, opts, cfg).unwrap_or_else(|e| e.to_string());
            let time = govuk_time(time, cfg).unwrap_or_else(|e| e.to_string());
            Ok(join_date_time(&date, &time, opts))
        }
        (Err(err), None) => Err(err),
    }
}

fn join_date_time(date: &str, time: &str, opts: &DateOptions) -> String {
    if opts.time_first { format!("{time} on {date}") } else { format!("{date} at {time}") }
}

/// Convert a month number into its name.
///
/// - `3` → `March`
/// - `3` with `truncate` → `Mar`
/// - `9` with `truncate` → `Sep`
pub fn month_name(number: i64, opts: &DateOptions) -> Result<String, DateError> {
    u32::try_from(number)
        .ok()
        .and_then(|month| month_label(month, opts.truncate))
        .map(str::to_string)
        .ok_or_else(|| DateError::InvalidMonth(number.to_string()))
}
