//! Dates submitted through a split day/month/year form input.

use chrono::NaiveDate;
use serde_json::Value;

use crate::date::parse::DateError;

/// Accepted spellings for each month, in calendar order.
static MONTH_TOKENS: [[&str; 4]; 12] = [
    ["1", "01", "jan", "january"],
    ["2", "02", "feb", "february"],
    ["3", "03", "mar", "march"],
    ["4", "04", "apr", "april"],
    ["5", "05", "may", "may"],
    ["6", "06", "jun", "june"],
    ["7", "07", "jul", "july"],
    ["8", "08", "aug", "august"],
    ["9", "09", "sep", "september"],
    ["10", "10", "oct", "october"],
    ["11", "11", "nov", "november"],
    ["12", "12", "dec", "december"],
];

/// Resolve a month typed by a user into `1..=12`.
///
/// Case and surrounding whitespace are ignored.
pub fn parse_month(input: &str) -> Option<u32> {
    let token = input.trim().to_lowercase();
    MONTH_TOKENS
        .iter()
        .position(|spellings| spellings.contains(&token.as_str()))
        .map(|index| index as u32 + 1)
}

/// Build an ISO 8601 date from the values of a date input.
///
/// With a prefix the values are read from `<prefix>-day`, `<prefix>-month`
/// and `<prefix>-year`, otherwise from `day`, `month` and `year`. A missing
/// or zero day gives a year and month only (`2012-02`).
pub fn iso_date_from_date_input(object: &Value, prefix: Option<&str>) -> Result<String, DateError> {
    let key = |field: &str| match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{prefix}-{field}"),
        None => field.to_string(),
    };
    let field = |name: &str| component(object.get(key(name)));
    let invalid = || DateError::Unparsable(object.to_string());

    let year: i32 = field("year").and_then(|y| y.parse().ok()).ok_or_else(invalid)?;
    let month = field("month").as_deref().and_then(parse_month).ok_or_else(invalid)?;
    let day: u32 = match field("day") {
        None => 0,
        Some(day) => day.parse().map_err(|_| invalid())?,
    };

    if day == 0 {
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        return Ok(format!("{year:04}-{month:02}"));
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateError::OutOfRange(object.to_string()))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// A trimmed, non-empty component value. Numbers are accepted as typed.
fn component(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
