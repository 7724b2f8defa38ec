//! Relative ages and day counts.

use chrono::Datelike;

use crate::config::types::FilterConfig;
use crate::date::parse::{DateError, parse_date};
use crate::number::inflect::{PluralOptions, plural};

const MS_PER_DAY: i64 = 86_400_000;

/// Mean Gregorian year, 365.25 days.
const MS_PER_YEAR: f64 = 3.155_76e10;

/// Describe how old something is, per the NHS content guide on ages.
///
/// Weeks until 6 months old, months until 2 years old, years after that.
/// `at` is the date to measure to and defaults to now.
///
/// See <https://service-manual.nhs.uk/content/inclusive-content/age>
pub fn age(input: &str, at: Option<&str>, cfg: &FilterConfig) -> Result<String, DateError> {
    let born = parse_date(input, cfg)?.datetime;
    let reference = match at {
        Some(at) => parse_date(at, cfg)?.datetime,
        None => cfg.now(),
    };

    let elapsed_ms = (reference - born).num_milliseconds();
    let days = elapsed_ms as f64 / MS_PER_DAY as f64;

    if days > 0.0 && days < 183.0 {
        let weeks = (days / 7.0).floor().max(1.0);
        return Ok(plural(weeks, "week", &PluralOptions::default()));
    }

    let months = (reference.year() - born.year()) * 12
        + (reference.month() as i32 - born.month() as i32)
        - i32::from(reference.day() < born.day());
    if months < 24 {
        return Ok(format!("{months} months"));
    }

    let years = (elapsed_ms as f64 / MS_PER_YEAR).floor() as i64;
    Ok(format!("{years} years"))
}

/// Whole days between the date and now, in civil time.
///
/// Today is `0`, yesterday `1`, tomorrow `-1`. Partial days round down.
pub fn days_ago(input: &str, cfg: &FilterConfig) -> Result<i64, DateError> {
    let date = parse_date(input, cfg)?.datetime;
    let elapsed = cfg.now().naive_local() - date.naive_local();
    Ok(elapsed.num_milliseconds().div_euclid(MS_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Clock;
    use crate::date::parse::format_iso;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    fn cfg() -> FilterConfig {
        // 15 October 2025 at 10:00am UTC
        let now = Utc.timestamp_millis_opt(1_760_522_400_000).unwrap();
        FilterConfig::default().with_clock(Clock::Fixed(now))
    }

    #[rstest]
    #[case("2025-10-14", "1 week")]
    #[case("2025-10-02", "1 week")]
    #[case("2025-10-01", "2 weeks")]
    #[case("2025-09-14", "4 weeks")]
    #[case("2025-04-16", "26 weeks")]
    fn weeks_until_six_months(#[case] born: &str, #[case] expected: &str) {
        assert_eq!(age(born, None, &cfg()).unwrap(), expected);
    }

    #[rstest]
    #[case("2025-04-15", "6 months")]
    #[case("2023-10-16", "23 months")]
    fn months_until_two_years(#[case] born: &str, #[case] expected: &str) {
        assert_eq!(age(born, None, &cfg()).unwrap(), expected);
    }

    #[rstest]
    #[case("2023-10-15", "2 years")]
    #[case("2022-10-16", "2 years")]
    #[case("2022-10-15", "3 years")]
    #[case("2022-10-14", "3 years")]
    fn years_after_two(#[case] born: &str, #[case] expected: &str) {
        assert_eq!(age(born, None, &cfg()).unwrap(), expected);
    }

    #[test]
    fn age_at_reference_date() {
        assert_eq!(age("2000-01-25", Some("2025-01-25"), &cfg()).unwrap(), "25 years");
    }

    #[test]
    fn age_error_token() {
        assert_eq!(age("2024-12-32", None, &cfg()).unwrap_err().to_string(), "Invalid DateTime");
        assert!(age("2024-12-01", Some("later"), &cfg()).is_err());
    }

    #[test]
    fn days_ago_counts_civil_days() {
        let cfg = cfg();
        let now = cfg.now();
        let almost_a_day_ago = now - Duration::days(1) + Duration::seconds(1);
        let almost_a_day_ahead = now + Duration::days(1) - Duration::seconds(1);

        assert_eq!(days_ago(&format_iso(&now), &cfg).unwrap(), 0);
        assert_eq!(days_ago(&format_iso(&almost_a_day_ago), &cfg).unwrap(), 0);
        assert_eq!(days_ago("2025-10-14", &cfg).unwrap(), 1);
        assert_eq!(days_ago("2025-10-15", &cfg).unwrap(), 0);
        assert_eq!(days_ago("2025-10-16", &cfg).unwrap(), -1);
        assert_eq!(days_ago(&format_iso(&almost_a_day_ahead), &cfg).unwrap(), -1);
        assert_eq!(days_ago("today", &cfg).unwrap(), 0);
        assert_eq!(days_ago("2025-10-01", &cfg).unwrap(), 14);
    }

    #[test]
    fn days_ago_error_token() {
        assert_eq!(days_ago("2021-23-45", &cfg()).unwrap_err().to_string(), "Invalid DateTime");
    }
}
