//! Date and time filters following the GOV.UK and NHS content style guides.
//!
//! All filters resolve dates in the zone carried by [`FilterConfig`]:
//! - `today` / `now` read the configured [`Clock`]
//! - ISO strings without an offset are civil times in that zone
//! - ISO strings with an offset are converted into that zone
//!
//! [`FilterConfig`]: crate::config::types::FilterConfig
//! [`Clock`]: crate::config::types::Clock

pub mod age;
pub mod duration;
pub mod govuk;
pub mod input;
pub mod options;
pub mod parse;

pub use age::{age, days_ago};
pub use duration::{DurationUnit, date_from_now, duration};
pub use govuk::{govuk_date, govuk_date_time, govuk_time, month_label, month_name};
pub use input::{iso_date_from_date_input, parse_month};
pub use options::{DateOptions, MiddayMidnight};
pub use parse::{DateError, ParsedDate, Precision, format_iso, parse_date};
