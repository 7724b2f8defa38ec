use serde::{Deserialize, Serialize};
use tracing::warn;

/// Options shared by the date filters.
///
/// Each filter reads the flags that apply to it and ignores the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateOptions {
    /// Prefix the date with the day of the week.
    pub show_weekday: bool,
    /// Use three-letter month and weekday names.
    pub truncate: bool,
    /// Put the time before the date (`6:30pm on 17 August 2021`).
    pub time_first: bool,
}

impl DateOptions {
    pub fn truncated() -> Self {
        Self { truncate: true, ..Self::default() }
    }

    /// Map the deprecated bare-string argument onto the equivalent flag.
    ///
    /// Older templates pass `'truncate'` or `'on'` instead of keyword
    /// arguments. Any other string sets nothing.
    pub fn from_legacy_flag(flag: &str, filter: &str) -> Self {
        let option = if flag == "on" { "timeFirst" } else { "truncate" };
        warn!(
            filter,
            flag,
            "passing '{flag}' to {filter} is deprecated, use the {option} option instead"
        );

        Self { truncate: flag == "truncate", time_first: flag == "on", ..Self::default() }
    }
}

/// How exactly 12 o'clock is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MiddayMidnight {
    /// `12am (midnight)` and `12pm (midday)`
    #[default]
    Parenthetical,
    /// `midnight` and `midday`
    Word,
}
