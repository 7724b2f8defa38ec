use std::path::PathBuf;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::date::MiddayMidnight;
use crate::number::currency::CurrencyDisplay;
use crate::string::markdown::HeadingSize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocaleConfig {
    /// IANA zone used to resolve `today`, `now` and offset-less inputs.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default)]
    pub midday_midnight: MiddayMidnight,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { time_zone: default_time_zone(), midday_midnight: MiddayMidnight::default() }
    }
}

fn default_time_zone() -> String {
    "Europe/London".to_string()
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MarkdownConfig {
    #[serde(default)]
    pub headings_start_with: HeadingSize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency_unit")]
    pub unit: String,
    #[serde(default)]
    pub display: CurrencyDisplay,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self { unit: default_currency_unit(), display: CurrencyDisplay::default() }
    }
}

fn default_currency_unit() -> String {
    "GBP".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Source of the current instant for `today` and `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    System,
    /// Always report the same instant. Used for reproducible renders and tests.
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(instant) => *instant,
        }
    }
}

/// Everything a filter needs beyond its arguments.
///
/// Filters never read ambient state: the zone, the clock and the house
/// style choices all travel in this value.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub time_zone: Tz,
    pub clock: Clock,
    pub midday_midnight: MiddayMidnight,
    pub headings_start_with: HeadingSize,
    pub currency_unit: String,
    pub currency_display: CurrencyDisplay,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::Europe::London,
            clock: Clock::System,
            midday_midnight: MiddayMidnight::default(),
            headings_start_with: HeadingSize::default(),
            currency_unit: default_currency_unit(),
            currency_display: CurrencyDisplay::default(),
        }
    }
}

impl FilterConfig {
    /// The current instant in the configured zone.
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.time_zone)
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// File the configuration came from, if any.
    pub source: Option<PathBuf>,
    pub filters: FilterConfig,
    pub logging: LoggingConfig,
}
