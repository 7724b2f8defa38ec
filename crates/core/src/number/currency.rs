//! Currency formatting in the en-GB style.
//!
//! `81932` → `£81,932.00`, `75` in US dollars → `US$75.00`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::types::FilterConfig;
use crate::number::NumberError;

/// How the currency is identified next to the amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencyDisplay {
    /// `US$75.00`
    #[default]
    Symbol,
    /// `$75.00`
    NarrowSymbol,
    /// `USD 75.00`
    Code,
    /// `75.00 US dollars`
    Name,
}

impl FromStr for CurrencyDisplay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "symbol" => Ok(Self::Symbol),
            "narrowSymbol" => Ok(Self::NarrowSymbol),
            "code" => Ok(Self::Code),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown currency display {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyOptions {
    pub display: CurrencyDisplay,
    /// Keep `.00` on whole amounts.
    pub trailing_zeros: bool,
    /// ISO 4217 code.
    pub unit: String,
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        Self { display: CurrencyDisplay::Symbol, trailing_zeros: true, unit: "GBP".to_string() }
    }
}

impl CurrencyOptions {
    /// Options carrying the configured default unit and display.
    pub fn from_config(cfg: &FilterConfig) -> Self {
        Self {
            display: cfg.currency_display,
            trailing_zeros: true,
            unit: cfg.currency_unit.clone(),
        }
    }
}

struct CurrencyInfo {
    code: &'static str,
    symbol: &'static str,
    narrow: &'static str,
    one: &'static str,
    other: &'static str,
    digits: u32,
}

static CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "GBP", symbol: "£", narrow: "£", one: "British pound", other: "British pounds", digits: 2 },
    CurrencyInfo { code: "USD", symbol: "US$", narrow: "$", one: "US dollar", other: "US dollars", digits: 2 },
    CurrencyInfo { code: "EUR", symbol: "€", narrow: "€", one: "euro", other: "euros", digits: 2 },
    CurrencyInfo { code: "JPY", symbol: "JP¥", narrow: "¥", one: "Japanese yen", other: "Japanese yen", digits: 0 },
    CurrencyInfo { code: "CAD", symbol: "CA$", narrow: "$", one: "Canadian dollar", other: "Canadian dollars", digits: 2 },
    CurrencyInfo { code: "AUD", symbol: "A$", narrow: "$", one: "Australian dollar", other: "Australian dollars", digits: 2 },
    CurrencyInfo { code: "CHF", symbol: "CHF", narrow: "CHF", one: "Swiss franc", other: "Swiss francs", digits: 2 },
    CurrencyInfo { code: "INR", symbol: "₹", narrow: "₹", one: "Indian rupee", other: "Indian rupees", digits: 2 },
];

const NBSP: char = '\u{a0}';

/// Format a number as an amount of money.
pub fn currency(value: f64, opts: &CurrencyOptions) -> Result<String, NumberError> {
    if !value.is_finite() {
        return Err(NumberError::NotANumber(value.to_string()));
    }

    let code = opts.unit.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(NumberError::InvalidCurrency(opts.unit.clone()));
    }
    let info = CURRENCIES.iter().find(|c| c.code == code);
    let digits = info.map_or(2, |c| c.digits);

    let minor = round_to_minor_units(value.abs(), digits)?;
    let amount = format_amount(minor, digits);
    let sign = if value < 0.0 && minor != 0 { "-" } else { "" };

    let mut formatted = match opts.display {
        CurrencyDisplay::Name => {
            let name = match info {
                Some(c) if digits == 0 && minor == 1 => c.one,
                Some(c) => c.other,
                None => code.as_str(),
            };
            format!("{sign}{amount} {name}")
        }
        display => {
            let symbol = match (display, info) {
                (CurrencyDisplay::Symbol, Some(c)) => c.symbol,
                (CurrencyDisplay::NarrowSymbol, Some(c)) => c.narrow,
                _ => code.as_str(),
            };
            let gap = symbol.chars().last().filter(|c| c.is_alphabetic()).map(|_| NBSP);
            match gap {
                Some(gap) => format!("{sign}{symbol}{gap}{amount}"),
                None => format!("{sign}{symbol}{amount}"),
            }
        }
    };

    if !opts.trailing_zeros && formatted.ends_with(".00") {
        formatted.truncate(formatted.len() - 3);
    }

    Ok(formatted)
}

/// Round a non-negative amount half away from zero into minor units.
///
/// Works on the shortest decimal representation so `1.005` rounds to
/// `1.01` rather than following the binary value down.
fn round_to_minor_units(value: f64, digits: u32) -> Result<u128, NumberError> {
    let out_of_range = || NumberError::OutOfRange(value.to_string());

    let text = value.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut kept: String = fraction.chars().take(digits as usize).collect();
    while kept.len() < digits as usize {
        kept.push('0');
    }
    let round_up = fraction.chars().nth(digits as usize).is_some_and(|d| d >= '5');

    let minor: u128 = format!("{whole}{kept}").parse().map_err(|_| out_of_range())?;
    if round_up { minor.checked_add(1).ok_or_else(out_of_range) } else { Ok(minor) }
}

fn format_amount(minor: u128, digits: u32) -> String {
    let scale = 10u128.pow(digits);
    let whole = group_thousands(&(minor / scale).to_string());
    if digits == 0 {
        whole
    } else {
        format!("{whole}.{:0width$}", minor % scale, width = digits as usize)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn opts(unit: &str, display: CurrencyDisplay) -> CurrencyOptions {
        CurrencyOptions { display, unit: unit.to_string(), ..CurrencyOptions::default() }
    }

    #[rstest]
    #[case(81932.0, "£81,932.00")]
    #[case(133.666_67, "£133.67")]
    #[case(75.5, "£75.50")]
    #[case(1.005, "£1.01")]
    #[case(0.0, "£0.00")]
    #[case(1_234_567.891, "£1,234,567.89")]
    #[case(-75.5, "-£75.50")]
    fn pounds(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(currency(value, &CurrencyOptions::default()).unwrap(), expected);
    }

    #[rstest]
    #[case("USD", CurrencyDisplay::Symbol, "US$75.00")]
    #[case("USD", CurrencyDisplay::NarrowSymbol, "$75.00")]
    #[case("USD", CurrencyDisplay::Code, "USD\u{a0}75.00")]
    #[case("USD", CurrencyDisplay::Name, "75.00 US dollars")]
    #[case("usd", CurrencyDisplay::Symbol, "US$75.00")]
    #[case("EUR", CurrencyDisplay::Symbol, "€75.00")]
    #[case("JPY", CurrencyDisplay::Symbol, "JP¥75")]
    #[case("CHF", CurrencyDisplay::Symbol, "CHF\u{a0}75.00")]
    #[case("XYZ", CurrencyDisplay::Symbol, "XYZ\u{a0}75.00")]
    #[case("XYZ", CurrencyDisplay::Name, "75.00 XYZ")]
    fn other_units(#[case] unit: &str, #[case] display: CurrencyDisplay, #[case] expected: &str) {
        assert_eq!(currency(75.0, &opts(unit, display)).unwrap(), expected);
    }

    #[test]
    fn without_trailing_zeros() {
        let no_zeros = CurrencyOptions { trailing_zeros: false, ..CurrencyOptions::default() };
        assert_eq!(currency(75.0015, &no_zeros).unwrap(), "£75");
        assert_eq!(currency(75.5, &no_zeros).unwrap(), "£75.50");

        let name = CurrencyOptions {
            trailing_zeros: false,
            ..opts("USD", CurrencyDisplay::Name)
        };
        assert_eq!(currency(75.0, &name).unwrap(), "75.00 US dollars");
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            currency(f64::NAN, &CurrencyOptions::default()).unwrap_err().to_string(),
            "Invalid number"
        );
        assert_eq!(
            currency(75.0, &opts("pounds", CurrencyDisplay::Symbol)).unwrap_err().to_string(),
            "Invalid currency code pounds"
        );
    }

    #[test]
    fn display_names_parse() {
        assert_eq!("narrowSymbol".parse::<CurrencyDisplay>().unwrap(), CurrencyDisplay::NarrowSymbol);
        assert!("loud".parse::<CurrencyDisplay>().is_err());
    }
}
