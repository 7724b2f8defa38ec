//! Number filters: currency, ordinals and pluralisation.

pub mod currency;
pub mod inflect;
pub mod ordinal;

use serde_json::Value;
use thiserror::Error;

pub use currency::{CurrencyDisplay, CurrencyOptions, currency};
pub use inflect::{PluralOptions, plural};
pub use ordinal::ordinal;

/// Error type for number filters. The display text is the template token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NumberError {
    #[error("Invalid number")]
    NotANumber(String),

    #[error("Invalid number")]
    OutOfRange(String),

    #[error("Invalid currency code {0}")]
    InvalidCurrency(String),
}

/// Whether the value is a number. Numeric strings are not numbers.
pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

/// Read a value as a finite number. Numeric strings such as form input
/// are converted.
pub fn as_number(value: &Value) -> Result<f64, NumberError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| NumberError::NotANumber(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_only() {
        assert!(is_number(&json!(1801)));
        assert!(is_number(&json!(18.01)));
        assert!(!is_number(&json!("1801")));
        assert!(!is_number(&Value::Null));
        assert!(!is_number(&json!(false)));
    }

    #[test]
    fn as_number_rejects_non_numbers() {
        assert_eq!(as_number(&json!(75.5)).unwrap(), 75.5);
        assert_eq!(as_number(&json!(" 75 ")).unwrap(), 75.0);
        assert_eq!(as_number(&json!("lots")).unwrap_err().to_string(), "Invalid number");
        assert!(as_number(&json!([])).is_err());
    }
}
