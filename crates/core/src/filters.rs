//! MiniJinja filter registration.
//!
//! Every filter is bound under the name templates already use (`govukDate`,
//! `formatList`, ...). Options arrive as keyword arguments:
//!
//! ```jinja
//! {{ "2021-08-17" | govukDate(truncate=true) }}
//! {{ 75 | currency(unit="USD", display="code") }}
//! ```
//!
//! Older templates pass a bare string instead (`govukDate("truncate")`); that
//! still works and logs a deprecation warning.
//!
//! Filters that cannot format their input render a short token such as
//! `Invalid DateTime` rather than failing the whole template.

use std::fmt::Display;
use std::sync::Arc;

use minijinja::value::{Kwargs, Value, ValueKind};
use minijinja::{Environment, Error, ErrorKind};
use serde::Serialize;
use tracing::debug;

use crate::array::{self, ListStyle};
use crate::config::types::FilterConfig;
use crate::date::{self, DateOptions};
use crate::number::{self, CurrencyOptions, PluralOptions};
use crate::object;
use crate::string::{self, MarkdownOptions};
use crate::utils::{normalize, normalize_value};

/// Catalogue entry for a registered filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterInfo {
    pub name: &'static str,
    pub group: &'static str,
    pub summary: &'static str,
}

const fn info(name: &'static str, group: &'static str, summary: &'static str) -> FilterInfo {
    FilterInfo { name, group, summary }
}

/// Every filter [`register_filters`] installs.
pub static FILTERS: &[FilterInfo] = &[
    info("formatList", "array", "Join items into a sentence: A, B and C"),
    info("isArray", "array", "Whether the value is an array"),
    info("rejectFromArray", "array", "Drop items whose value at a path matches"),
    info("selectFromArray", "array", "Keep items whose value at a path matches"),
    info("uniqueFromArray", "array", "Remove duplicate items"),
    info("arrayOrStringIncludes", "array", "Whether an array or string contains a value"),
    info("age", "date", "Age in weeks, months or years"),
    info("daysAgo", "date", "Whole days since a date"),
    info("duration", "date", "Add an amount of time to a date"),
    info("dateFromNow", "date", "Add an amount of time to today"),
    info("govukDate", "date", "Date in the GOV.UK style: 17 August 2021"),
    info("govukTime", "date", "Time in the GOV.UK style: 6:30pm"),
    info("govukDateTime", "date", "Date and time in the GOV.UK style"),
    info("isoDateFromDateInput", "date", "ISO 8601 date from date input values"),
    info("monthName", "date", "Name of a month from its number"),
    info("currency", "number", "Amount of money: £81,932.00"),
    info("isNumber", "number", "Whether the value is a number"),
    info("ordinal", "number", "Ordinal numeral: fourth, 22nd"),
    info("plural", "number", "Word form for a number of items"),
    info("isObject", "object", "Whether the value is an object"),
    info("objectToArray", "object", "Array of entries with their key as id"),
    info("govukMarkdown", "string", "Markdown to HTML with GOV.UK classes"),
    info("isString", "string", "Whether the value is a string"),
    info("noOrphans", "string", "Keep the last two words together"),
    info("slugify", "string", "Kebab-case slug"),
    info("startsWith", "string", "Whether a string starts with a value"),
];

/// Install every filter on `env`, reading defaults from `config`.
pub fn register_filters(env: &mut Environment<'_>, config: &FilterConfig) {
    let cfg = Arc::new(config.clone());
    register_array_filters(env);
    register_date_filters(env, &cfg);
    register_number_filters(env, &cfg);
    register_object_filters(env);
    register_string_filters(env, &cfg);
}

fn register_array_filters(env: &mut Environment<'_>) {
    env.add_filter("formatList", |value: Value, style: Option<String>| -> Result<String, Error> {
        let style = style.as_deref().map(str::parse::<ListStyle>).transpose().map_err(invalid)?;
        let style = normalize(style, ListStyle::default());
        let items = match normalize_value(&to_json(&value)?, serde_json::Value::Null) {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Null => Vec::new(),
            scalar => vec![scalar],
        };
        Ok(array::format_list(&items, style))
    });

    env.add_filter("isArray", |value: Value| -> Result<bool, Error> {
        Ok(array::is_array(&to_json(&value)?))
    });

    env.add_filter(
        "selectFromArray",
        |items: Value, path: String, wanted: Value| -> Result<Value, Error> {
            let items = json_array(&items, "selectFromArray")?;
            Ok(Value::from_serialize(array::select_from_array(&items, &path, &to_json(&wanted)?)))
        },
    );

    env.add_filter(
        "rejectFromArray",
        |items: Value, path: String, wanted: Value| -> Result<Value, Error> {
            let items = json_array(&items, "rejectFromArray")?;
            Ok(Value::from_serialize(array::reject_from_array(&items, &path, &to_json(&wanted)?)))
        },
    );

    env.add_filter("uniqueFromArray", |items: Value| -> Result<Value, Error> {
        let items = json_array(&items, "uniqueFromArray")?;
        Ok(Value::from_serialize(array::unique_from_array(&items)))
    });

    env.add_filter("arrayOrStringIncludes", |haystack: Value, needle: Value| -> Result<bool, Error> {
        Ok(array::array_or_string_includes(&to_json(&haystack)?, &to_json(&needle)?))
    });
}

fn register_date_filters(env: &mut Environment<'_>, cfg: &Arc<FilterConfig>) {
    let c = Arc::clone(cfg);
    env.add_filter(
        "age",
        move |value: Value, at: Option<String>, kwargs: Kwargs| -> Result<String, Error> {
            let at = match at {
                Some(at) => Some(at),
                None => kwargs.get::<Option<String>>("at")?,
            };
            kwargs.assert_all_used()?;
            Ok(token("age", date::age(&date_input(&value), at.as_deref(), &c)))
        },
    );

    let c = Arc::clone(cfg);
    env.add_filter("daysAgo", move |value: Value| -> Value {
        match date::days_ago(&date_input(&value), &c) {
            Ok(days) => Value::from(days),
            Err(err) => Value::from(token::<String, _>("daysAgo", Err(err))),
        }
    });

    let c = Arc::clone(cfg);
    env.add_filter(
        "duration",
        move |value: Value, amount: Value, unit: Option<String>| -> Result<String, Error> {
            let amount = whole_number(&amount)?;
            Ok(token("duration", date::duration(&date_input(&value), amount, unit.as_deref(), &c)))
        },
    );

    let c = Arc::clone(cfg);
    env.add_filter(
        "dateFromNow",
        move |amount: Value, unit: Option<String>| -> Result<String, Error> {
            let amount = whole_number(&amount)?;
            Ok(token("dateFromNow", date::date_from_now(amount, unit.as_deref(), &c)))
        },
    );

    let c = Arc::clone(cfg);
    env.add_filter(
        "govukDate",
        move |value: Value, legacy: Option<String>, kwargs: Kwargs| -> Result<String, Error> {
            let opts = date_options("govukDate", legacy.as_deref(), &kwargs)?;
            Ok(token("govukDate", date::govuk_date(&date_input(&value), &opts, &c)))
        },
    );

    let c = Arc::clone(cfg);
    env.add_filter("govukTime", move |value: Value| -> String {
        token("govukTime", date::govuk_time(&date_input(&value), &c))
    });

    let c = Arc::clone(cfg);
    env.add_filter(
        "govukDateTime",
        move |value: Value, legacy: Option<String>, kwargs: Kwargs| -> Result<String, Error> {
            let opts = date_options("govukDateTime", legacy.as_deref(), &kwargs)?;
            Ok(token("govukDateTime", date::govuk_date_time(&date_input(&value), &opts, &c)))
        },
    );

    env.add_filter(
        "isoDateFromDateInput",
        |value: Value, prefix: Option<String>| -> Result<String, Error> {
            let object = to_json(&value)?;
            Ok(token("isoDateFromDateInput", date::iso_date_from_date_input(&object, prefix.as_deref())))
        },
    );

    env.add_filter(
        "monthName",
        |value: Value, legacy: Option<String>, kwargs: Kwargs| -> Result<String, Error> {
            let opts = date_options("monthName", legacy.as_deref(), &kwargs)?;
            let month = number::as_number(&to_json(&value)?).map_or(0, |n| n as i64);
            Ok(token("monthName", date::month_name(month, &opts)))
        },
    );
}

fn register_number_filters(env: &mut Environment<'_>, cfg: &Arc<FilterConfig>) {
    let c = Arc::clone(cfg);
    env.add_filter("currency", move |value: Value, kwargs: Kwargs| -> Result<String, Error> {
        let mut opts = CurrencyOptions::from_config(&c);
        if let Some(display) = kwargs.get::<Option<String>>("display")? {
            opts.display = display.parse().map_err(invalid)?;
        }
        if let Some(unit) = kwargs.get::<Option<String>>("unit")? {
            opts.unit = unit;
        }
        if let Some(trailing_zeros) = kwargs.get::<Option<bool>>("trailingZeros")? {
            opts.trailing_zeros = trailing_zeros;
        }
        kwargs.assert_all_used()?;

        let amount = number::as_number(&normalize_value(&to_json(&value)?, 0.into()));
        Ok(token("currency", amount.and_then(|amount| number::currency(amount, &opts))))
    });

    env.add_filter("isNumber", |value: Value| -> Result<bool, Error> {
        Ok(number::is_number(&to_json(&value)?))
    });

    env.add_filter("ordinal", |value: Value| -> Result<String, Error> {
        let n = number::as_number(&to_json(&value)?);
        Ok(token("ordinal", n.map(|n| number::ordinal(n.trunc() as i64))))
    });

    env.add_filter(
        "plural",
        |value: Value, singular: String, kwargs: Kwargs| -> Result<String, Error> {
            let opts = PluralOptions {
                show_number: normalize(kwargs.get::<Option<bool>>("showNumber")?, true),
                plural: kwargs.get::<Option<String>>("plural")?,
            };
            kwargs.assert_all_used()?;

            let count = number::as_number(&to_json(&value)?);
            Ok(token("plural", count.map(|count| number::plural(count, &singular, &opts))))
        },
    );
}

fn register_object_filters(env: &mut Environment<'_>) {
    env.add_filter("isObject", |value: Value| -> Result<bool, Error> {
        Ok(object::is_object(&to_json(&value)?))
    });

    env.add_filter("objectToArray", |value: Value| -> Result<Value, Error> {
        Ok(Value::from_serialize(object::object_to_array(&to_json(&value)?)))
    });
}

fn register_string_filters(env: &mut Environment<'_>, cfg: &Arc<FilterConfig>) {
    let c = Arc::clone(cfg);
    env.add_filter("govukMarkdown", move |value: Value, kwargs: Kwargs| -> Result<Value, Error> {
        let mut opts = MarkdownOptions::from_config(&c);
        if let Some(size) = kwargs.get::<Option<String>>("headingsStartWith")? {
            opts.headings_start_with = size.parse().map_err(invalid)?;
        }
        kwargs.assert_all_used()?;
        Ok(Value::from_safe_string(string::govuk_markdown(&text_input(&value), &opts)))
    });

    env.add_filter("isString", |value: Value| -> Result<bool, Error> {
        Ok(string::is_string(&to_json(&value)?))
    });

    env.add_filter("noOrphans", |value: Value| -> Value {
        Value::from_safe_string(string::no_orphans(&text_input(&value)))
    });

    env.add_filter("slugify", |value: Value| -> String { string::slugify(&text_input(&value)) });

    env.add_filter("startsWith", |value: Value, prefix: String| -> bool {
        string::starts_with(&text_input(&value), &prefix)
    });
}

fn to_json(value: &Value) -> Result<serde_json::Value, Error> {
    serde_json::to_value(value).map_err(|err| {
        Error::new(ErrorKind::InvalidOperation, "value cannot be read as data").with_source(err)
    })
}

fn json_array(value: &Value, filter: &str) -> Result<Vec<serde_json::Value>, Error> {
    match normalize_value(&to_json(value)?, serde_json::Value::Array(Vec::new())) {
        serde_json::Value::Array(items) => Ok(items),
        _ => Err(Error::new(ErrorKind::InvalidOperation, format!("{filter} expects an array"))),
    }
}

/// Missing values (`none`, `undefined`, `false`) read as the empty string.
fn text_input(value: &Value) -> String {
    match value.kind() {
        ValueKind::Undefined | ValueKind::None => String::new(),
        ValueKind::Bool if !value.is_true() => String::new(),
        _ => value.as_str().map_or_else(|| value.to_string(), str::to_string),
    }
}

fn date_input(value: &Value) -> String {
    text_input(value)
}

fn whole_number(value: &Value) -> Result<i64, Error> {
    number::as_number(&to_json(value)?)
        .map(|n| n.trunc() as i64)
        .map_err(|err| invalid(err.to_string()))
}

fn date_options(filter: &str, legacy: Option<&str>, kwargs: &Kwargs) -> Result<DateOptions, Error> {
    let mut opts = legacy.map(|flag| DateOptions::from_legacy_flag(flag, filter)).unwrap_or_default();
    if let Some(truncate) = kwargs.get::<Option<bool>>("truncate")? {
        opts.truncate = truncate;
    }
    if let Some(show_weekday) = kwargs.get::<Option<bool>>("showWeekday")? {
        opts.show_weekday = show_weekday;
    }
    if let Some(time_first) = kwargs.get::<Option<bool>>("timeFirst")? {
        opts.time_first = time_first;
    }
    kwargs.assert_all_used()?;
    Ok(opts)
}

/// Render a filter failure as its template token.
fn token<T: Display, E: Display>(filter: &str, result: Result<T, E>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(err) => {
            debug!(filter, error = %err, "filter could not format its input");
            err.to_string()
        }
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::InvalidOperation, message.into())
}
