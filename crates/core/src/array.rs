//! Array filters.

use std::str::FromStr;

use serde_json::Value;

use crate::utils::{display_value, get};

/// How [`format_list`] joins the last two items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListStyle {
    /// `England, Scotland and Wales`
    #[default]
    Conjunction,
    /// `England, Scotland or Wales`
    Disjunction,
    /// `England, Scotland, Wales`
    Unit,
}

impl FromStr for ListStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conjunction" => Ok(Self::Conjunction),
            "disjunction" => Ok(Self::Disjunction),
            "unit" => Ok(Self::Unit),
            other => Err(format!("unknown list type {other}")),
        }
    }
}

/// Join items into a sentence the way GOV.UK writes lists.
///
/// No serial comma: `A, B and C`.
pub fn format_list(items: &[Value], style: ListStyle) -> String {
    let words: Vec<String> = items.iter().map(display_value).collect();

    let (init, last) = match words.as_slice() {
        [] => return String::new(),
        [only] => return only.clone(),
        [init @ .., last] => (init.join(", "), last),
    };

    match style {
        ListStyle::Conjunction => format!("{init} and {last}"),
        ListStyle::Disjunction => format!("{init} or {last}"),
        ListStyle::Unit => format!("{init}, {last}"),
    }
}

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

/// Items whose value at `path` matches `value`.
///
/// When `value` is an array an item matches if its value equals any element.
pub fn select_from_array(items: &[Value], path: &str, value: &Value) -> Vec<Value> {
    items.iter().filter(|item| matches_at(item, path, value)).cloned().collect()
}

/// Items whose value at `path` does not match `value`.
pub fn reject_from_array(items: &[Value], path: &str, value: &Value) -> Vec<Value> {
    items.iter().filter(|item| !matches_at(item, path, value)).cloned().collect()
}

fn matches_at(item: &Value, path: &str, wanted: &Value) -> bool {
    let Some(found) = get(item, path) else {
        return false;
    };
    match wanted {
        Value::Array(any_of) => any_of.contains(found),
        one => one == found,
    }
}

/// Remove duplicates, keeping the first occurrence of each item.
pub fn unique_from_array(items: &[Value]) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    unique
}

/// Whether an array contains an item, or a string contains a substring.
pub fn array_or_string_includes(haystack: &Value, needle: &Value) -> bool {
    match haystack {
        Value::Array(items) => items.contains(needle),
        Value::String(text) => text.contains(&display_value(needle)),
        _ => false,
    }
}
