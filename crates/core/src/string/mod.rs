//! String filters.

pub mod markdown;

use heck::ToKebabCase;
use serde_json::Value;

pub use markdown::{HeadingSize, MarkdownOptions, govuk_markdown};

/// Whether the value is a string.
///
/// A missing value (`null` or `false`) counts as the empty string.
pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Null | Value::Bool(false))
}

/// Join the last two words with a non-breaking space so the last word never
/// sits alone on a line.
pub fn no_orphans(text: &str) -> String {
    match text.rsplit_once(' ') {
        Some((begin, end)) => format!("{begin}&nbsp;{end}"),
        None => text.to_string(),
    }
}

/// Convert text to a kebab-case slug. Apostrophes are dropped rather than
/// splitting words, so `Don't panic` becomes `dont-panic`.
pub fn slugify(text: &str) -> String {
    let without_apostrophes: String = text.chars().filter(|c| !matches!(c, '\'' | '’')).collect();
    without_apostrophes.to_kebab_case()
}

pub fn starts_with(text: &str, prefix: &str) -> bool {
    text.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn strings_only() {
        assert!(is_string(&json!("Number 10")));
        assert!(!is_string(&json!(10)));
        assert!(!is_string(&json!(["a"])));
        assert!(is_string(&Value::Null));
    }

    #[rstest]
    #[case("Department for Education", "Department for&nbsp;Education")]
    #[case("Government", "Government")]
    #[case("", "")]
    fn orphans(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(no_orphans(input), expected);
    }

    #[rstest]
    #[case("Department for Education", "department-for-education")]
    #[case("Don't panic", "dont-panic")]
    #[case("Children’s services", "childrens-services")]
    #[case("fooBar_baz", "foo-bar-baz")]
    #[case("  Large heading!  ", "large-heading")]
    fn slugs(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn prefix() {
        assert!(starts_with("Department of Transport", "Department"));
        assert!(!starts_with("Department of Transport", "Transport"));
    }
}
