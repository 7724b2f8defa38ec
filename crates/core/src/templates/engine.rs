use minijinja::{Environment, UndefinedBehavior};
use serde_json::Value;
use thiserror::Error;

use crate::config::types::FilterConfig;
use crate::filters::register_filters;

#[derive(Debug, Error)]
pub enum TemplateRenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("render context must be an object, got {0}")]
    Context(&'static str),
}

/// Build an environment with every filter installed.
///
/// Undefined variables render as empty strings, the way prototype
/// templates expect missing session data to behave.
pub fn environment(cfg: &FilterConfig) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Lenient);
    env.set_keep_trailing_newline(true);
    register_filters(&mut env, cfg);
    env
}

/// Render a template string against a JSON context.
///
/// `ctx` must be an object or `null`; its keys become template variables.
pub fn render_string(
    template: &str,
    ctx: &Value,
    cfg: &FilterConfig,
) -> Result<String, TemplateRenderError> {
    let kind = match ctx {
        Value::Object(_) | Value::Null => None,
        Value::Array(_) => Some("array"),
        Value::String(_) => Some("string"),
        Value::Number(_) => Some("number"),
        Value::Bool(_) => Some("boolean"),
    };
    if let Some(kind) = kind {
        return Err(TemplateRenderError::Context(kind));
    }

    let env = environment(cfg);
    let rendered = match ctx {
        Value::Null => env.render_str(template, minijinja::context! {})?,
        ctx => env.render_str(template, ctx)?,
    };
    tracing::debug!(bytes = rendered.len(), "rendered template");
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Clock;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn cfg() -> FilterConfig {
        let now = Utc.with_ymd_and_hms(2025, 1, 29, 17, 30, 0).unwrap();
        FilterConfig::default().with_clock(Clock::Fixed(now))
    }

    #[test]
    fn test_render_with_context() {
        let out = render_string("Hello {{ name }}", &json!({"name": "Sally"}), &cfg()).unwrap();
        assert_eq!(out, "Hello Sally");
    }

    #[test]
    fn test_missing_variables_are_empty() {
        let out = render_string("[{{ missing }}]", &Value::Null, &cfg()).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_filters_are_installed() {
        let out = render_string("{{ 'today' | govukDate }}", &json!({}), &cfg()).unwrap();
        assert_eq!(out, "29 January 2025");
    }

    #[test]
    fn test_trailing_newline_kept() {
        let out = render_string("line\n", &json!({}), &cfg()).unwrap();
        assert_eq!(out, "line\n");
    }

    #[test]
    fn test_context_must_be_object() {
        let err = render_string("x", &json!([1, 2]), &cfg()).unwrap_err();
        assert!(matches!(err, TemplateRenderError::Context("array")));
    }

    #[test]
    fn test_syntax_error() {
        let err = render_string("{{ unclosed", &json!({}), &cfg()).unwrap_err();
        assert!(matches!(err, TemplateRenderError::Template(_)));
    }
}
