use chrono::{TimeZone, Utc};
use protofilters_core::config::loader::ConfigLoader;
use protofilters_core::config::types::{Clock, FilterConfig};
use protofilters_core::templates::engine::render_string;
use serde_json::json;
use std::path::Path;

fn fixed(cfg: FilterConfig) -> FilterConfig {
    // 17 August 2021 at 5:30pm UTC
    cfg.with_clock(Clock::Fixed(Utc.with_ymd_and_hms(2021, 8, 17, 17, 30, 0).unwrap()))
}

#[test]
fn renders_a_prototype_page() {
    let ctx = json!({
        "applicant": {"name": "Sally Smith", "dob-day": "7", "dob-month": "feb", "dob-year": "1990"},
        "fee": 1250.5,
        "nations": ["England", "Scotland", "Wales"],
        "submitted": "2021-08-15T09:00:00Z"
    });
    let template = "\
{{ applicant.name | noOrphans }}
Born {{ applicant | isoDateFromDateInput('dob') | govukDate }}
Fee {{ fee | currency }}
Covers {{ nations | formatList }}
Submitted {{ submitted | govukDateTime }} ({{ submitted | daysAgo }} days ago)
Due {{ 'today' | duration(2, 'weeks') | govukDate(showWeekday=true) }}
";

    let out = render_string(template, &ctx, &fixed(FilterConfig::default())).unwrap();
    insta::assert_snapshot!(out, @r"
    Sally&nbsp;Smith
    Born 7 February 1990
    Fee £1,250.50
    Covers England, Scotland and Wales
    Submitted 15 August 2021 at 10am (2 days ago)
    Due Tuesday, 31 August 2021
    ");
}

#[test]
fn config_changes_filter_defaults() {
    let toml = r#"
version = 1
[locale]
time_zone = "UTC"
midday_midnight = "word"
[markdown]
headings_start_with = "m"
[currency]
unit = "EUR"
"#;
    let rc = ConfigLoader::load_str(toml, Path::new("test.toml")).unwrap();
    let cfg = fixed(rc.filters);

    let out = render_string("{{ 3 | currency }}", &json!({}), &cfg).unwrap();
    assert_eq!(out, "€3.00");

    let out = render_string("{{ '2021-08-17T12:00:00' | govukTime }}", &json!({}), &cfg).unwrap();
    assert_eq!(out, "midday");

    let out = render_string("{{ 'now' | govukTime }}", &json!({}), &cfg).unwrap();
    assert_eq!(out, "5:30pm");

    let out = render_string("{{ '## Fees' | govukMarkdown }}", &json!({}), &cfg).unwrap();
    assert_eq!(out, "<h2 class=\"govuk-heading-s\" id=\"fees\">Fees</h2>\n");
}

#[test]
fn keyword_arguments_override_config() {
    let cfg = fixed(FilterConfig::default());
    let out =
        render_string("{{ 75 | currency(unit='USD', display='name') }}", &json!({}), &cfg).unwrap();
    assert_eq!(out, "75.00 US dollars");
}

#[test]
fn invalid_input_renders_token() {
    let cfg = fixed(FilterConfig::default());
    let out = render_string(
        "{{ 'not a date' | govukDate }} / {{ 'many' | currency }}",
        &json!({}),
        &cfg,
    )
    .unwrap();
    assert_eq!(out, "Invalid DateTime / Invalid number");
}
