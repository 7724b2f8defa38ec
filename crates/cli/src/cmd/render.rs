//! Render command implementation.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, eyre};
use protofilters_core::config::types::{Clock, FilterConfig, ResolvedConfig};
use protofilters_core::date::parse_date;
use protofilters_core::templates::engine::render_string;
use serde_json::Value;
use tracing::debug;

use crate::RenderArgs;

pub fn run(rc: &ResolvedConfig, args: &RenderArgs) -> Result<()> {
    let template = read_template(&args.template)?;
    let data = match &args.data {
        Some(path) => load_data(path)?,
        None => Value::Object(serde_json::Map::new()),
    };
    let cfg = with_fixed_now(rc.filters.clone(), args.now.as_deref())?;

    let rendered = render_string(&template, &data, &cfg)
        .wrap_err_with(|| format!("failed to render {}", args.template.display()))?;
    print!("{rendered}");
    Ok(())
}

fn read_template(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut template = String::new();
        io::stdin().read_to_string(&mut template).wrap_err("failed to read template from stdin")?;
        return Ok(template);
    }
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read template {}", path.display()))
}

/// Read a JSON or YAML data file. The format follows the extension.
fn load_data(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read data file {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml"));

    let data: Value = if is_yaml {
        serde_yaml::from_str(&text)
            .wrap_err_with(|| format!("invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .wrap_err_with(|| format!("invalid JSON in {}", path.display()))?
    };

    debug!(path = %path.display(), yaml = is_yaml, "loaded template data");
    Ok(data)
}

fn with_fixed_now(cfg: FilterConfig, now: Option<&str>) -> Result<FilterConfig> {
    let Some(now) = now else {
        return Ok(cfg);
    };
    let instant = parse_date(now, &cfg)
        .map_err(|_| eyre!("--now expects an ISO 8601 date or date-time, got '{now}'"))?
        .datetime
        .with_timezone(&Utc);
    debug!(%instant, "using fixed clock");
    Ok(cfg.with_clock(Clock::Fixed(instant)))
}
