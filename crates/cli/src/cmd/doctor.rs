use protofilters_core::FILTERS;
use protofilters_core::config::loader::{ConfigLoader, default_config_path};
use serde::Serialize;
use std::path::Path;

use crate::logging;

pub fn run(config: Option<&Path>) {
    let rc = match ConfigLoader::load(config) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL pfilters doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&rc) {
        println!("FAIL pfilters doctor");
        println!("{e}");
        std::process::exit(1);
    }

    let f = &rc.filters;
    println!("OK   pfilters doctor");
    println!("version: {}", protofilters_core::version());
    println!(
        "path: {}",
        rc.source.as_ref().map_or_else(
            || format!("{} (not found, using defaults)", default_config_path().display()),
            |p| p.display().to_string()
        )
    );
    println!("locale.time_zone: {}", f.time_zone);
    println!("locale.midday_midnight: {}", label(&f.midday_midnight));
    println!("markdown.headings_start_with: {}", label(&f.headings_start_with));
    println!("currency.unit: {}", f.currency_unit);
    println!("currency.display: {}", label(&f.currency_display));
    println!("logging.level: {}", rc.logging.level);
    if let Some(ref file) = rc.logging.file {
        println!("logging.file: {}", file.display());
    }
    println!("filters: {}", FILTERS.len());
    tracing::debug!("doctor finished");
}

/// The config-file spelling of an enum setting.
fn label<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
