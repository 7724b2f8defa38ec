use assert_cmd::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn normalize_paths(s: &str) -> String {
    s.lines()
        .map(|line| if line.starts_with("path: ") { "path: <CFG>" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn doctor_snapshot() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    let toml = r#"
version = 1

[locale]
time_zone = "Europe/London"
midday_midnight = "word"

[markdown]
headings_start_with = "l"

[currency]
unit = "GBP"
display = "code"

[logging]
level = "warn"
"#;
    write_file(&cfg, toml);

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("pfilters"))
        .args(["doctor", "--config", cfg.to_str().unwrap()])
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    insta::assert_snapshot!(normalize_paths(&out), @r"
    OK   pfilters doctor
    version: 0.1.0
    path: <CFG>
    locale.time_zone: Europe/London
    locale.midday_midnight: word
    markdown.headings_start_with: l
    currency.unit: GBP
    currency.display: code
    logging.level: warn
    filters: 26
    ");
}
