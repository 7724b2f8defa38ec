use assert_cmd::prelude::*;
use predicates::prelude::*;
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

#[test]
fn doctor_fails_when_explicit_config_missing() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("nope.toml");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pfilters"));
    cmd.args(["doctor", "--config", missing.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("FAIL pfilters doctor"))
        .stdout(predicate::str::contains("config file not found"));
}

#[test]
fn doctor_fails_on_bad_time_zone() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    write_file(&cfg, "version = 1\n[locale]\ntime_zone = \"Mars/Olympus\"\n");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pfilters"));
    cmd.args(["doctor", "--config", cfg.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("unknown time zone 'Mars/Olympus'"));
}
