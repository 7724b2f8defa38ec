use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_logging_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("logs/pfilters.log");

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1

[logging]
level = "warn"
file_level = "debug"
file = "{}"
"#,
        log_file.display()
    );
    fs::write(&config_path, &config_content).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pfilters"));
    cmd.arg("--config").arg(&config_path).arg("doctor").env_remove("RUST_LOG").assert().success();

    assert!(log_file.exists(), "Log file should be created");
}

#[test]
fn test_filter_warnings_reach_log_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("pfilters.log");

    let config_path = root.join("config.toml");
    let config_content = format!(
        "version = 1\n[logging]\nlevel = \"error\"\nfile_level = \"warn\"\nfile = \"{}\"\n",
        log_file.display()
    );
    fs::write(&config_path, &config_content).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pfilters"));
    cmd.arg("--config")
        .arg(&config_path)
        .args(["render", "-"])
        .write_stdin("{{ 3 | monthName('truncate') }}")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("Mar");

    let log = fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("deprecated"), "log was: {log}");
}
