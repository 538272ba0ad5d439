//! Exit codes and error messages.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn missing_config_file_is_not_found() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("tachi")
        .current_dir(dir.path())
        .args(["validate", "-c", "does-not-exist.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("tachi init"));
}

#[test]
fn malformed_yaml_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.yaml"), "name: [unclosed\n").unwrap();

    cargo_bin_cmd!("tachi")
        .current_dir(dir.path())
        .args(["validate", "-c", "bad.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Malformed input"));
}

#[test]
fn wrong_field_type_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bad.yaml"),
        "name: t\nservices:\n  - name: api\n    port: [80]\n",
    )
    .unwrap();

    cargo_bin_cmd!("tachi")
        .current_dir(dir.path())
        .args(["validate", "-c", "bad.yaml"])
        .assert()
        .code(2);
}

#[test]
fn unknown_subcommand_is_usage_error() {
    cargo_bin_cmd!("tachi")
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn quiet_and_verbose_conflict() {
    cargo_bin_cmd!("tachi")
        .args(["-q", "-v", "settings", "path"])
        .assert()
        .code(2);
}

#[test]
fn missing_settings_file_is_a_settings_error() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("tachi")
        .current_dir(dir.path())
        .args(["--settings", "nope.toml", "settings", "list"])
        .assert()
        .code(4);
}

#[test]
fn invalid_default_strategy_in_settings_is_a_settings_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("settings.toml"),
        "[defaults]\nstrategy = \"gitflow\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("tachi")
        .current_dir(dir.path())
        .args(["--settings", "settings.toml", "settings", "list"])
        .assert()
        .code(4);
}

#[test]
fn unknown_settings_key_is_a_settings_error() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("tachi")
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["settings", "get", "nope.key"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown settings key"));
}

#[test]
fn verbose_flag_shows_error_causes() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("tachi")
        .current_dir(dir.path())
        .args(["-v", "validate", "-c", "missing.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
