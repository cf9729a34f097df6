//! Tests for error handling, suggestions and exit codes.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stencil(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stencil").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_unknown_template_is_not_found() {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["render", "widget"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template not found: 'widget'"))
        .stderr(predicate::str::contains("types"))
        .stderr(predicate::str::contains("stencil list"));
}

#[test]
fn test_unknown_generate_template_lists_available() {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["generate", "user", "-f", "name", "-t", "widget", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("widget"))
        .stderr(predicate::str::contains("form"));
}

#[test]
fn test_invalid_context_json() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("bad.json"), "{ nope").unwrap();

    stencil(temp.path())
        .args(["render", "types", "--context", "bad.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid context from bad.json"));
}

#[test]
fn test_helper_failure_is_reported() {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["render", "--inline", "{{camelCase items}}", "--set", "items=[1,2]"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("camelCase"));
}

#[test]
fn test_unknown_field_type_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["generate", "user", "-f", "x:widget"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("widget"));
}

#[test]
fn test_invalid_model_name() {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["generate", "9lives", "-f", "name", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid model name"));
}

#[test]
fn test_missing_config_file_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["--config", "absent.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_missing_templates_dir() {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["--templates", "nope", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("templates directory not found"));
}

#[test]
fn test_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}
