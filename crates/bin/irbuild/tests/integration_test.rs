//! End-to-end tests for the irbuild binary.
//!
//! Each test writes a build file to a temporary directory, runs the compiled
//! binary against it and inspects the JSON summary on stdout.

use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn irbuild() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_irbuild"));
    cmd.env_remove("IRBUILD_CONFIG")
        .env_remove("IRBUILD_PLATFORM")
        .env_remove("IRBUILD_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write `content` as `irbuild.toml` in a fresh directory.
fn build_dir(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("irbuild.toml"), content).unwrap();
    dir
}

fn run(content: &str) -> Output {
    let dir = build_dir(content);
    irbuild()
        .arg(dir.path().join("irbuild.toml"))
        .output()
        .unwrap()
}

fn summary(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

const DECLARED: &str = "
[[sensor]]
platform = 'dallas'
id = 'temp_sensor_1'

[[remote_transmitter]]
id = 'ir_tx'
pin = 14
";

// ---------------------------------------------------------------------------
// Successful builds
// ---------------------------------------------------------------------------

#[test]
fn should_build_device_without_sensor() {
    let output = run(&format!(
        "{DECLARED}\n[[climate]]\nplatform = 'whynter'\nid = 'ac1'\n"
    ));
    let json = summary(&output);

    assert_eq!(json["platform"], "esp32");
    assert_eq!(json["loaded_components"], serde_json::json!(["climate_ir"]));
    let devices = json["devices"].as_array().unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0]["id"], "ac1");
    assert_eq!(devices[0]["type"], "whynter::WhynterClimate");
    assert_eq!(devices[0]["transmitter"], "ir_tx");
    assert!(devices[0]["sensor"].is_null());
    assert_eq!(devices[0]["traits"]["supports_current_temperature"], false);
}

#[test]
fn should_build_device_with_sensor() {
    let output = run(&format!(
        "{DECLARED}\n[[climate]]\nplatform = 'whynter'\nid = 'ac2'\nsensor = 'temp_sensor_1'\n"
    ));
    let json = summary(&output);

    let device = &json["devices"][0];
    assert_eq!(device["id"], "ac2");
    assert_eq!(device["sensor"], "temp_sensor_1");
    assert_eq!(device["traits"]["supports_current_temperature"], true);
}

#[test]
fn should_build_several_devices_in_declaration_order() {
    let output = run(&format!(
        "{DECLARED}
[[climate]]
platform = 'whynter'
name = 'Living room'

[[climate]]
platform = 'whynter'
id = 'ac2'
supports_heat = false
"
    ));
    let json = summary(&output);

    let devices = json["devices"].as_array().unwrap();
    assert_eq!(devices[0]["id"], "whynter_whynterclimate_id");
    assert_eq!(devices[0]["name"], "Living room");
    assert_eq!(devices[1]["id"], "ac2");
    let modes = devices[1]["traits"]["supported_modes"].as_array().unwrap();
    assert!(!modes.contains(&Value::from("heat")));
}

#[test]
fn should_honour_target_platform() {
    let output = run(&format!(
        "[build]\nplatform = 'esp8266'\n{DECLARED}\n[[climate]]\nplatform = 'whynter'\nid = 'ac1'\n"
    ));
    let json = summary(&output);
    assert_eq!(json["platform"], "esp8266");
    assert_eq!(json["devices"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Failed builds
// ---------------------------------------------------------------------------

#[test]
fn should_fail_without_output_when_sensor_unknown() {
    let output = run(&format!(
        "{DECLARED}\n[[climate]]\nplatform = 'whynter'\nid = 'ac3'\nsensor = 'nope'\n"
    ));

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope"), "stderr: {stderr}");
}

#[test]
fn should_fail_when_platform_missing() {
    let output = run(&format!("{DECLARED}\n[[climate]]\nid = 'ac1'\n"));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("climate -> 0 -> platform"), "stderr: {stderr}");
}

#[test]
fn should_fail_when_named_build_file_missing() {
    let dir = TempDir::new().unwrap();
    let output = irbuild()
        .arg(dir.path().join("typo_irbuild.tmol"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("typo_irbuild.tmol"), "stderr: {stderr}");
}

#[test]
fn should_fail_when_build_file_from_env_missing() {
    let dir = TempDir::new().unwrap();
    let output = irbuild()
        .env("IRBUILD_CONFIG", dir.path().join("missing.toml"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn should_fail_on_malformed_build_file() {
    let output = run("[[climate]\nplatform = ");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[test]
fn should_print_usage_instead_of_building_on_help() {
    let output = irbuild().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout: {stdout}");
    assert!(serde_json::from_str::<Value>(&stdout).is_err());
}

#[test]
fn should_reject_unknown_flag() {
    let output = irbuild().arg("--frobnicate").output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn should_read_build_file_named_by_env() {
    let dir = build_dir(&format!(
        "{DECLARED}\n[[climate]]\nplatform = 'whynter'\nid = 'ac1'\n"
    ));
    let output = irbuild()
        .env("IRBUILD_CONFIG", dir.path().join("irbuild.toml"))
        .output()
        .unwrap();

    assert_eq!(summary(&output)["devices"][0]["id"], "ac1");
}

#[test]
fn should_build_nothing_when_default_file_absent() {
    let dir = TempDir::new().unwrap();
    let output = irbuild().current_dir(dir.path()).output().unwrap();

    let json = summary(&output);
    assert!(json["devices"].as_array().unwrap().is_empty());
}
