use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;

fn command() -> Command {
    Command::cargo_bin("graveyard").expect("binary exists")
}

#[test]
fn version_flag_works() {
    let mut cmd = command();
    cmd.arg("--version");

    cmd.assert().success();
}

#[test]
#[serial]
fn scan_prints_a_table_or_an_empty_notice() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .arg("scan");

    cmd.assert().success().stdout(
        predicate::str::contains("Verdict")
            .or(predicate::str::contains("No installed applications")),
    );
}

#[test]
#[serial]
fn scan_json_emits_a_record_array() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .arg("scan")
        .arg("--json");

    let assert = cmd.assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON output");
    assert!(parsed.is_array(), "expected a JSON array, got: {parsed}");
}

#[test]
#[serial]
fn scan_limit_caps_the_record_count() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .arg("scan")
        .arg("--json")
        .arg("--limit")
        .arg("3");

    let assert = cmd.assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON output");
    assert!(parsed.as_array().unwrap().len() <= 3);
}

#[test]
#[serial]
fn remove_unknown_app_fails_with_a_clear_message() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .arg("remove")
        .arg("definitely-not-an-installed-application")
        .arg("--yes");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No application named"));
}
