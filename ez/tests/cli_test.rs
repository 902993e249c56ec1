//! CLI tests for the `ez` binary

mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use common::{PARIS, StubServer, gemini_reply};
use predicates::prelude::*;
use tempfile::TempDir;

/// `ez` with every directory it touches pointed into `home`
fn ez(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ez").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("GEMINI_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_tours_lists_catalog() {
    let home = TempDir::new().unwrap();
    ez(home.path())
        .arg("tours")
        .assert()
        .success()
        .stdout(predicate::str::contains("Santorini Sunset Dreams"))
        .stdout(predicate::str::contains("Amalfi Coast Escape"));
}

#[test]
fn test_tours_filters_by_category_as_json() {
    let home = TempDir::new().unwrap();
    let output = ez(home.path())
        .args(["tours", "--category", "CULTURE", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tours: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tours = tours.as_array().unwrap();
    assert_eq!(tours.len(), 1);
    assert_eq!(tours[0]["title"], "Kyoto Cultural Immersion");
    assert_eq!(tours[0]["price"], 2450);
}

#[test]
fn test_plan_requires_arguments() {
    let home = TempDir::new().unwrap();
    ez(home.path())
        .args(["plan", "--from", "New York"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--to"));
}

#[test]
fn test_plan_without_api_key_fails_fast() {
    let home = TempDir::new().unwrap();
    ez(home.path())
        .args(["plan", "--from", "New York", "--to", "Paris", "--budget", "2000 USD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_plan_with_blank_destination_is_rejected() {
    let home = TempDir::new().unwrap();
    ez(home.path())
        .env("GEMINI_API_KEY", "test-key")
        .args(["plan", "--from", "New York", "--to", "  ", "--budget", "2000 USD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required fields: Destination"));
}

#[test]
fn test_log_file_is_written() {
    let home = TempDir::new().unwrap();
    ez(home.path()).args(["tours", "-l", "debug"]).assert().success();

    let log = home.path().join("data").join("ezora").join("logs").join("ezora.log");
    if cfg!(target_os = "linux") {
        let content = fs::read_to_string(log).unwrap();
        assert!(content.contains("Logging initialized"));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plan_against_stub_service() {
    let server = StubServer::start(vec![(200, gemini_reply(PARIS))]).await;
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join(".ezora.yml"),
        format!("llm:\n  provider: gemini\n  model: gemini-test\n  base-url: {}\n", server.base_url()),
    )
    .unwrap();

    let path = home.path().to_path_buf();
    let output = tokio::task::spawn_blocking(move || {
        ez(&path)
            .env("GEMINI_API_KEY", "test-key")
            .args([
                "plan",
                "--from",
                "New York",
                "--to",
                "Paris, France",
                "--budget",
                "2000 USD",
                "--interests",
                "museums",
                "--format",
                "json",
            ])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let itinerary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(itinerary["tripTitle"], "Five Days of Art & Light in Paris");
    assert_eq!(itinerary["days"][0]["day"], 1);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].request_line.contains("gemini-test:generateContent"));
}
