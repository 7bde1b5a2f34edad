//! CLI integration tests
//!
//! End-to-end tests for the nepsum binary using assert_cmd.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use support::summary_body;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get the nepsum binary for testing
fn nepsum_cmd() -> Command {
    let mut cmd = Command::cargo_bin("nepsum").unwrap();
    for var in [
        "NEPSUM_ENDPOINT",
        "NEPSUM_TIMEOUT",
        "NEPSUM_LENGTH",
        "NEPSUM_LOG_LEVEL",
        "NEPSUM_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

async fn mock_service() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body()))
        .mount(&server)
        .await;
    server
}

#[test]
fn test_version_output() {
    nepsum_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nepsum"));
}

#[test]
fn test_help_shows_all_commands() {
    nepsum_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("session"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_summarize_help() {
    nepsum_cmd()
        .args(["summarize", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--text"))
        .stdout(predicate::str::contains("--length"))
        .stdout(predicate::str::contains("--endpoint"));
}

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nepsum.toml");

    nepsum_cmd()
        .args(["config", "init", "-o"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[service]"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nepsum.toml");
    std::fs::write(&config_path, "existing").unwrap();

    nepsum_cmd()
        .args(["config", "init", "-o"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_completions_bash() {
    nepsum_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nepsum"));
}

#[test]
fn test_summarize_without_input_fails() {
    nepsum_cmd()
        .args(["summarize", "-e", "http://127.0.0.1:9/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter a URL or text to summarize.",
        ));
}

#[test]
fn test_summarize_rejects_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nepsum.toml");
    std::fs::write(&config_path, "[eta]\nsmoothing_factor = 2.0\n").unwrap();

    nepsum_cmd()
        .args(["summarize", "-t", "पाठ", "-c"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("smoothing_factor"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_summarize_against_mock_service() {
    let server = mock_service().await;
    let endpoint = format!("{}/", server.uri());

    tokio::task::spawn_blocking(move || {
        nepsum_cmd()
            .args(["summarize", "--text", "नेपाल समाचार", "--json", "-e", &endpoint])
            .assert()
            .success()
            .stdout(predicate::str::contains("संक्षेप"))
            .stdout(predicate::str::contains("\"rouge1\""));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_summarize_reads_stdin() {
    let server = mock_service().await;
    let endpoint = format!("{}/", server.uri());

    tokio::task::spawn_blocking(move || {
        nepsum_cmd()
            .args(["summarize", "--file", "-", "-e", &endpoint])
            .write_stdin("आज बिहान काठमाडौंमा वर्षा भयो।")
            .assert()
            .success()
            .stdout(predicate::str::contains("ROUGE-L"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_script_prints_result_and_history() {
    let server = mock_service().await;
    let endpoint = format!("{}/", server.uri());

    tokio::task::spawn_blocking(move || {
        nepsum_cmd()
            .args(["session", "-e", &endpoint])
            .write_stdin("text\nपहिलो अनुच्छेद\nदोस्रो अनुच्छेद\n.\nsubmit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Text set (4 words)"))
            .stdout(predicate::str::contains("Submitted request #1"))
            .stdout(predicate::str::contains("संक्षेप"));
    })
    .await
    .unwrap();
}

#[test]
fn test_session_rejects_blank_submit() {
    nepsum_cmd()
        .args(["session", "-e", "http://127.0.0.1:9/"])
        .write_stdin("submit\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a URL or text"));
}
