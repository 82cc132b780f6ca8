use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A cloudctl invocation isolated from the user's environment and config.
fn cloudctl(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cloudctl").unwrap();
    cmd.env("CLOUDCTL_CONFIG", config_dir.path().join("config.yaml"))
        .env_remove("CLOUDCTL_URL")
        .env_remove("CLOUDCTL_TOKEN")
        .env_remove("CLOUDCTL_CONTEXT")
        .env_remove("CLOUDCTL_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help_command() {
    let dir = TempDir::new().unwrap();
    cloudctl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gateway"))
        .stdout(predicate::str::contains("s3"));
}

#[test]
fn test_missing_required_flag_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    cloudctl(&dir)
        .args(["gateway", "create", "--name", "edge", "--project", "p1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--pipes"));
}

#[test]
fn test_malformed_pipes_fail_before_any_request() {
    let dir = TempDir::new().unwrap();
    cloudctl(&dir)
        .args([
            "--api-url",
            "http://127.0.0.1:1",
            "gateway",
            "create",
            "--name",
            "edge",
            "--project",
            "p1",
            "--pipes",
            "svc1:70000:backend.internal",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("out of range"))
        .stderr(predicate::str::contains("request to").not());
}

#[test]
fn test_malformed_flags_win_over_missing_endpoint() {
    let dir = TempDir::new().unwrap();
    cloudctl(&dir)
        .args([
            "gateway",
            "create",
            "--name",
            "edge",
            "--project",
            "p1",
            "--pipes",
            "svc:70000:x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"))
        .stderr(predicate::str::contains("no API URL configured").not());
    cloudctl(&dir)
        .args(["cluster", "update", "c1", "--labels", "=broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"))
        .stderr(predicate::str::contains("no API URL configured").not());
}

#[test]
fn test_missing_endpoint_is_reported() {
    let dir = TempDir::new().unwrap();
    cloudctl(&dir)
        .args(["cluster", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API URL configured"));
}

#[test]
fn test_completion_query_degrades_to_nothing() {
    let dir = TempDir::new().unwrap();
    cloudctl(&dir)
        .args(["--api-url", "http://127.0.0.1:1", "__complete", "clusters"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_completion_script() {
    let dir = TempDir::new().unwrap();
    cloudctl(&dir)
        .args(["completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef cloudctl"))
        .stdout(predicate::str::contains("kind=s3-partitions"))
        .stdout(predicate::str::contains(r#"cloudctl __complete "$kind""#));
}

#[test]
fn test_context_round_trip() {
    let dir = TempDir::new().unwrap();
    cloudctl(&dir)
        .args(["context", "set", "dev", "--url", "http://localhost:8080"])
        .assert()
        .success();
    cloudctl(&dir)
        .args(["context", "set", "prod", "--url", "https://api.example.com"])
        .assert()
        .success();
    cloudctl(&dir)
        .args(["context", "use", "prod"])
        .assert()
        .success();
    cloudctl(&dir)
        .args(["context", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* prod"))
        .stdout(predicate::str::contains("  dev"));
    cloudctl(&dir)
        .args(["__complete", "contexts"])
        .assert()
        .success()
        .stdout("dev\nprod\n");
}
