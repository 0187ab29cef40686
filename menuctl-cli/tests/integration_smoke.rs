//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_root_help_lists_serve() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Startup attempts"))
        .stdout(predicate::str::contains("DB_HOST"));
}

#[test]
fn test_serve_rejects_bad_port() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.arg("serve").arg("--port").arg("not-a-port");

    cmd.assert().failure();
}

#[test]
fn test_serve_exits_one_when_database_unreachable() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.env_remove("RUST_LOG")
        .args([
            "serve",
            "--db-host",
            "127.0.0.1",
            "--db-port",
            "1",
            "--db-acquire-timeout-secs",
            "1",
            "--startup-max-attempts",
            "2",
            "--startup-delay-ms",
            "10",
            "--port",
            "0",
        ])
        .timeout(std::time::Duration::from_secs(30));

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("2 attempt(s)"));
}
