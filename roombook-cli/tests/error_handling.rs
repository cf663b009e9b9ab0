//! Integration tests for error reporting and exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: Booking conflict
//! - Exit code 2: Timeout (SQLite busy)
//! - Exit code 3: No data directory found
//! - Exit code 4: Invalid input or arguments
//! - Exit code 5: I/O error
//! - Exit code 6: Other library errors
//! - Exit code 7: Configuration error
//! - Exit code 8: Referenced user or room not found

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_success_exit_code() {
    let env = TestEnv::new();
    env.command().arg("list-rooms").assert().code(0);
    env.command().arg("--help").assert().code(0);
}

#[test]
fn test_disable_autoinit_without_database() {
    let env = TestEnv::new();

    env.command()
        .args(["--disable-autoinit", "list-users"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Data directory not found"));

    assert!(!env.data_dir.join("roombook.db").exists());
}

#[test]
fn test_disable_autoinit_from_env() {
    let env = TestEnv::new();
    env.command()
        .arg("list-users")
        .env("ROOMBOOK_DISABLE_AUTOINIT", "true")
        .assert()
        .code(3);

    env.command().arg("init").assert().success();
    env.command()
        .arg("list-users")
        .env("ROOMBOOK_DISABLE_AUTOINIT", "true")
        .assert()
        .success();
}

#[test]
fn test_bad_arguments() {
    let env = TestEnv::new();

    env.command().arg("no-such-command").assert().code(4);
    env.command()
        .args(["book", "--user", "zero", "--start", "2099-01-05 09:00"])
        .assert()
        .code(4);
    env.command()
        .args(["book", "--user", "1", "--start", "next tuesday"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("is not a timestamp"));
    env.command()
        .args(["list-rooms", "--format", "xml"])
        .assert()
        .code(4);
}

#[test]
fn test_invalid_config_file() {
    let env = TestEnv::new();
    env.write_config("known_rooms: [1, 1]\n");

    env.command()
        .arg("list-rooms")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Configuration error"));

    env.write_config("unexpected: true\n");
    env.command().arg("list-rooms").assert().code(7);
}

#[test]
fn test_invalid_config_env() {
    let env = TestEnv::new();
    env.command()
        .arg("list-rooms")
        .env("ROOMBOOK_KNOWN_ROOMS", "1,two")
        .assert()
        .code(7);
}

#[test]
fn test_missing_rooms_file() {
    let env = TestEnv::new();
    env.command()
        .arg("add-rooms")
        .arg(env.path().join("absent.yaml"))
        .assert()
        .code(5);
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let env = TestEnv::new();
    let user = env.with_fixture();

    env.command()
        .args(["--verbose", "book", "--user", &user.to_string()])
        .args(["--start", "2099-01-05 09:00", "--end", "2099-01-05 10:00"])
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn test_quiet_suppresses_logs() {
    let env = TestEnv::new();
    let user = env.with_fixture();

    env.command()
        .args(["--quiet", "book", "--user", &user.to_string()])
        .args(["--start", "2099-01-05 09:00", "--end", "2099-01-05 10:00"])
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::is_empty());
}
