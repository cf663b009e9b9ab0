//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for registering fixtures
//! - A day far enough ahead that bookings are never in the past

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Date used for every booking in the CLI tests.
#[allow(dead_code)]
pub const DAY: &str = "2099-01-05";

/// `HH:MM` on [`DAY`].
#[allow(dead_code)]
pub fn at(time: &str) -> String {
    format!("{DAY} {time}")
}

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the roombook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; roombook creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("roombook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with no flags and no inherited `ROOMBOOK_*` variables.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("roombook").expect("Failed to find roombook binary");
        for var in [
            "ROOMBOOK_DATA_DIR",
            "ROOMBOOK_BUSY_TIMEOUT",
            "ROOMBOOK_DISABLE_AUTOINIT",
            "ROOMBOOK_KNOWN_ROOMS",
            "ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
            "ROOMBOOK_ESTIMATOR_RESPECT_ELIGIBILITY",
            "ROOMBOOK_OUTPUT_FORMAT",
            "ROOMBOOK_LOG_MODE",
            "ROOMBOOK_PASSWORD",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write `contents` to a file under the temp directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config");
    }

    /// Run a command that must succeed and return its trimmed stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run roombook");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Register a user and return its id.
    pub fn add_user(&self, email: &str) -> i64 {
        self.run_ok(&[
            "add-user",
            "--name",
            "Test User",
            "--email",
            email,
            "--password",
            "pw",
        ])
        .parse()
        .expect("Output is not a user id")
    }

    /// Register a room and return its id.
    pub fn add_room(&self, name: &str, full_day_allowed: bool) -> i64 {
        let mut args = vec!["add-room", "--name", name, "--type", "meeting"];
        if full_day_allowed {
            args.push("--full-day-allowed");
        }
        self.run_ok(&args).parse().expect("Output is not a room id")
    }

    /// Three rooms (the second allows full-day bookings), all known, and
    /// one user. Returns the user id.
    pub fn with_fixture(&self) -> i64 {
        let user = self.add_user("booker@example.com");
        self.add_room("One", false);
        self.add_room("Two", true);
        self.add_room("Three", false);
        self.write_config("known_rooms: [1, 2, 3]\n");
        user
    }

    /// Book and return the room id printed by `book`.
    pub fn book(&self, user: i64, room: Option<i64>, start: &str, end: &str) -> i64 {
        let user = user.to_string();
        let start = at(start);
        let end = at(end);
        let mut args = vec!["book", "--user", &user, "--start", &start, "--end", &end];
        let room = room.map(|r| r.to_string());
        if let Some(ref room) = room {
            args.push("--room");
            args.push(room);
        }
        self.run_ok(&args).parse().expect("Output is not a room id")
    }
}
