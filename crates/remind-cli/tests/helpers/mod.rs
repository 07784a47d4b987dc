use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Test harness running the binary against a temporary root directory
pub struct CliTestHarness {
    root: TempDir,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp directory");
        Self { root }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("remind").expect("Failed to find remind binary");
        cmd.env("REMIND_ROOT_DIR", self.root.path());
        cmd.env_remove("REMIND_VERBOSE");
        cmd
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Writes `remind.toml` into the root directory
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.root.path().join("remind.toml"), contents).expect("Failed to write config");
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// A monthly bill starting mid-January 2024 with three reminders
    pub fn monthly_bill_args() -> Vec<&'static str> {
        vec![
            "event", "add",
            "--name", "Electricity bill",
            "--start", "15-01-2024",
            "--count", "3",
            "--months", "1",
        ]
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    pub fn has_event_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Title"))
            .and(predicate::str::contains("Start Date"))
            .and(predicate::str::contains("Number"))
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
