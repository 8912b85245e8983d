//! Common test utilities for Shipway CLI tests.
//!
//! Provides `TestEnv`: an isolated project directory with a seeded
//! `.shipway/config.toml`, plus helpers to run the built binary and
//! inspect its output. Only local-effect commands are exercised here;
//! anything that would reach for ssh is covered by unit tests against
//! the scripted executor.

// not every test crate uses every helper
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

pub const CONFIG: &str = r#"
[environments.staging]
application = "MyApp"
app_root = "/srv/app"
destination = "deploy@staging.invalid"

[environments.production]
application = "MyApp"
app_root = "/srv/app"
destination = "deploy@production.invalid"
"#;

/// Result of running a shipway CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated project directory for CLI runs.
pub struct TestEnv {
    pub project_root: TempDir,
}

impl TestEnv {
    /// Project with a seeded `.shipway/config.toml`.
    pub fn new() -> Self {
        let env = Self::bare();
        fs::create_dir_all(env.project_path(".shipway")).unwrap();
        fs::write(env.project_path(".shipway/config.toml"), CONFIG).unwrap();
        env
    }

    /// Project with no configuration at all.
    pub fn bare() -> Self {
        Self {
            project_root: TempDir::new().unwrap(),
        }
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run shipway in this environment from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_shipway"))
            .current_dir(self.project_root.path())
            .args(args)
            .output()
            .expect("Failed to execute shipway");

        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
