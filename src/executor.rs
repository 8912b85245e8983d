//! Remote execution over SSH
//!
//! Implements the remote side of every command: privileged shell execution,
//! existence probes, and secure copy. Commands are tested against the
//! scripted `MockExecutor` instead of a live connection.

use std::path::Path;

use crate::error::{ShipwayError, ShipwayResult};

/// Direction of a secure copy between the local and remote host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDirection {
    Upload,
    Download,
}

/// Abstract remote host interface.
///
/// The seam between command orchestration and the SSH transport. All remote
/// effects of a command go through this trait.
pub trait RemoteExecutor {
    /// Run a shell command on the remote host with elevated privileges.
    fn execute_as_root(&self, command: &str) -> ShipwayResult<String>;

    /// Check whether a remote file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// Check whether a remote directory exists.
    fn directory_exists(&self, path: &Path) -> bool;

    /// Transfer a file between the local and remote host.
    fn copy(&self, direction: CopyDirection, local: &Path, remote: &Path) -> ShipwayResult<()>;

    /// Check whether a gem is installed under the remote default Ruby.
    fn is_installed(&self, gem: &str) -> bool;
}

/// Remote executor implementation using ssh/scp subprocesses.
pub struct SshExecutor {
    /// SSH destination (user@host or host)
    destination: String,
}

impl SshExecutor {
    /// Create a new SshExecutor for the given SSH destination.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Get the SSH destination.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Run a raw command on the remote host via SSH.
    fn run_command(&self, command: &str) -> ShipwayResult<String> {
        use std::process::{Command, Stdio};

        let output = Command::new("ssh")
            .arg(&self.destination)
            .arg(command)
            .stdin(Stdio::inherit()) // allow password/passphrase input
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ShipwayError::Remote(format!(
                "ssh {} exited with {:?}: {}",
                self.destination,
                output.status.code(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Quote a string for safe use inside single quotes in a shell command.
    fn shell_quote(s: &str) -> String {
        format!("'{}'", s.replace('\'', "'\\''"))
    }

    /// Quote a path for safe use in shell commands.
    fn quote_path(path: &Path) -> String {
        Self::shell_quote(&path.to_string_lossy())
    }
}

impl RemoteExecutor for SshExecutor {
    fn execute_as_root(&self, command: &str) -> ShipwayResult<String> {
        self.run_command(&format!("sudo sh -c {}", Self::shell_quote(command)))
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.execute_as_root(&format!("test -f {}", Self::quote_path(path)))
            .is_ok()
    }

    fn directory_exists(&self, path: &Path) -> bool {
        self.execute_as_root(&format!("test -d {}", Self::quote_path(path)))
            .is_ok()
    }

    fn copy(&self, direction: CopyDirection, local: &Path, remote: &Path) -> ShipwayResult<()> {
        use std::process::{Command, Stdio};

        let remote_arg = format!("{}:{}", self.destination, remote.display());
        let mut cmd = Command::new("scp");
        cmd.arg("-p"); // preserve timestamps
        match direction {
            CopyDirection::Upload => cmd.arg(local).arg(&remote_arg),
            CopyDirection::Download => cmd.arg(&remote_arg).arg(local),
        };

        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(ShipwayError::Remote(format!(
                "scp failed with exit code {:?}",
                status.code()
            )));
        }

        Ok(())
    }

    fn is_installed(&self, gem: &str) -> bool {
        self.execute_as_root(&format!("gem list {} --installed", Self::shell_quote(gem)))
            .map(|out| out.trim() == "true")
            .unwrap_or(false)
    }
}

/// Scripted remote host for testing.
///
/// Records every command and transfer; replays configured responses.
/// Uses `Mutex` internally so command handlers can take `&dyn RemoteExecutor`.
#[cfg(test)]
pub struct MockExecutor {
    /// (command-substring, response) pairs; first match wins
    responses: Vec<(String, String)>,
    /// Remote files and their contents
    pub files: std::sync::Mutex<std::collections::HashMap<std::path::PathBuf, String>>,
    /// Remote directories
    pub directories: std::sync::Mutex<std::collections::HashSet<std::path::PathBuf>>,
    /// Gems reported as installed
    installed_gems: Vec<String>,
    /// Every command passed to execute_as_root, in order
    pub executed: std::sync::Mutex<Vec<String>>,
    /// Every transfer, in order
    pub transfers: std::sync::Mutex<Vec<(CopyDirection, std::path::PathBuf, std::path::PathBuf)>>,
}

#[cfg(test)]
impl MockExecutor {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            files: std::sync::Mutex::new(std::collections::HashMap::new()),
            directories: std::sync::Mutex::new(std::collections::HashSet::new()),
            installed_gems: Vec::new(),
            executed: std::sync::Mutex::new(Vec::new()),
            transfers: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Respond with `output` to any command containing `needle`.
    pub fn respond_to(mut self, needle: &str, output: &str) -> Self {
        self.responses.push((needle.to_string(), output.to_string()));
        self
    }

    /// Seed a remote file.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(std::path::PathBuf::from(path), content.to_string());
        self
    }

    /// Seed a remote directory.
    pub fn with_directory(self, path: &str) -> Self {
        self.directories
            .lock()
            .unwrap()
            .insert(std::path::PathBuf::from(path));
        self
    }

    /// Mark a gem as installed.
    pub fn with_gem(mut self, gem: &str) -> Self {
        self.installed_gems.push(gem.to_string());
        self
    }

    pub fn executed_commands(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn transfer_log(&self) -> Vec<(CopyDirection, std::path::PathBuf, std::path::PathBuf)> {
        self.transfers.lock().unwrap().clone()
    }

    pub fn remote_file(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(std::path::Path::new(path))
            .cloned()
    }
}

#[cfg(test)]
impl RemoteExecutor for MockExecutor {
    fn execute_as_root(&self, command: &str) -> ShipwayResult<String> {
        self.executed.lock().unwrap().push(command.to_string());

        // cat and cp act on the seeded remote file map so orchestration
        // tests observe realistic remote state
        if let Some(path) = command.strip_prefix("cat '").and_then(|r| r.strip_suffix('\'')) {
            return match self.remote_file(path) {
                Some(content) => Ok(content),
                None => Err(ShipwayError::Remote(format!("cat: {}: No such file", path))),
            };
        }
        if let Some(rest) = command.strip_prefix("cp '") {
            if let Some((src, dst)) = rest.strip_suffix('\'').and_then(|r| r.split_once("' '")) {
                let content = self
                    .remote_file(src)
                    .ok_or_else(|| ShipwayError::Remote(format!("cp: {}: No such file", src)))?;
                self.files
                    .lock()
                    .unwrap()
                    .insert(std::path::PathBuf::from(dst), content);
                return Ok(String::new());
            }
        }
        if let Some(path) = command.strip_prefix("rm '").and_then(|r| r.strip_suffix('\'')) {
            self.files.lock().unwrap().remove(std::path::Path::new(path));
            return Ok(String::new());
        }

        for (needle, output) in &self.responses {
            if command.contains(needle.as_str()) {
                return Ok(output.clone());
            }
        }
        Ok(String::new())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn directory_exists(&self, path: &Path) -> bool {
        self.directories.lock().unwrap().contains(path)
    }

    fn copy(&self, direction: CopyDirection, local: &Path, remote: &Path) -> ShipwayResult<()> {
        self.transfers
            .lock()
            .unwrap()
            .push((direction, local.to_path_buf(), remote.to_path_buf()));
        match direction {
            CopyDirection::Upload => {
                let content = std::fs::read_to_string(local)?;
                self.files
                    .lock()
                    .unwrap()
                    .insert(remote.to_path_buf(), content);
            }
            CopyDirection::Download => {
                let content = self.remote_file(&remote.to_string_lossy()).ok_or_else(|| {
                    ShipwayError::Remote(format!("scp: {}: No such file", remote.display()))
                })?;
                std::fs::write(local, content)?;
            }
        }
        Ok(())
    }

    fn is_installed(&self, gem: &str) -> bool {
        self.installed_gems.iter().any(|g| g == gem)
    }
}
