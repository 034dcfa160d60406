//! `gh` CLI invocation: listing, start/stop, and the ssh transport
//!
//! Every interaction with the codespace service goes through the `gh`
//! binary. Listing output is the only thing ever parsed; start, stop, and
//! ssh are judged by exit status alone. None of the blocking calls carry a
//! timeout — an unresponsive `gh` blocks the whole interaction.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::CodespaceError;
use crate::registry::Registry;
use crate::schema::RawCodespace;
use crate::transport::Transport;

/// JSON fields requested from `gh codespace list`
const LIST_FIELDS: &str = "name,displayName,repository,state,gitStatus,lastUsedAt";

/// Handle to the external `gh` CLI
#[derive(Debug, Clone)]
pub struct GhClient {
    program: String,
}

impl Default for GhClient {
    fn default() -> Self {
        Self::new("gh")
    }
}

impl GhClient {
    /// Create a client invoking `program` (normally `"gh"`)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for `gh codespace list`
    pub fn list_args() -> Vec<String> {
        vec![
            "codespace".to_string(),
            "list".to_string(),
            "--json".to_string(),
            LIST_FIELDS.to_string(),
        ]
    }

    /// Arguments for `gh codespace start`
    pub fn start_args(name: &str) -> Vec<String> {
        vec![
            "codespace".to_string(),
            "start".to_string(),
            "--codespace".to_string(),
            name.to_string(),
        ]
    }

    /// Arguments for `gh codespace stop`
    pub fn stop_args(name: &str) -> Vec<String> {
        vec![
            "codespace".to_string(),
            "stop".to_string(),
            "--codespace".to_string(),
            name.to_string(),
        ]
    }

    /// Arguments for `gh codespace ssh` landing in `path`
    pub fn ssh_args(name: &str, path: &str) -> Vec<String> {
        vec![
            "codespace".to_string(),
            "ssh".to_string(),
            "--codespace".to_string(),
            name.to_string(),
            "--".to_string(),
            "-t".to_string(),
            format!("cd '{path}' && exec \"$SHELL\" -l"),
        ]
    }

    /// Fetch the raw codespace listing
    ///
    /// Exactly one external invocation; it may block for seconds.
    ///
    /// # Errors
    ///
    /// [`CodespaceError::SourceUnavailable`] when `gh` cannot be run or
    /// exits non-zero; [`CodespaceError::InvalidResponse`] when stdout is
    /// not a JSON array of records.
    pub fn list(&self) -> Result<Vec<RawCodespace>, CodespaceError> {
        let args = Self::list_args();
        debug!("running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CodespaceError::SourceUnavailable(format!(
                "gh codespace list failed: {}",
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| CodespaceError::InvalidResponse(e.to_string()))
    }

    /// Build a fresh registry from one listing invocation
    pub fn build_registry(&self) -> Result<Registry, CodespaceError> {
        Registry::from_records(self.list()?)
    }

    /// Start `name` and wait for the start process to exit
    ///
    /// This is connect's pre-start step: it stays synchronous so the ssh
    /// session that follows does not race a cold codespace. The child
    /// inherits the terminal, so `gh`'s own progress output is visible.
    ///
    /// # Errors
    ///
    /// [`CodespaceError::ConnectFailed`] — a failed pre-start is a failed
    /// connect.
    pub fn start_blocking(&self, name: &str) -> Result<(), CodespaceError> {
        let args = Self::start_args(name);
        debug!("running {} {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(CodespaceError::ConnectFailed {
                name: name.to_string(),
                reason: format!("gh codespace start exited with {status}"),
            })
        }
    }

    /// Launch `gh codespace start` without waiting for it
    ///
    /// Fire and forget: the child runs detached with its stdio closed and
    /// is never reaped. Readiness can take minutes; the user is expected
    /// to run `connect` once the codespace comes up. Only a local launch
    /// failure is reportable from here.
    pub fn start_detached(&self, name: &str) -> Result<(), CodespaceError> {
        let args = Self::start_args(name);
        debug!("launching {} {}", self.program, args.join(" "));

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        drop(child);

        Ok(())
    }

    /// Stop `name` and wait for the stop process to exit
    ///
    /// # Errors
    ///
    /// [`CodespaceError::StopFailed`] on a non-zero exit;
    /// [`CodespaceError::SourceUnavailable`] when `gh` cannot be run at
    /// all.
    pub fn stop_blocking(&self, name: &str) -> Result<(), CodespaceError> {
        let args = Self::stop_args(name);
        debug!("running {} {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(CodespaceError::StopFailed {
                name: name.to_string(),
                reason: format!("gh codespace stop exited with {status}"),
            })
        }
    }

    fn spawn_error(&self, err: std::io::Error) -> CodespaceError {
        if err.kind() == std::io::ErrorKind::NotFound {
            CodespaceError::SourceUnavailable(format!(
                "'{}' not found. Install the GitHub CLI from https://cli.github.com/",
                self.program
            ))
        } else {
            CodespaceError::SourceUnavailable(format!(
                "failed to execute '{}': {err}",
                self.program
            ))
        }
    }
}

impl Transport for GhClient {
    /// Open an interactive ssh session rooted at `path`
    fn open(&self, name: &str, path: &str) -> Result<(), CodespaceError> {
        let args = Self::ssh_args(name, path);
        debug!("running {} {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| CodespaceError::ConnectFailed {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CodespaceError::ConnectFailed {
                name: name.to_string(),
                reason: format!("gh codespace ssh exited with {status}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_args_request_the_fixed_field_set() {
        assert_eq!(
            GhClient::list_args(),
            [
                "codespace",
                "list",
                "--json",
                "name,displayName,repository,state,gitStatus,lastUsedAt",
            ]
        );
    }

    #[test]
    fn test_start_and_stop_args_identify_by_name() {
        assert_eq!(
            GhClient::start_args("fox-123"),
            ["codespace", "start", "--codespace", "fox-123"]
        );
        assert_eq!(
            GhClient::stop_args("fox-123"),
            ["codespace", "stop", "--codespace", "fox-123"]
        );
    }

    #[test]
    fn test_ssh_args_change_into_the_resolved_path() {
        let args = GhClient::ssh_args("fox-123", "/workspaces/widgets");
        assert_eq!(args[..4], ["codespace", "ssh", "--codespace", "fox-123"]);
        assert_eq!(args[6], "cd '/workspaces/widgets' && exec \"$SHELL\" -l");
    }

    #[test]
    fn test_missing_binary_is_source_unavailable() {
        let client = GhClient::new("/nonexistent/definitely-not-gh");
        let err = client.list().unwrap_err();
        assert!(matches!(err, CodespaceError::SourceUnavailable(_)));
        assert!(err.to_string().contains("not found"));
    }
}
