// Copyright 2026 Oxide Computer Company

//! Git command execution: the [`GitRunner`] seam and the process-spawning
//! [`SystemGit`] implementation.

use crate::{GitCommandError, GitEnvError};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;

/// Reads the git binary path from the `$GIT` environment variable, falling
/// back to `"git"` if the variable is unset or empty.
///
/// The value is trimmed of leading and trailing whitespace.
///
/// Returns an error if the variable is set but is not valid UTF-8.
fn read_git_env() -> Result<String, GitEnvError> {
    match std::env::var("GIT") {
        Ok(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok("git".to_string())
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(std::env::VarError::NotPresent) => Ok("git".to_string()),
        Err(std::env::VarError::NotUnicode(value)) => {
            Err(GitEnvError::NonUtf8 { value })
        }
    }
}

/// Executes git with an argument vector and returns its standard output.
///
/// This is the single seam between [`GitService`](crate::GitService) and the
/// outside world: every git operation is one call through this trait, so
/// tests can substitute a recording fake and the service logic never touches
/// a real repository.
///
/// Implementations run against a fixed repository working directory, return
/// captured stdout as text on success, and fail with the exit status and
/// captured stderr on a non-zero exit. No trailing-whitespace stripping is
/// performed here; callers that need it strip it themselves.
pub trait GitRunner {
    /// Runs git with `args` and returns its captured stdout.
    fn run(&self, args: &[&str]) -> Result<String, GitCommandError>;
}

/// A [`GitRunner`] that spawns the real git binary.
///
/// The binary is taken from the `$GIT` environment variable (trimmed,
/// falling back to `"git"` when unset or blank). Every invocation runs with
/// the repository root as its working directory.
#[derive(Debug, Clone)]
pub struct SystemGit {
    binary: String,
    repo_root: Utf8PathBuf,
}

impl SystemGit {
    /// Creates a runner executing git in `repo_root`.
    ///
    /// `repo_root` is treated as relative to the current working directory
    /// (it is also allowed to be absolute). No repository probing happens
    /// here; a wrong directory surfaces as a failure on the first
    /// invocation.
    ///
    /// Returns an error if the `$GIT` environment variable is set but is
    /// not valid UTF-8.
    pub fn new(repo_root: impl Into<Utf8PathBuf>) -> Result<Self, GitEnvError> {
        let binary = read_git_env()?;
        Ok(SystemGit { binary, repo_root: repo_root.into() })
    }

    /// Returns the path to the git binary.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Returns the repository root the runner executes in.
    pub fn repo_root(&self) -> &Utf8Path {
        &self.repo_root
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String, GitCommandError> {
        let output = Command::new(&self.binary)
            .current_dir(&self.repo_root)
            .args(args)
            .output()
            .map_err(|source| GitCommandError::SpawnFailed {
                binary_path: self.binary.clone(),
                repo_root: self.repo_root.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(GitCommandError::Failed {
                args: args.iter().map(|a| a.to_string()).collect(),
                exit_status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}
