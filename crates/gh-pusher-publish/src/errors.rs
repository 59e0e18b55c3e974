// Copyright 2026 Oxide Computer Company

//! Error types for git execution, file sync, and the publish workflow.

use camino::Utf8PathBuf;
use gh_pusher::MetadataParseError;
use std::{ffi::OsString, io};
use thiserror::Error;

// ---- Git executor errors ----

/// An error from reading the git binary path from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitEnvError {
    /// The `$GIT` environment variable is set but is not valid UTF-8.
    #[error("$GIT environment variable is not valid UTF-8: {value:?}")]
    NonUtf8 {
        /// The non-UTF-8 value.
        value: OsString,
    },
}

/// An error from one git command invocation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitCommandError {
    /// Failed to spawn the git process.
    #[error("failed to run git at {binary_path:?} in {repo_root}")]
    SpawnFailed {
        /// The path to the git executable.
        binary_path: String,
        /// The working directory where the command was run.
        repo_root: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The git command exited unsuccessfully.
    #[error("git {args:?} failed ({exit_status}): {stderr}")]
    Failed {
        /// The argument vector that was passed to git.
        args: Vec<String>,
        /// A human-readable description of the exit status (e.g.,
        /// "exit code 128" or "killed by signal").
        exit_status: String,
        /// The stderr output from git, trimmed.
        stderr: String,
    },
}

// ---- GitService errors ----

/// An error from a [`GitService`](crate::GitService) operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitServiceError {
    /// The underlying git command failed.
    #[error(transparent)]
    Command(#[from] GitCommandError),

    /// The last-commit query returned output that does not parse as
    /// `author:email:message`.
    ///
    /// This is surfaced rather than default-filled: committing with empty
    /// authorship would silently misattribute the published commit.
    #[error("git log returned malformed commit metadata: {output:?}")]
    Metadata {
        /// The raw log output that failed to parse.
        output: String,
        /// Details about the parsing error.
        #[source]
        source: MetadataParseError,
    },
}

// ---- Filesystem errors ----

/// An error from a [`Workspace`](crate::Workspace) filesystem operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FsError {
    /// The glob pattern itself is invalid.
    #[error("invalid glob pattern {pattern:?}")]
    Pattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying pattern error.
        #[source]
        source: glob::PatternError,
    },

    /// Enumerating glob matches failed partway (e.g., an unreadable
    /// directory entry).
    #[error("failed to read glob match under pattern {pattern:?}")]
    Glob {
        /// The pattern being enumerated.
        pattern: String,
        /// The underlying glob error.
        #[source]
        source: glob::GlobError,
    },

    /// A matched path is not valid UTF-8.
    #[error("glob match is not valid UTF-8: {path:?}")]
    NonUtf8Path {
        /// The non-UTF-8 path.
        path: std::path::PathBuf,
    },

    /// Moving an entry into the target directory failed.
    #[error("failed to move {source_path} into {dest_dir}")]
    Move {
        /// The entry being moved.
        source_path: Utf8PathBuf,
        /// The destination directory.
        dest_dir: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A source entry has no file name component (e.g., `.` or a root).
    #[error("cannot move {source_path}: path has no file name")]
    NoFileName {
        /// The entry that could not be moved.
        source_path: Utf8PathBuf,
    },

    /// An existence or file-kind query failed.
    #[error("failed to inspect {path}")]
    Inspect {
        /// The path being inspected.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Removing a file or directory tree failed.
    #[error("failed to remove {path}")]
    Remove {
        /// The path being removed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

// ---- Publish workflow errors ----

/// An error from the [`Publisher`](crate::Publisher) workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PublishError {
    /// A git operation in the publish sequence failed.
    #[error(transparent)]
    Git(#[from] GitServiceError),

    /// Syncing the build tree into the target directory failed.
    ///
    /// The transfer is best-effort sequential: entries moved before the
    /// failure stay moved (no rollback).
    #[error("failed to sync build output from {build_dir}")]
    Sync {
        /// The build directory being synced.
        build_dir: Utf8PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: FsError,
    },

    /// Removing the emptied build directory failed.
    #[error("failed to clean up {path} after sync")]
    Cleanup {
        /// The path being cleaned up.
        path: Utf8PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: FsError,
    },

    /// The publish steps succeeded but switching back to the original
    /// branch failed, leaving the repository checked out on the publish
    /// branch.
    #[error("published, but failed to switch back to branch {branch:?}")]
    RestoreBranch {
        /// The branch that could not be restored.
        branch: String,
        /// The underlying git error.
        #[source]
        source: GitServiceError,
    },
}
