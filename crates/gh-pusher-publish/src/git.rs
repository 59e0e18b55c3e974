// Copyright 2026 Oxide Computer Company

//! High-level git operations for the publish workflow.

use crate::{GitRunner, GitServiceError};
use gh_pusher::CommitMetadata;

/// The pretty-format template whose output [`CommitMetadata`] parses.
///
/// `%an:%ae:%s` emits exactly `author:email:message` for one commit. The
/// template and the parser share the colon-delimited contract; change one
/// and the other must follow.
const LAST_COMMIT_FORMAT: &str = "--pretty=format:%an:%ae:%s";

/// High-level git operations over an injected [`GitRunner`].
///
/// The service holds no state beyond the runner: every operation is a fresh
/// round-trip to the git tool (two for [`commit_all`](Self::commit_all),
/// which stages before committing). Nothing is retried; any failure aborts
/// the operation and propagates to the caller.
#[derive(Debug, Clone)]
pub struct GitService<R> {
    pub(crate) runner: R,
}

impl<R: GitRunner> GitService<R> {
    /// Creates a service issuing commands through `runner`.
    pub fn new(runner: R) -> Self {
        GitService { runner }
    }

    /// Reads the authorship and message of the most recent commit.
    ///
    /// Runs `git log -1 --pretty=format:%an:%ae:%s` and parses the single
    /// output line. Malformed output (fewer than two `:` separators) is an
    /// error, never silently default-filled.
    pub fn last_commit(&self) -> Result<CommitMetadata, GitServiceError> {
        let output = self.runner.run(&["log", "-1", LAST_COMMIT_FORMAT])?;
        let line = output.trim_end_matches('\n');
        line.parse().map_err(|source| GitServiceError::Metadata {
            output: output.clone(),
            source,
        })
    }

    /// Returns whether the working tree has changed or untracked paths.
    ///
    /// Runs `git status --porcelain`; empty output means a clean tree.
    pub fn changes_exist(&self) -> Result<bool, GitServiceError> {
        let output = self.runner.run(&["status", "--porcelain"])?;
        Ok(!output.trim().is_empty())
    }

    /// Checks out the named branch.
    ///
    /// Fails if the branch does not exist or the checkout is blocked by
    /// unstaged changes.
    pub fn switch_branch(&self, branch: &str) -> Result<(), GitServiceError> {
        self.runner.run(&["checkout", branch])?;
        Ok(())
    }

    /// Stages all working-tree changes and commits them with the given
    /// authorship and message.
    ///
    /// Two sequential invocations: `git add .` then `git commit` carrying
    /// `meta.message()` and an `--author` flag equal to
    /// `meta.author_string()`. Fails if git rejects the commit (e.g.,
    /// nothing staged).
    pub fn commit_all(
        &self,
        meta: &CommitMetadata,
    ) -> Result<(), GitServiceError> {
        self.runner.run(&["add", "."])?;
        let author = format!("--author={}", meta.author_string());
        self.runner
            .run(&["commit", "-m", meta.message(), author.as_str()])?;
        Ok(())
    }

    /// Pushes the named local branch to `origin` under the same name.
    ///
    /// Fails on network or auth errors, non-fast-forward rejection, or a
    /// nonexistent branch.
    pub fn push_branch(&self, branch: &str) -> Result<(), GitServiceError> {
        self.runner.run(&["push", "origin", branch])?;
        Ok(())
    }

    /// Returns the name of the currently checked-out branch, with
    /// surrounding whitespace (including trailing blank lines) stripped.
    pub fn active_branch(&self) -> Result<String, GitServiceError> {
        let output = self.runner.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(output.trim().to_string())
    }
}
