// Copyright 2026 Oxide Computer Company

//! The end-to-end publish workflow.

use crate::{
    FileService, GitRunner, GitService, PublishError, Workspace,
};
use camino::{Utf8Path, Utf8PathBuf};

/// What a publish run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The synced build output matched what the publish branch already
    /// held; nothing was committed or pushed.
    NothingToPublish,
    /// A commit was created on the publish branch and pushed to `origin`.
    Pushed,
}

/// Publishes a generated artifact tree onto a dedicated branch.
///
/// One `Publisher` owns one [`GitService`] and one [`FileService`] and runs
/// the sequence described in the crate docs: capture the current branch and
/// last-commit authorship, switch to the publish branch, sync the build tree
/// into the target directory, commit and push if anything changed, and
/// switch back.
///
/// # Branch restore
///
/// The switch back to the original branch always runs, even when syncing,
/// committing, or pushing failed, so an error never leaves the repository
/// checked out on the publish branch. When the publish steps themselves
/// failed, their error is what the caller sees (the restore is best-effort);
/// when they succeeded but the restore failed, that surfaces as
/// [`PublishError::RestoreBranch`].
#[derive(Debug, Clone)]
pub struct Publisher<R, W> {
    git: GitService<R>,
    files: FileService<W>,
    build_dir: Utf8PathBuf,
    target_dir: Utf8PathBuf,
    publish_branch: String,
}

impl<R: GitRunner, W: Workspace> Publisher<R, W> {
    /// Creates a publisher.
    ///
    /// `build_dir` is the directory holding the freshly generated output;
    /// its immediate children are synced into `target_dir` (typically the
    /// repository root) on `publish_branch`, and the emptied `build_dir`
    /// itself is removed afterwards so the working tree ends up clean.
    pub fn new(
        runner: R,
        workspace: W,
        build_dir: impl Into<Utf8PathBuf>,
        target_dir: impl Into<Utf8PathBuf>,
        publish_branch: impl Into<String>,
    ) -> Self {
        Publisher {
            git: GitService::new(runner),
            files: FileService::new(workspace),
            build_dir: build_dir.into(),
            target_dir: target_dir.into(),
            publish_branch: publish_branch.into(),
        }
    }

    /// Runs one publish cycle.
    ///
    /// Fail-fast: the first failing step aborts the sequence (no retries,
    /// no rollback of a partial sync), and the workflow then switches back
    /// to the original branch before returning.
    pub fn publish(&self) -> Result<PublishOutcome, PublishError> {
        let original_branch = self.git.active_branch()?;
        let meta = self.git.last_commit()?;
        self.git.switch_branch(&self.publish_branch)?;

        // From here on the repository is checked out on the publish
        // branch; whatever happens below, attempt the switch back.
        let result = self.sync_and_push(&meta);
        let restore = self.git.switch_branch(&original_branch);

        match (result, restore) {
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Ok(_), Err(source)) => Err(PublishError::RestoreBranch {
                branch: original_branch,
                source,
            }),
            // The publish failure is the primary error; the restore
            // already ran best-effort.
            (Err(err), _) => Err(err),
        }
    }

    /// The steps that run while checked out on the publish branch.
    fn sync_and_push(
        &self,
        meta: &gh_pusher::CommitMetadata,
    ) -> Result<PublishOutcome, PublishError> {
        self.sync_build_output()?;

        if !self.git.changes_exist()? {
            return Ok(PublishOutcome::NothingToPublish);
        }
        self.git.commit_all(meta)?;
        self.git.push_branch(&self.publish_branch)?;
        Ok(PublishOutcome::Pushed)
    }

    /// Moves the build tree's entries into the target directory and
    /// removes the emptied build directory.
    fn sync_build_output(&self) -> Result<(), PublishError> {
        self.files
            .move_files(&self.build_dir, &self.target_dir)
            .map_err(|source| PublishError::Sync {
                build_dir: self.build_dir.clone(),
                source,
            })?;
        self.files.remove(&self.build_dir).map_err(|source| {
            PublishError::Cleanup { path: self.build_dir.clone(), source }
        })
    }

    /// Returns the build directory whose children are synced.
    pub fn build_dir(&self) -> &Utf8Path {
        &self.build_dir
    }

    /// Returns the directory the build output is synced into.
    pub fn target_dir(&self) -> &Utf8Path {
        &self.target_dir
    }

    /// Returns the branch that receives the published tree.
    pub fn publish_branch(&self) -> &str {
        &self.publish_branch
    }
}
