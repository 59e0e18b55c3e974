// Copyright 2026 Oxide Computer Company

//! Publish a generated artifact tree into a dedicated branch of the same
//! repository.
//!
//! Build pipelines that regenerate output on every change (a static site
//! build, generated documentation) need to commit only the regenerated files
//! to a publish branch (e.g. `gh-pages`), credit the commit to whoever
//! triggered the rebuild, and leave the working tree back on the original
//! branch afterwards. This crate provides that workflow as three small
//! collaborating services:
//!
//! - [`GitService`]: high-level git operations (read the last commit, detect
//!   pending changes, switch branches, stage-and-commit, push) over an
//!   injected [`GitRunner`] command executor.
//! - [`FileService`]: reconciles a build directory's immediate children into
//!   a target directory over an injected [`Workspace`] filesystem capability.
//! - [`Publisher`]: composes the two into the full publish sequence, with a
//!   guaranteed switch back to the original branch even when a step fails.
//!
//! Everything is synchronous and single-caller: the workflow is a linear
//! pipeline of blocking subprocess and filesystem calls. Concurrent invokers
//! must serialize above this crate.
//!
//! # Examples
//!
//! ```no_run
//! use gh_pusher_publish::{DiskWorkspace, Publisher, SystemGit};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Run git in the current directory, publishing the `build` tree onto
//! // the `gh-pages` branch at the repository root.
//! let git = SystemGit::new(".")?;
//! let publisher =
//!     Publisher::new(git, DiskWorkspace::new(), "build", ".", "gh-pages");
//!
//! let outcome = publisher.publish()?;
//! println!("publish: {outcome:?}");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod errors;
mod exec;
mod files;
mod git;
mod publish;

pub use errors::{
    FsError, GitCommandError, GitEnvError, GitServiceError, PublishError,
};
pub use exec::{GitRunner, SystemGit};
pub use files::{DiskWorkspace, FileService, Workspace};
pub use git::GitService;
pub use publish::{PublishOutcome, Publisher};
