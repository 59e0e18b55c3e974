// Copyright 2026 Oxide Computer Company

//! Parsing types for publish-branch commit metadata.
//!
//! When a build pipeline republishes a generated artifact tree (e.g. a static
//! site build) into a dedicated branch, the commit it creates should carry
//! the authorship of the source commit that triggered it. That authorship
//! travels as a single line in the format `author:email:message`, produced by
//! a `git log` pretty-format template and parsed here into [`CommitMetadata`].
//!
//! The main entry point is [`CommitMetadata`].
//!
//! # Examples
//!
//! ```
//! use gh_pusher::CommitMetadata;
//!
//! // One line of `git log -1 --pretty=format:%an:%ae:%s` output.
//! let line = "Jane Doe:jane@example.com:Fix nav links\n";
//! let meta: CommitMetadata = line.parse().unwrap();
//!
//! assert_eq!(meta.author(), "Jane Doe");
//! assert_eq!(meta.email(), "jane@example.com");
//! assert_eq!(meta.message(), "Fix nav links");
//!
//! // The canonical authorship string for `git commit --author=...`.
//! assert_eq!(meta.author_string(), "Jane Doe <jane@example.com>");
//! ```
//!
//! # Related crates
//!
//! For the publish workflow built on these types (git operations, build-tree
//! sync, branch switching), see
//! [`gh-pusher-publish`](https://crates.io/crates/gh-pusher-publish) ([source
//! tree](https://github.com/oxidecomputer/gh-pusher/tree/main/crates/gh-pusher-publish)).

#![deny(missing_docs)]

mod commit_meta;
mod errors;

pub use commit_meta::CommitMetadata;
pub use errors::MetadataParseError;
