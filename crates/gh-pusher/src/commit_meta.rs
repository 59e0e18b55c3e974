// Copyright 2026 Oxide Computer Company

//! Commit metadata types and operations.

use crate::MetadataParseError;
use std::{fmt, str::FromStr};

/// Authorship and message for one commit: author name, author email, and
/// commit message.
///
/// Commit metadata is read from the previous commit of the source branch and
/// reused when committing the regenerated artifact tree on the publish
/// branch, so the published commit credits whoever triggered the rebuild.
///
/// Construct via [`FromStr`] (parsing a `git log` line) or
/// [`CommitMetadata::new`].
///
/// # Wire format
///
/// The line format is `author:email:message`, split on the first two `:`
/// occurrences only: everything after the second colon belongs to the
/// message, which may legally contain `:` itself. The format is ambiguous if
/// the author name or email contains a `:`; the producing side (a
/// `--pretty=format:%an:%ae:%s` template) and this parser share that
/// limitation, so neither can be changed alone.
///
/// # Examples
///
/// ```
/// use gh_pusher::CommitMetadata;
///
/// let meta: CommitMetadata =
///     "Jane Doe:jane@example.com:Release v1.2: fix nav".parse().unwrap();
///
/// // Only the first two colons separate fields.
/// assert_eq!(meta.message(), "Release v1.2: fix nav");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitMetadata {
    author: String,
    email: String,
    message: String,
}

impl CommitMetadata {
    /// Creates a new `CommitMetadata` from author name, email, and commit
    /// message.
    ///
    /// No validation is performed; any text is accepted. Callers are
    /// responsible for whatever encoding constraints the version-control
    /// backend imposes.
    pub fn new(
        author: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CommitMetadata {
            author: author.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Returns the author's display name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the author's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the commit message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the canonical authorship string, `author <email>`.
    ///
    /// This is the exact form git's `--author` flag expects. Pure and
    /// deterministic: the same metadata always renders the same string.
    pub fn author_string(&self) -> String {
        format!("{} <{}>", self.author, self.email)
    }
}

impl fmt::Display for CommitMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.author, self.email, self.message)
    }
}

impl FromStr for CommitMetadata {
    type Err = MetadataParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A single trailing newline is tolerated (command output usually
        // keeps one). Interior newlines mean the log query returned more
        // than one line, which this parser must not paper over.
        let line = s.strip_suffix('\n').unwrap_or(s);
        if line.trim().is_empty() {
            return Err(MetadataParseError::EmptyInput);
        }
        if line.contains('\n') {
            return Err(MetadataParseError::TrailingContent {
                input: s.to_owned(),
            });
        }

        // Split on the first two separators only: the message keeps any
        // further colons intact.
        let mut parts = line.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(author), Some(email), Some(message)) => {
                Ok(CommitMetadata::new(author, email, message))
            }
            _ => Err(MetadataParseError::MissingSeparator {
                input: line.to_owned(),
                found: line.matches(':').count(),
            }),
        }
    }
}
