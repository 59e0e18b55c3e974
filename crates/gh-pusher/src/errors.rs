// Copyright 2026 Oxide Computer Company

//! Error types for commit metadata parsing.

use thiserror::Error;

/// An error that occurs while parsing a
/// [`CommitMetadata`](crate::CommitMetadata) line.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MetadataParseError {
    /// The input was empty or contained only whitespace.
    #[error("commit metadata is empty")]
    EmptyInput,

    /// The input did not contain the expected `author:email:message`
    /// format.
    #[error(
        "invalid commit metadata format: expected 'author:email:message', \
         got {input:?} (found {found} ':' separator(s), need at least 2)"
    )]
    MissingSeparator {
        /// The input that failed to parse.
        input: String,
        /// How many `:` separators were found.
        found: usize,
    },

    /// The input contained more than one line.
    ///
    /// The wire format is a single log line; multi-line input means the
    /// producing query returned more than one commit.
    #[error(
        "commit metadata spans multiple lines: {input:?} \
         (expected a single 'author:email:message' line)"
    )]
    TrailingContent {
        /// The multi-line input.
        input: String,
    },
}
