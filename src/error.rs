//! Error types for each service boundary.
//!
//! Failures are grouped by where they occur: input validation (before any
//! I/O), the feed request as a whole, a single feed item, and the state
//! store. None of these are allowed to cross into the presentation layer as
//! panics; the search API swallows [`FeedError`] into an empty result after
//! logging, and per-item [`FeedItemError`]s only ever drop that one item.

use chrono::NaiveDate;
use thiserror::Error;

/// A user-supplied search input was rejected before any request was made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was empty after trimming.
    #[error("search text is empty")]
    Empty,

    /// Input exceeded the maximum query length.
    #[error("search text is {len} characters long (maximum {max})")]
    TooLong {
        /// Character count of the rejected input.
        len: usize,
        /// The enforced maximum.
        max: usize,
    },

    /// Input contained characters outside the allowed set.
    #[error("search text contains disallowed characters")]
    DisallowedCharacters,

    /// A search date lies in the future.
    #[error("search date {0} is in the future")]
    FutureDate(NaiveDate),
}

/// A whole feed request failed. Per-item problems are [`FeedItemError`].
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The built query URL is not a valid URL at all.
    #[error("invalid query URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The built URL escaped the expected API base.
    #[error("query URL {0} does not start with the API base")]
    UrlOutOfBounds(String),

    /// The built URL exceeded [`crate::api::MAX_URL_LEN`].
    #[error("query URL is {0} bytes long")]
    UrlTooLong(usize),
}

/// One feed item could not be turned into an article. The item is dropped;
/// the rest of the batch is unaffected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FeedItemError {
    /// The item has no usable integer id. Without an id the record cannot be
    /// merged downstream, so it is dropped even if otherwise well-formed.
    #[error("item has a missing or null id")]
    MissingId,

    /// A required field is absent or of the wrong type.
    #[error("item is missing field `{0}`")]
    MissingField(&'static str),

    /// The title was present but empty.
    #[error("item has an empty title")]
    EmptyTitle,

    /// The publication date matched none of the accepted formats.
    #[error("unparseable publication date: {0}")]
    UnparseableDate(String),

    /// The kind label matched no known article kind.
    #[error("unknown article kind label: {0}")]
    UnknownKind(String),
}

/// Persistence failure while saving or loading the user state document.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error (create dir, write, rename, read).
    #[error("state file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be serialized or parsed.
    #[error("state document error: {0}")]
    Json(#[from] serde_json::Error),
}
