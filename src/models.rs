//! Core data model: the canonical article record and its wire-level parsers.
//!
//! This module defines [`Article`], the single representation of one IBGE
//! news item plus the per-user flags attached to it, along with the two
//! small pure parsers the feed needs:
//!
//! - [`ArticleKind::from_label`]: case-insensitive mapping from the remote
//!   free-text `tipo` label to the kind enum
//! - [`parse_publication_date`]: fallback-list date parsing for the remote
//!   `data_publicacao` field
//!
//! Both are deliberately kept out of the HTTP client so they can be tested
//! without any I/O.
//!
//! # Identity and merging
//!
//! Two articles are the same logical article iff their `id` is equal. A
//! freshly fetched copy and a stored copy may disagree on every other field;
//! the stored copy's descriptive fields win on merge (see
//! [`UserState::upsert`](crate::state::UserState::upsert)), while the flags
//! follow the incoming record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::FeedItemError;

/// Date formats accepted for the remote `data_publicacao` field, tried in
/// order; first match wins. The API documents the first, but items have been
/// observed carrying ISO-8601 local date-times as well.
const PUBLICATION_DATE_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// The enumerated category of an article.
///
/// Declaration order is the canonical sort order: `News` before `Release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ArticleKind {
    /// A regular news story (`tipo: "Notícia"`).
    News,
    /// A press release (`tipo: "Release"`).
    Release,
}

impl ArticleKind {
    /// Map the remote free-text `tipo` label to a kind, case-insensitively.
    ///
    /// An unrecognized label is a hard parse failure for that item; the
    /// caller drops the record rather than guessing a category.
    pub fn from_label(label: &str) -> Result<Self, FeedItemError> {
        match label.trim().to_lowercase().as_str() {
            "notícia" | "noticia" | "news" => Ok(ArticleKind::News),
            "release" => Ok(ArticleKind::Release),
            _ => Err(FeedItemError::UnknownKind(label.to_string())),
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ArticleKind::News => "Notícia",
            ArticleKind::Release => "Release",
        }
    }
}

/// Parse a remote publication date, trying each accepted format in order.
///
/// A value matching none of the formats is a parse failure for that item
/// only; the surrounding batch is unaffected.
pub fn parse_publication_date(value: &str) -> Result<NaiveDateTime, FeedItemError> {
    for format in PUBLICATION_DATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    Err(FeedItemError::UnparseableDate(value.to_string()))
}

/// One news item and the local user's flags on it.
///
/// Persisted timestamps use chrono's default serde representation
/// (ISO-8601 local date-time), which intentionally differs from the
/// `dd/MM/yyyy` wire format of the remote feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Stable unique identifier assigned by the remote source.
    pub id: u64,
    /// Headline; never empty after construction.
    pub title: String,
    /// Introductory summary; may be empty.
    pub summary: String,
    /// Publication date and time, no timezone assumed.
    pub published_at: NaiveDateTime,
    /// Link to the full story.
    pub link: String,
    /// Enumerated category.
    pub kind: ArticleKind,
    /// Whether the user has read this article.
    #[serde(default)]
    pub is_read: bool,
    /// Whether the user marked this article as a favorite.
    #[serde(default)]
    pub is_favorite: bool,
    /// Whether the user saved this article to read later.
    #[serde(default)]
    pub is_saved_for_later: bool,
}

impl Article {
    /// Construct a freshly fetched article. All flags start false.
    pub fn new(
        id: u64,
        title: String,
        summary: String,
        published_at: NaiveDateTime,
        link: String,
        kind: ArticleKind,
    ) -> Self {
        Self {
            id,
            title,
            summary,
            published_at,
            link,
            kind,
            is_read: false,
            is_favorite: false,
            is_saved_for_later: false,
        }
    }

    /// Flip the read flag. Does not persist; the caller upserts afterward.
    pub fn toggle_read(&mut self) {
        self.is_read = !self.is_read;
    }

    /// Flip the favorite flag. Does not persist; the caller upserts afterward.
    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }

    /// Flip the saved-for-later flag. Does not persist; the caller upserts
    /// afterward.
    pub fn toggle_saved_for_later(&mut self) {
        self.is_saved_for_later = !self.is_saved_for_later;
    }
}
