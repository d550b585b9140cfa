//! Pure ordering utilities over article slices.
//!
//! Every function leaves its input untouched and returns a newly allocated,
//! reordered copy. All sorts are stable (`slice::sort_by` guarantees it), so
//! equal keys keep their relative input order and repeated re-sorts of the
//! same data are deterministic.

use crate::models::Article;

/// Sort by title, lexicographically ascending.
///
/// Collation is codepoint order on purpose; locale-aware collation is not
/// part of the contract.
pub fn by_title(articles: &[Article]) -> Vec<Article> {
    let mut sorted = articles.to_vec();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));
    sorted
}

/// Sort by publication date, ascending. Ties keep input order.
pub fn by_date(articles: &[Article]) -> Vec<Article> {
    let mut sorted = articles.to_vec();
    sorted.sort_by(|a, b| a.published_at.cmp(&b.published_at));
    sorted
}

/// Sort by kind in declaration order (News before Release).
pub fn by_kind(articles: &[Article]) -> Vec<Article> {
    let mut sorted = articles.to_vec();
    sorted.sort_by(|a, b| a.kind.cmp(&b.kind));
    sorted
}

/// Sort by id, descending. Highest (most recently assigned) id first; this
/// is the default view when no explicit ordering was requested.
pub fn by_id(articles: &[Article]) -> Vec<Article> {
    let mut sorted = articles.to_vec();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted
}
