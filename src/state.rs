//! Durable per-user view of every article the user has ever touched.
//!
//! [`UserState`] maps article ids to records and is the single source of
//! truth for the three flags. The load-bearing operation is [`UserState::upsert`]:
//! an already-known article keeps all of its stored descriptive fields and
//! adopts only the flags of the incoming record, so a stale fetched copy can
//! never regress locally stored metadata while the latest flag intent always
//! wins.
//!
//! Iteration order of the underlying map is not a contract; display ordering
//! is always imposed by [`crate::sort`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::Article;

/// The full persisted state of the single local user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    /// Display name chosen at first run.
    pub display_name: String,
    /// Every article the user has interacted with, keyed by id.
    articles: BTreeMap<u64, Article>,
}

impl UserState {
    /// Create a fresh state for a first run.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            articles: BTreeMap::new(),
        }
    }

    /// Whether an article with this id has been tracked.
    pub fn exists(&self, id: u64) -> bool {
        self.articles.contains_key(&id)
    }

    /// Look up a tracked article.
    pub fn get(&self, id: u64) -> Option<&Article> {
        self.articles.get(&id)
    }

    /// Number of tracked articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// True when no article has been tracked yet.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Merge a record into the state.
    ///
    /// If the id is already tracked, only the three flags are copied from
    /// `record` onto the stored entry; every descriptive field of the stored
    /// copy stays untouched. An unknown id is inserted as-is. Idempotent.
    pub fn upsert(&mut self, record: Article) {
        match self.articles.get_mut(&record.id) {
            Some(stored) => {
                debug!(id = record.id, "Updating flags on tracked article");
                stored.is_read = record.is_read;
                stored.is_favorite = record.is_favorite;
                stored.is_saved_for_later = record.is_saved_for_later;
            }
            None => {
                debug!(id = record.id, "Tracking new article");
                self.articles.insert(record.id, record);
            }
        }
    }

    /// Materialized copy of all favorite articles.
    pub fn favorites(&self) -> Vec<Article> {
        self.filter(|a| a.is_favorite)
    }

    /// Materialized copy of all read articles.
    pub fn read(&self) -> Vec<Article> {
        self.filter(|a| a.is_read)
    }

    /// Materialized copy of all articles saved for later.
    pub fn saved_for_later(&self) -> Vec<Article> {
        self.filter(|a| a.is_saved_for_later)
    }

    fn filter(&self, keep: impl Fn(&Article) -> bool) -> Vec<Article> {
        self.articles
            .values()
            .filter(|article| keep(article))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleKind;
    use chrono::NaiveDate;

    fn article(id: u64, title: &str) -> Article {
        Article::new(
            id,
            title.to_string(),
            "summary".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            format!("https://example.com/{id}"),
            ArticleKind::News,
        )
    }

    #[test]
    fn upsert_inserts_unknown_articles_as_is() {
        let mut state = UserState::new("ana");
        let mut record = article(1, "Primeira");
        record.toggle_favorite();
        state.upsert(record.clone());

        assert!(state.exists(1));
        assert_eq!(state.get(1), Some(&record));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn upsert_is_idempotent() {
        let mut state = UserState::new("ana");
        let record = article(1, "Primeira");
        state.upsert(record.clone());
        let once = state.clone();
        state.upsert(record);
        assert_eq!(state, once);
    }

    #[test]
    fn upsert_updates_flags_only() {
        let mut state = UserState::new("ana");
        state.upsert(article(1, "Título original"));

        // A re-fetched copy with different metadata and new flag intent.
        let mut refetched = article(1, "Título reescrito");
        refetched.summary = "outro resumo".to_string();
        refetched.link = "https://example.com/other".to_string();
        refetched.toggle_read();
        refetched.toggle_saved_for_later();
        state.upsert(refetched);

        let stored = state.get(1).unwrap();
        assert_eq!(stored.title, "Título original");
        assert_eq!(stored.summary, "summary");
        assert_eq!(stored.link, "https://example.com/1");
        assert!(stored.is_read);
        assert!(stored.is_saved_for_later);
        assert!(!stored.is_favorite);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn upsert_can_clear_flags() {
        let mut state = UserState::new("ana");
        let mut record = article(2, "Favorita");
        record.toggle_favorite();
        state.upsert(record);
        assert!(state.get(2).unwrap().is_favorite);

        let mut cleared = article(2, "Favorita");
        cleared.is_favorite = false;
        state.upsert(cleared);
        assert!(!state.get(2).unwrap().is_favorite);
    }

    #[test]
    fn get_returns_none_for_untracked_id() {
        let state = UserState::new("ana");
        assert!(state.get(42).is_none());
        assert!(!state.exists(42));
        assert!(state.is_empty());
    }

    #[test]
    fn projections_are_materialized_and_disjoint_from_state() {
        let mut state = UserState::new("ana");
        let mut fav = article(1, "Favorita");
        fav.toggle_favorite();
        let mut read = article(2, "Lida");
        read.toggle_read();
        let mut later = article(3, "Depois");
        later.toggle_saved_for_later();
        let mut both = article(4, "Favorita e lida");
        both.toggle_favorite();
        both.toggle_read();
        for record in [fav, read, later, both] {
            state.upsert(record);
        }

        let favorites = state.favorites();
        assert_eq!(favorites.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(state.read().iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(
            state.saved_for_later().iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![3]
        );

        // Mutating the projection must not touch the state.
        let mut favorites = favorites;
        favorites[0].is_favorite = false;
        assert!(state.get(1).unwrap().is_favorite);
    }
}
