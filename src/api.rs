//! IBGE news API client.
//!
//! [`NewsClient`] turns a user-supplied search criterion into a validated,
//! deduplicated list of [`Article`]s. Three search modes share one contract:
//! validate the input, build the query URL, issue a single unauthenticated
//! GET, and normalize the response. No raw transport or parse error ever
//! crosses the service boundary; failures are logged and collapsed into an
//! empty result, which the caller may retry by calling again.
//!
//! # Resilience
//!
//! The response envelope is a JSON object with an `items` array. Each item
//! is parsed independently: a malformed item (missing or null id, bad date,
//! unknown kind label) is dropped with a warning and never fails the rest of
//! the batch. An empty body, a non-JSON body, or a missing `items` array all
//! yield the empty result rather than an error.
//!
//! # URL safety
//!
//! Free-text values are percent-encoded before the URL is built, and the
//! finished URL is rejected if it does not start with the configured API
//! base or exceeds [`MAX_URL_LEN`] bytes.

use chrono::{Local, NaiveDate};
use itertools::Itertools;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::{FeedError, FeedItemError};
use crate::models::{parse_publication_date, Article, ArticleKind};
use crate::validation::{validate_query_text, validate_search_date};

/// Default base endpoint of the IBGE news API.
pub const DEFAULT_BASE_URL: &str = "https://servicodados.ibge.gov.br/api/v3/noticias/";

/// Maximum length of a fully-built query URL, in bytes.
pub const MAX_URL_LEN: usize = 2048;

/// Bound on the whole request, connect included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the IBGE news API.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NewsClient {
    /// Build a client against the default API base.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Build a client against a custom API base (tests, mirrors).
    pub fn with_base_url(base_url: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// Search articles whose title contains `text`.
    ///
    /// Invalid input yields the empty result without any request being made.
    #[instrument(level = "info", skip(self))]
    pub async fn search_by_title(&self, text: &str) -> Vec<Article> {
        self.search_free_text("busca", text).await
    }

    /// Search articles by keywords.
    ///
    /// Invalid input yields the empty result without any request being made.
    #[instrument(level = "info", skip(self))]
    pub async fn search_by_keywords(&self, text: &str) -> Vec<Article> {
        self.search_free_text("palavraChave", text).await
    }

    /// Search articles published on `date`.
    ///
    /// Future dates are rejected before any request is made.
    #[instrument(level = "info", skip(self))]
    pub async fn search_by_date(&self, date: NaiveDate) -> Vec<Article> {
        if let Err(e) = validate_search_date(date, Local::now().date_naive()) {
            warn!(%date, error = %e, "Rejected search date");
            return Vec::new();
        }
        let value = date.format("%Y-%m-%d").to_string();
        self.request_feed("data", &value).await
    }

    async fn search_free_text(&self, param: &str, text: &str) -> Vec<Article> {
        let text = match validate_query_text(text) {
            Ok(text) => text,
            Err(e) => {
                warn!(param, error = %e, "Rejected search text");
                return Vec::new();
            }
        };
        let encoded = urlencoding::encode(&text).into_owned();
        self.request_feed(param, &encoded).await
    }

    async fn request_feed(&self, param: &str, value: &str) -> Vec<Article> {
        let url = match self.build_query_url(param, value) {
            Ok(url) => url,
            Err(e) => {
                warn!(param, error = %e, "Refused to build query URL");
                return Vec::new();
            }
        };
        match self.fetch_feed(&url).await {
            Ok(articles) => {
                info!(param, count = articles.len(), "Search completed");
                articles
            }
            Err(e) => {
                warn!(param, %url, error = %e, "Search request failed");
                Vec::new()
            }
        }
    }

    /// Build the query URL for one search parameter, guarding against
    /// parameter injection and oversized URLs.
    ///
    /// The candidate is run through the `url` parser, so the base-prefix
    /// check compares against the normalized form rather than the raw
    /// `format!` output.
    fn build_query_url(&self, param: &str, value: &str) -> Result<String, FeedError> {
        let url = Url::parse(&format!("{}?{}={}", self.base_url, param, value))?;
        if !url.as_str().starts_with(&self.base_url) {
            return Err(FeedError::UrlOutOfBounds(url.into()));
        }
        if url.as_str().len() > MAX_URL_LEN {
            return Err(FeedError::UrlTooLong(url.as_str().len()));
        }
        Ok(url.into())
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch_feed(&self, url: &str) -> Result<Vec<Article>, FeedError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched feed body");
        Ok(parse_feed(&body))
    }
}

/// Parse a feed response body into articles, dropping malformed items.
///
/// An unusable envelope (empty body, non-JSON, no `items` array) yields the
/// empty list; it is "no usable result", not an error.
pub(crate) fn parse_feed(body: &str) -> Vec<Article> {
    if body.trim().is_empty() {
        warn!("Feed body is empty");
        return Vec::new();
    }
    let envelope: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Feed body is not JSON");
            return Vec::new();
        }
    };
    let Some(items) = envelope.get("items").and_then(Value::as_array) else {
        warn!("Feed envelope has no items array");
        return Vec::new();
    };

    let mut dropped = 0usize;
    let articles = items
        .iter()
        .filter_map(|item| match parse_item(item) {
            Ok(article) => Some(article),
            Err(e) => {
                dropped += 1;
                warn!(error = %e, "Dropping malformed feed item");
                None
            }
        })
        .unique_by(|article| article.id)
        .collect::<Vec<_>>();

    if dropped > 0 {
        info!(kept = articles.len(), dropped, "Parsed feed with malformed items");
    }
    articles
}

/// Parse one feed item into an [`Article`].
///
/// An item without a usable integer id is rejected even when otherwise
/// well-formed: the id is the merge key downstream.
fn parse_item(item: &Value) -> Result<Article, FeedItemError> {
    let id = match item.get("id") {
        Some(value) if !value.is_null() => value.as_u64().ok_or(FeedItemError::MissingId)?,
        _ => return Err(FeedItemError::MissingId),
    };
    let title = item
        .get("titulo")
        .and_then(Value::as_str)
        .ok_or(FeedItemError::MissingField("titulo"))?;
    if title.trim().is_empty() {
        return Err(FeedItemError::EmptyTitle);
    }
    let summary = item
        .get("introducao")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let published_at = item
        .get("data_publicacao")
        .and_then(Value::as_str)
        .ok_or(FeedItemError::MissingField("data_publicacao"))
        .and_then(parse_publication_date)?;
    let link = item
        .get("link")
        .and_then(Value::as_str)
        .ok_or(FeedItemError::MissingField("link"))?;
    let kind = item
        .get("tipo")
        .and_then(Value::as_str)
        .ok_or(FeedItemError::MissingField("tipo"))
        .and_then(ArticleKind::from_label)?;

    Ok(Article::new(
        id,
        title.to_string(),
        summary.to_string(),
        published_at,
        link.to_string(),
        kind,
    ))
}
