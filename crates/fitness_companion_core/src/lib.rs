//! Core domain of the fitness companion: the simulated activity session, the
//! injected credential/profile store, the headline client and the form rules
//! shared by every screen.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub mod activity;
pub mod config;
pub mod http_client;
pub mod preferences;
pub mod profile_setup;
pub mod store;
pub mod utils;
pub mod validation;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("api error ({code}): {message}")]
    Api { code: String, message: String },
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

impl NewsError {
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        NewsError::Status {
            status,
            body: body.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub title: String,
    pub description: Option<String>,
    pub url_to_image: Option<String>,
    pub url: String,
    pub source: Option<Source>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Article {
    /// Name of the publishing outlet, or an empty string when the feed omits it.
    pub fn source_name(&self) -> &str {
        self.source.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }
}

/// Body returned by the headline service. Error bodies carry `code` and
/// `message` and usually no articles.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewsResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Parameters of a single top-headlines request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlineQuery {
    pub country: String,
    pub category: String,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl HeadlineQuery {
    pub fn new(country: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            category: category.into(),
            page: None,
            page_size: None,
        }
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}

/// Remote headline service. One request per call; retrying is left to the
/// caller.
#[async_trait]
pub trait NewsClient: Send + Sync + 'static {
    async fn fetch_headlines_page(&self, query: &HeadlineQuery)
    -> Result<NewsResponse, NewsError>;

    async fn fetch_headlines(
        &self,
        country: &str,
        category: &str,
    ) -> Result<Vec<Article>, NewsError> {
        let query = HeadlineQuery::new(country, category);
        Ok(self.fetch_headlines_page(&query).await?.articles)
    }
}
