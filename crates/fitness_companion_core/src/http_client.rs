//! HTTP client implementation for the top-headlines service.
//!
//! This module provides a reqwest-based implementation of the [`NewsClient`](crate::NewsClient) trait.

use crate::config::Config;
use crate::{HeadlineQuery, NewsClient, NewsError, NewsResponse};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Client for the top-headlines API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestNewsClient {
    base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl ReqwestNewsClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the headline service (e.g., "https://newsapi.org")
    /// * `api_key` - The API key sent with every request
    pub fn new(base_url: &str, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fitness-companion/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.news_base_url, config.news_api_key.clone())
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("X-Api-Key", self.api_key.expose_secret())
    }

    /// Handle a response, converting status codes and error bodies to errors.
    async fn handle_response(&self, resp: reqwest::Response) -> Result<NewsResponse, NewsError> {
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        let body = resp.json::<NewsResponse>().await?;
        if !body.is_ok() {
            return Err(NewsError::Api {
                code: body.code.unwrap_or_else(|| "unknown".into()),
                message: body.message.unwrap_or_default(),
            });
        }
        Ok(body)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> NewsError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<NewsResponse>(&body).ok();
        let message = parsed
            .as_ref()
            .and_then(|p| p.message.clone())
            .unwrap_or_else(|| body.chars().take(256).collect());

        match status {
            401 | 403 => NewsError::Auth(message),
            429 => NewsError::RateLimited(message),
            _ => match parsed.and_then(|p| p.code) {
                Some(code) => NewsError::Api { code, message },
                None => NewsError::from_status(status, message),
            },
        }
    }
}

#[async_trait]
impl NewsClient for ReqwestNewsClient {
    async fn fetch_headlines_page(
        &self,
        query: &HeadlineQuery,
    ) -> Result<NewsResponse, NewsError> {
        let url = format!("{}/v2/top-headlines", self.base_url);
        let mut pairs: Vec<(&str, String)> = vec![
            ("country", query.country.clone()),
            ("category", query.category.clone()),
        ];
        if let Some(page) = query.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = query.page_size {
            pairs.push(("pageSize", size.to_string()));
        }
        tracing::debug!(
            country = %query.country,
            category = %query.category,
            page = ?query.page,
            "requesting top headlines"
        );
        let resp = self.get_request(&url).query(&pairs).send().await?;
        self.handle_response(resp).await
    }
}
