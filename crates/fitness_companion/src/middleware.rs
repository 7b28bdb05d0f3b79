//! Middleware layer for cross-cutting concerns around the headline client.
//!
//! Keeps logging and metrics out of both the reqwest client and the feed
//! presenter.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use fitness_companion_core::{HeadlineQuery, NewsClient, NewsError, NewsResponse};
use tracing::debug;

fn error_kind(e: &NewsError) -> &'static str {
    match e {
        NewsError::Http(_) => "http",
        NewsError::Config(_) => "config",
        NewsError::Auth(_) => "auth",
        NewsError::RateLimited(_) => "rate_limited",
        NewsError::Api { .. } => "api",
        NewsError::Status { .. } => "status",
    }
}

/// Wrapper for any [`NewsClient`] that logs each call and records
/// `news_fetch_total`, `news_fetch_errors_total` and
/// `news_fetch_duration_seconds`.
#[derive(Clone)]
pub struct LoggingMiddleware<C: NewsClient> {
    inner: Arc<C>,
}

impl<C: NewsClient> LoggingMiddleware<C> {
    pub fn new(client: C) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: NewsClient + 'static> NewsClient for LoggingMiddleware<C> {
    async fn fetch_headlines_page(
        &self,
        query: &HeadlineQuery,
    ) -> Result<NewsResponse, NewsError> {
        let start = Instant::now();
        debug!(country = %query.country, category = %query.category, "fetching headlines");
        metrics::counter!("news_fetch_total").increment(1);

        let result = self.inner.fetch_headlines_page(query).await;

        let duration = start.elapsed();
        metrics::histogram!("news_fetch_duration_seconds").record(duration.as_secs_f64());
        match &result {
            Ok(resp) => {
                debug!(
                    articles = resp.articles.len(),
                    total = resp.total_results,
                    "headlines fetched in {:?}",
                    duration
                );
            }
            Err(e) => {
                let kind = error_kind(e);
                metrics::counter!("news_fetch_errors_total", "kind" => kind).increment(1);
                debug!(kind, "headline fetch failed in {:?} - error: {}", duration, e);
            }
        }
        result
    }
}
