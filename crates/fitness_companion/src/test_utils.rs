//! Shared test utilities and a mock `NewsClient` used by unit tests.
#![cfg(test)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use fitness_companion_core::{Article, HeadlineQuery, NewsClient, NewsError, NewsResponse, Source};

/// Scripted headline client. Each call pops the next scripted outcome; once the
/// script runs out the last outcome repeats.
pub struct MockNewsClient {
    script: Mutex<VecDeque<Result<Vec<Article>, u16>>>,
    last: Mutex<Result<Vec<Article>, u16>>,
    calls: AtomicUsize,
}

impl MockNewsClient {
    pub fn scripted(outcomes: Vec<Result<Vec<Article>, u16>>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            last: Mutex::new(Ok(Vec::new())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self::scripted(vec![Ok(articles)])
    }

    /// Always answers with HTTP 500.
    pub fn failing() -> Self {
        Self::scripted(vec![Err(500)])
    }

    pub fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: Some(format!("about {title}")),
            url_to_image: None,
            url: format!("https://example.com/{}", title.replace(' ', "-")),
            source: Some(Source {
                id: None,
                name: "Mock Wire".into(),
            }),
            author: None,
            published_at: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsClient for MockNewsClient {
    async fn fetch_headlines_page(
        &self,
        _query: &HeadlineQuery,
    ) -> Result<NewsResponse, NewsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = {
            let mut last = self.last.lock().unwrap();
            if let Some(next) = self.script.lock().unwrap().pop_front() {
                *last = next;
            }
            last.clone()
        };
        match outcome {
            Ok(articles) => Ok(NewsResponse {
                status: "ok".into(),
                total_results: articles.len() as u32,
                articles,
                code: None,
                message: None,
            }),
            Err(status) => Err(NewsError::from_status(status, "mock failure")),
        }
    }
}
