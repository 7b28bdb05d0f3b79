//! News tab presenter: one fetch per refresh, manual retry only.

use std::sync::Arc;

use fitness_companion_core::config::Config;
use fitness_companion_core::{Article, NewsClient};
use tracing::{info, warn};

use crate::AppError;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FeedState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Article>),
    Failed(String),
}

pub struct NewsFeed {
    client: Arc<dyn NewsClient>,
    country: String,
    category: String,
    state: FeedState,
}

impl NewsFeed {
    pub fn new(
        client: Arc<dyn NewsClient>,
        country: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            client,
            country: country.into(),
            category: category.into(),
            state: FeedState::Idle,
        }
    }

    pub fn from_config(client: Arc<dyn NewsClient>, config: &Config) -> Self {
        Self::new(client, config.country.clone(), config.category.clone())
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FeedState::Loading)
    }

    pub fn articles(&self) -> &[Article] {
        match &self.state {
            FeedState::Loaded(articles) => articles,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FeedState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Fetch the headlines once. Also serves as the retry action after a
    /// failure.
    pub async fn refresh(&mut self) -> &FeedState {
        self.state = FeedState::Loading;
        match self
            .client
            .fetch_headlines(&self.country, &self.category)
            .await
        {
            Ok(articles) => {
                info!(count = articles.len(), "news feed loaded");
                self.state = FeedState::Loaded(articles);
            }
            Err(e) => {
                let err = AppError::from(e);
                warn!(error = %err, "news feed failed");
                self.state = FeedState::Failed(err.user_message());
            }
        }
        &self.state
    }
}
