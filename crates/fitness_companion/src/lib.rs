//! Presenter layer of the fitness companion: screen state and the actions
//! the UI forwards to it, backed by `fitness_companion_core`.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use fitness_companion_core::NewsClient;
use fitness_companion_core::activity::ActivityConfig;
use fitness_companion_core::config::Config;
use fitness_companion_core::http_client::ReqwestNewsClient;
use fitness_companion_core::preferences::UserPreferences;
use fitness_companion_core::store::{InMemoryStore, JsonFileStore, KeyValueStore};

pub mod activity;
pub mod auth;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod navigation;
pub mod news;
pub mod profile;

mod test_utils;

pub use error::{AppError, AppResult};

use activity::ActivityController;
use auth::AuthController;
use middleware::LoggingMiddleware;
use navigation::{HomeTabs, Onboarding};
use news::NewsFeed;
use profile::ProfileController;

/// File-backed store when a path is given, otherwise in memory.
pub async fn open_store(path: Option<&Path>) -> AppResult<Arc<dyn KeyValueStore>> {
    match path {
        Some(p) => {
            let store = JsonFileStore::open(p).await?;
            info!(path = %p.display(), "preferences loaded from file");
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(InMemoryStore::new())),
    }
}

/// Headline client for `config`, wrapped in the logging middleware.
pub fn news_client(config: &Config) -> Arc<dyn NewsClient> {
    Arc::new(LoggingMiddleware::new(ReqwestNewsClient::from_config(config)))
}

/// Every presenter of one running app, sharing a single preference store.
pub struct App {
    pub prefs: UserPreferences,
    pub onboarding: Onboarding,
    pub auth: AuthController,
    pub profile: ProfileController,
    pub tabs: HomeTabs,
    pub activity: ActivityController,
    /// `None` when no headline service is configured.
    pub news: Option<NewsFeed>,
}

impl App {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        news: Option<NewsFeed>,
        activity: ActivityConfig,
    ) -> Self {
        let prefs = UserPreferences::new(store);
        Self {
            auth: AuthController::new(prefs.clone()),
            profile: ProfileController::new(prefs.clone()),
            prefs,
            onboarding: Onboarding::default(),
            tabs: HomeTabs::default(),
            activity: ActivityController::new(activity),
            news,
        }
    }

    /// Build from configuration: file store and news feed per `config`.
    pub async fn from_config(config: &Config, activity: ActivityConfig) -> AppResult<Self> {
        let store = open_store(config.data_path.as_deref()).await?;
        let feed = NewsFeed::from_config(news_client(config), config);
        Ok(Self::new(store, Some(feed), activity))
    }

    /// Greeting shown on the home screen after login.
    pub async fn welcome_message(&mut self) -> AppResult<String> {
        self.profile.load().await?;
        Ok(format!("Welcome, {}!", self.profile.greeting_name()))
    }
}
