use crate::NewsError;
use secrecy::SecretString;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_CATEGORY: &str = "health";

#[derive(Clone, Debug)]
pub struct Config {
    pub news_api_key: SecretString,
    pub news_base_url: String,
    pub country: String,
    pub category: String,
    /// Location of the JSON preference file. `None` keeps preferences in memory.
    pub data_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, NewsError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, NewsError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api = get("FITNESS_NEWS_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| NewsError::Config("FITNESS_NEWS_API_KEY missing".into()))?;
        let news_base_url =
            get("FITNESS_NEWS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let country = get("FITNESS_NEWS_COUNTRY").unwrap_or_else(|| DEFAULT_COUNTRY.into());
        let category = get("FITNESS_NEWS_CATEGORY").unwrap_or_else(|| DEFAULT_CATEGORY.into());
        let data_path = get("FITNESS_DATA_PATH").map(PathBuf::from);
        Ok(Self {
            news_api_key: SecretString::new(api.into()),
            news_base_url,
            country,
            category,
            data_path,
        })
    }
}
