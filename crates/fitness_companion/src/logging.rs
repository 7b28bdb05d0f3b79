//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_VAR: &str = "FITNESS_COMPANION_LOG_LEVEL";

/// `FITNESS_COMPANION_LOG_LEVEL`, then `RUST_LOG`, then `info`.
pub fn log_level_with<F>(mut get: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    get(LOG_LEVEL_VAR)
        .or_else(|| get("RUST_LOG"))
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "info".to_string())
}

/// HTTP internals stay at warn unless asked for explicitly.
pub fn env_filter(level: &str) -> EnvFilter {
    let combined = format!("{level},hyper=warn,reqwest=warn");
    EnvFilter::try_new(combined).unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"))
}

pub fn init() -> String {
    let level = log_level_with(|k| std::env::var(k).ok());
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter(&level))
        .init();
    level
}
