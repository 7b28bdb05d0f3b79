use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use fitness_companion::navigation::{HomeTab, OnboardingStep};
use fitness_companion::{App, logging, open_store};
use fitness_companion_core::activity::{ActivityConfig, Mood};
use fitness_companion_core::config::Config;
use fitness_companion_core::utils::format_clock_time;

/// Headless walk through the main flows: onboarding, login, a short
/// simulated run and the headline feed.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let level = logging::init();
    tracing::info!("fitness_companion: log filter: {}", level);

    // Short timings so the simulated run finishes in about a second.
    let activity = ActivityConfig {
        countdown_ticks: 3,
        tick_interval: Duration::from_millis(20),
        ..ActivityConfig::default()
    };

    let mut app = match Config::from_env() {
        Ok(config) => App::from_config(&config, activity)
            .await
            .context("failed to open preference store")?,
        Err(e) => {
            tracing::warn!(error = %e, "headline service not configured; news tab disabled");
            let data_path = std::env::var("FITNESS_DATA_PATH").ok().map(PathBuf::from);
            let store = open_store(data_path.as_deref())
                .await
                .context("failed to open preference store")?;
            App::new(store, None, activity)
        }
    };

    while let OnboardingStep::Page(i) = app.onboarding.current() {
        tracing::debug!(page = i, title = app.onboarding.title(), "onboarding page");
        app.onboarding.next();
    }

    if app.auth.login("demo@fitness.app", "demo123").await.is_err() {
        app.auth
            .register("demo@fitness.app", "demo123", "demo123")
            .await
            .context("demo registration failed")?;
        app.auth.login("demo@fitness.app", "demo123").await?;
    }
    println!("{}", app.welcome_message().await?);

    app.tabs.select(HomeTab::Activity);
    app.activity.start().await?;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    app.activity.set_locked(false).await;
    app.activity.terminate().await?;
    app.activity.select_mood(Mood::Happy).await?;
    let summary = app.activity.confirm().await?;
    if let (Some(start), Some(end)) = (summary.start_time, summary.end_time) {
        println!("run {} - {}", format_clock_time(start), format_clock_time(end));
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);

    app.tabs.select(HomeTab::News);
    if let Some(feed) = app.news.as_mut() {
        feed.refresh().await;
        match feed.error_message() {
            Some(msg) => println!("{msg}"),
            None => {
                for article in feed.articles() {
                    println!("- {} ({})", article.title, article.source_name());
                }
            }
        }
    }

    Ok(())
}
