//! Activity tab presenter.
//!
//! Owns one [`Session`] and the periodic task that drives it. The task is
//! spawned when the countdown begins and is cancelled through a `watch`
//! channel as soon as the session leaves Running, or when the controller is
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use fitness_companion_core::activity::{
    ActivityConfig, ActivityError, ActivityState, HeartRateSource, Mood, RandomHeartRate, Session,
    SessionSummary,
};

use crate::AppResult;

struct Inner {
    session: Session,
    heart_rate: Box<dyn HeartRateSource>,
}

struct Ticker {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(inner: Arc<Mutex<Inner>>, period: Duration) -> Self {
        let (cancel, cancel_rx) = watch::channel(false);
        let handle = tokio::spawn(run_ticker(inner, period, cancel_rx));
        Self { cancel, handle }
    }

    fn stop(self) {
        // The task may already have exited on its own.
        let _ = self.cancel.send(true);
    }
}

async fn run_ticker(inner: Arc<Mutex<Inner>>, period: Duration, mut cancel: watch::Receiver<bool>) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    loop {
        tokio::select! {
            biased;
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                let mut guard = inner.lock().await;
                let Inner { session, heart_rate } = &mut *guard;
                match session.state() {
                    ActivityState::Countdown => match session.countdown_tick() {
                        Ok(ActivityState::Running) => {
                            info!("countdown finished, activity running");
                            // first running tick lands one full period after entering Running
                            interval.reset();
                        }
                        Ok(_) => {}
                        Err(e) => {
                            warn!(error = %e, "countdown tick rejected");
                            break;
                        }
                    },
                    ActivityState::Running => {
                        if let Err(e) = session.tick(heart_rate.as_mut()) {
                            warn!(error = %e, "running tick rejected");
                            break;
                        }
                    }
                    _ => break,
                }
            }
        }
    }
    debug!("activity ticker stopped");
}

fn log_rejected(e: &ActivityError) {
    debug!(error = %e, "activity action rejected");
}

pub struct ActivityController {
    inner: Arc<Mutex<Inner>>,
    ticker: Option<Ticker>,
    tick_interval: Duration,
}

impl ActivityController {
    pub fn new(config: ActivityConfig) -> Self {
        Self::with_heart_rate_source(config, Box::new(RandomHeartRate))
    }

    pub fn with_heart_rate_source(config: ActivityConfig, source: Box<dyn HeartRateSource>) -> Self {
        let tick_interval = config.tick_interval;
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: Session::new(config),
                heart_rate: source,
            })),
            ticker: None,
            tick_interval,
        }
    }

    fn start_ticker(&mut self) {
        self.stop_ticker();
        self.ticker = Some(Ticker::spawn(self.inner.clone(), self.tick_interval));
    }

    fn stop_ticker(&mut self) {
        if let Some(t) = self.ticker.take() {
            t.stop();
        }
    }

    /// Whether a ticker task is currently alive.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.handle.is_finished())
    }

    pub async fn start(&mut self) -> AppResult<ActivityState> {
        let state = self
            .inner
            .lock()
            .await
            .session
            .start(Utc::now())
            .inspect_err(log_rejected)?;
        self.start_ticker();
        info!(?state, "activity started");
        Ok(state)
    }

    pub async fn extend_countdown(&mut self) -> AppResult<u32> {
        let remaining = self
            .inner
            .lock()
            .await
            .session
            .extend_countdown()
            .inspect_err(log_rejected)?;
        debug!(remaining, "countdown extended");
        Ok(remaining)
    }

    pub async fn skip_countdown(&mut self) -> AppResult<ActivityState> {
        let state = self
            .inner
            .lock()
            .await
            .session
            .skip_countdown()
            .inspect_err(log_rejected)?;
        self.start_ticker();
        info!("countdown skipped, activity running");
        Ok(state)
    }

    pub async fn toggle_lock(&mut self) -> bool {
        self.inner.lock().await.session.toggle_lock()
    }

    pub async fn set_locked(&mut self, locked: bool) {
        self.inner.lock().await.session.set_locked(locked);
    }

    pub async fn pause(&mut self) -> AppResult<ActivityState> {
        let state = self
            .inner
            .lock()
            .await
            .session
            .pause()
            .inspect_err(log_rejected)?;
        self.stop_ticker();
        info!("activity paused");
        Ok(state)
    }

    pub async fn terminate(&mut self) -> AppResult<ActivityState> {
        let state = self
            .inner
            .lock()
            .await
            .session
            .terminate(Utc::now())
            .inspect_err(log_rejected)?;
        self.stop_ticker();
        info!("activity terminated");
        Ok(state)
    }

    pub async fn select_mood(&mut self, mood: Mood) -> AppResult<()> {
        self.inner
            .lock()
            .await
            .session
            .select_mood(mood)
            .inspect_err(log_rejected)?;
        Ok(())
    }

    pub async fn confirm(&mut self) -> AppResult<SessionSummary> {
        let mut guard = self.inner.lock().await;
        guard.session.confirm(Utc::now()).inspect_err(log_rejected)?;
        let summary = guard
            .session
            .summary()
            .ok_or_else(|| crate::AppError::Internal("summary unavailable after confirm".into()))?;
        info!(
            elapsed_seconds = summary.elapsed_seconds,
            distance_km = summary.distance_km,
            "activity summary ready"
        );
        Ok(summary)
    }

    /// Drop the current session and begin a new one in Initial.
    pub async fn restart(&mut self) {
        self.stop_ticker();
        self.inner.lock().await.session.restart();
    }

    /// Copy of the session for rendering.
    pub async fn snapshot(&self) -> Session {
        self.inner.lock().await.session.clone()
    }

    pub async fn summary(&self) -> Option<SessionSummary> {
        self.inner.lock().await.session.summary()
    }
}

impl Drop for ActivityController {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
