//! Simulated workout session.
//!
//! A [`Session`] moves through `Initial -> Countdown -> Running -> Ended ->
//! Summary`. Every transition is a method that either applies the change and
//! returns the new state, or leaves the session untouched and reports why via
//! [`ActivityError`]. Time is driven from outside: the owner calls
//! [`Session::countdown_tick`] and [`Session::tick`] on a fixed interval.

use std::ops::RangeInclusive;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::utils::format_elapsed;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ActivityState {
    Initial,
    Countdown,
    Running,
    Ended,
    Summary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Mood {
    Sad,
    #[default]
    Neutral,
    Happy,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Sad, Mood::Neutral, Mood::Happy];
}

/// User or timer action applied to a session, used to describe rejected
/// transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityAction {
    Start,
    CountdownTick,
    ExtendCountdown,
    SkipCountdown,
    Tick,
    Pause,
    Terminate,
    SelectMood,
    Confirm,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ActivityError {
    #[error("{action:?} is not allowed while the session is {state:?}")]
    InvalidTransition {
        action: ActivityAction,
        state: ActivityState,
    },
    #[error("controls are locked; unlock before {0:?}")]
    Locked(ActivityAction),
    #[error("skipping the countdown is disabled")]
    SkipDisabled,
    #[error("invalid activity configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Tunables of the simulation. Lock and skip behaviour are product choices
/// and therefore live here rather than in the transition logic.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityConfig {
    pub countdown_ticks: u32,
    pub countdown_extension: u32,
    pub tick_interval: Duration,
    pub distance_per_tick_km: f64,
    pub calories_per_tick: f64,
    pub heart_rate_range: RangeInclusive<u32>,
    pub start_locked: bool,
    pub allow_skip_countdown: bool,
}

impl ActivityConfig {
    /// Reject settings the ticker or the heart-rate sampler cannot run with.
    pub fn validate(&self) -> Result<(), ActivityError> {
        if self.tick_interval.is_zero() {
            return Err(ActivityError::InvalidConfig("tick interval must be non-zero"));
        }
        if self.heart_rate_range.is_empty() {
            return Err(ActivityError::InvalidConfig("heart rate range is empty"));
        }
        let per_tick = [self.distance_per_tick_km, self.calories_per_tick];
        if per_tick.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ActivityError::InvalidConfig(
                "per-tick increments must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            countdown_ticks: 14,
            countdown_extension: 10,
            tick_interval: Duration::from_secs(1),
            distance_per_tick_km: 0.01,
            calories_per_tick: 0.8,
            heart_rate_range: 120..=180,
            start_locked: true,
            allow_skip_countdown: true,
        }
    }
}

/// Produces the heart rate reported on each running tick.
pub trait HeartRateSource: Send {
    fn sample(&mut self, range: RangeInclusive<u32>) -> u32;
}

/// Uniform sampling over the configured range.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomHeartRate;

impl HeartRateSource for RandomHeartRate {
    fn sample(&mut self, range: RangeInclusive<u32>) -> u32 {
        rand::random_range(range)
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    config: ActivityConfig,
    state: ActivityState,
    countdown_remaining: u32,
    elapsed_seconds: u64,
    distance_km: f64,
    calories_burned: f64,
    heart_rate: u32,
    is_locked: bool,
    mood: Mood,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ActivityConfig::default())
    }
}

impl Session {
    pub fn new(config: ActivityConfig) -> Self {
        let is_locked = config.start_locked;
        Self {
            config,
            state: ActivityState::Initial,
            countdown_remaining: 0,
            elapsed_seconds: 0,
            distance_km: 0.0,
            calories_burned: 0.0,
            heart_rate: 0,
            is_locked,
            mood: Mood::default(),
            start_time: None,
            end_time: None,
            confirmed_at: None,
        }
    }

    pub fn config(&self) -> &ActivityConfig {
        &self.config
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn calories_burned(&self) -> f64 {
        self.calories_burned
    }

    pub fn heart_rate(&self) -> u32 {
        self.heart_rate
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    fn require(&self, action: ActivityAction, state: ActivityState) -> Result<(), ActivityError> {
        if self.state == state {
            Ok(())
        } else {
            Err(ActivityError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn enter(&mut self, next: ActivityState) -> ActivityState {
        tracing::debug!(from = ?self.state, to = ?next, "activity transition");
        self.state = next;
        next
    }

    /// Begin the countdown and record the start time. A session with an
    /// invalid configuration never leaves Initial.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<ActivityState, ActivityError> {
        self.require(ActivityAction::Start, ActivityState::Initial)?;
        self.config.validate()?;
        self.start_time = Some(now);
        self.countdown_remaining = self.config.countdown_ticks;
        if self.countdown_remaining == 0 {
            return Ok(self.enter(ActivityState::Running));
        }
        Ok(self.enter(ActivityState::Countdown))
    }

    /// One countdown step. Reaching zero moves the session to Running.
    pub fn countdown_tick(&mut self) -> Result<ActivityState, ActivityError> {
        self.require(ActivityAction::CountdownTick, ActivityState::Countdown)?;
        self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
        if self.countdown_remaining == 0 {
            return Ok(self.enter(ActivityState::Running));
        }
        Ok(self.state)
    }

    /// Add the configured extension to the countdown. Returns the new counter.
    pub fn extend_countdown(&mut self) -> Result<u32, ActivityError> {
        self.require(ActivityAction::ExtendCountdown, ActivityState::Countdown)?;
        self.countdown_remaining = self
            .countdown_remaining
            .saturating_add(self.config.countdown_extension);
        Ok(self.countdown_remaining)
    }

    pub fn skip_countdown(&mut self) -> Result<ActivityState, ActivityError> {
        self.require(ActivityAction::SkipCountdown, ActivityState::Countdown)?;
        if !self.config.allow_skip_countdown {
            return Err(ActivityError::SkipDisabled);
        }
        self.countdown_remaining = 0;
        Ok(self.enter(ActivityState::Running))
    }

    /// Accumulate one interval of simulated running.
    pub fn tick(&mut self, heart_rate: &mut dyn HeartRateSource) -> Result<(), ActivityError> {
        self.require(ActivityAction::Tick, ActivityState::Running)?;
        self.elapsed_seconds += 1;
        self.distance_km += self.config.distance_per_tick_km;
        self.calories_burned += self.config.calories_per_tick;
        let range = self.config.heart_rate_range.clone();
        let (lo, hi) = (*range.start(), *range.end());
        self.heart_rate = heart_rate.sample(range).clamp(lo, hi);
        Ok(())
    }

    /// Flip the lock and return the new value.
    pub fn toggle_lock(&mut self) -> bool {
        self.is_locked = !self.is_locked;
        self.is_locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.is_locked = locked;
    }

    fn require_unlocked_running(&self, action: ActivityAction) -> Result<(), ActivityError> {
        self.require(action, ActivityState::Running)?;
        if self.is_locked {
            return Err(ActivityError::Locked(action));
        }
        Ok(())
    }

    /// Stop accumulating without stamping an end time.
    pub fn pause(&mut self) -> Result<ActivityState, ActivityError> {
        self.require_unlocked_running(ActivityAction::Pause)?;
        Ok(self.enter(ActivityState::Ended))
    }

    /// Stop accumulating and stamp the end time.
    pub fn terminate(&mut self, now: DateTime<Utc>) -> Result<ActivityState, ActivityError> {
        self.require_unlocked_running(ActivityAction::Terminate)?;
        self.end_time.get_or_insert(now);
        Ok(self.enter(ActivityState::Ended))
    }

    pub fn select_mood(&mut self, mood: Mood) -> Result<(), ActivityError> {
        self.require(ActivityAction::SelectMood, ActivityState::Ended)?;
        self.mood = mood;
        Ok(())
    }

    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<ActivityState, ActivityError> {
        self.require(ActivityAction::Confirm, ActivityState::Ended)?;
        self.confirmed_at = Some(now);
        Ok(self.enter(ActivityState::Summary))
    }

    /// Derived metrics, available once the session reached Summary.
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.state != ActivityState::Summary {
            return None;
        }
        let mut summary =
            SessionSummary::from_totals(self.elapsed_seconds, self.distance_km, self.calories_burned);
        summary.heart_rate = self.heart_rate;
        summary.mood = self.mood;
        summary.start_time = self.start_time;
        summary.end_time = self.end_time.or(self.confirmed_at);
        Some(summary)
    }

    /// Discard everything and return to Initial with the same configuration.
    pub fn restart(&mut self) {
        *self = Session::new(self.config.clone());
    }
}

/// Read-only metrics shown once a session is over.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub elapsed_seconds: u64,
    pub elapsed: String,
    pub distance_km: f64,
    pub calories_burned: f64,
    pub total_minutes: f64,
    pub average_pace_min_per_km: f64,
    pub avg_speed_kmh: f64,
    pub max_speed_kmh: f64,
    pub heart_rate: u32,
    pub mood: Mood,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl SessionSummary {
    /// Simulated peak relative to the average speed.
    pub const MAX_SPEED_FACTOR: f64 = 1.2;

    pub fn from_totals(elapsed_seconds: u64, distance_km: f64, calories_burned: f64) -> Self {
        let total_minutes = elapsed_seconds as f64 / 60.0;
        let average_pace_min_per_km = if distance_km > 0.0 {
            total_minutes / distance_km
        } else {
            0.0
        };
        let avg_speed_kmh = if total_minutes > 0.0 {
            distance_km / (total_minutes / 60.0)
        } else {
            0.0
        };
        Self {
            elapsed_seconds,
            elapsed: format_elapsed(elapsed_seconds),
            distance_km,
            calories_burned,
            total_minutes,
            average_pace_min_per_km,
            avg_speed_kmh,
            max_speed_kmh: avg_speed_kmh * Self::MAX_SPEED_FACTOR,
            heart_rate: 0,
            mood: Mood::default(),
            start_time: None,
            end_time: None,
        }
    }
}
