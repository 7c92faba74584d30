//! Hunger engine implementation.
//!
//! A wall-clock-driven state machine with no internal thread. The caller
//! invokes `tick()` on its own interval while in the foreground and reports
//! lifecycle transitions with `enter_background()` / `resume_foreground()`.
//!
//! ## Lifecycle
//!
//! ```text
//! Foreground --enter_background--> Background --resume_foreground--> Foreground
//!   tick / feed                      (scheduled alert pending)
//! ```
//!
//! Every operation takes the current instant so the clock can be driven
//! from tests.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::rules::HungerRules;
use crate::events::Event;
use crate::notify::{Alert, AlertId, Notifier};
use crate::pet::Pet;

/// Level and time recorded when the app left the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundSnapshot {
    pub level: u8,
    pub at: DateTime<Utc>,
}

impl BackgroundSnapshot {
    /// Whole seconds since the snapshot. A clock that moved backwards
    /// counts as no time at all.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        (now - self.at).num_seconds().max(0) as u64
    }

    /// Catch-up steps and resulting level if the app resumed at `now`.
    pub fn decayed(&self, rules: &HungerRules, now: DateTime<Utc>) -> (u64, u8) {
        rules.decay_after(self.level, self.elapsed_secs(now))
    }
}

/// Mutable hunger state owned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HungerState {
    pub level: u8,
    #[serde(default)]
    pub last_alert_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub background: Option<BackgroundSnapshot>,
}

impl HungerState {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            last_alert_at: None,
            background: None,
        }
    }
}

/// What the engine needs to know about the pet to word and gate alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertProfile {
    pub pet_name: String,
    pub enabled: bool,
}

impl From<&Pet> for AlertProfile {
    fn from(pet: &Pet) -> Self {
        Self {
            pet_name: pet.display_name().to_string(),
            enabled: pet.notifications_enabled,
        }
    }
}

/// Core hunger engine.
pub struct HungerEngine<N: Notifier> {
    rules: HungerRules,
    profile: AlertProfile,
    notifier: N,
    state: HungerState,
    level_tx: watch::Sender<u8>,
}

impl<N: Notifier> HungerEngine<N> {
    /// Create an engine at the configured initial level.
    pub fn new(rules: HungerRules, profile: AlertProfile, notifier: N) -> Self {
        let state = HungerState::new(rules.initial_level);
        Self::with_state(rules, profile, notifier, state)
    }

    /// Create an engine from previously saved state. Out-of-range levels
    /// are clamped.
    pub fn with_state(
        rules: HungerRules,
        profile: AlertProfile,
        notifier: N,
        mut state: HungerState,
    ) -> Self {
        state.level = state.level.min(rules.max_level);
        if let Some(ref mut snapshot) = state.background {
            snapshot.level = snapshot.level.min(rules.max_level);
        }
        let (level_tx, _) = watch::channel(state.level);
        Self {
            rules,
            profile,
            notifier,
            state,
            level_tx,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn level(&self) -> u8 {
        self.state.level
    }

    pub fn is_hungry(&self) -> bool {
        self.rules.is_hungry(self.state.level)
    }

    pub fn is_backgrounded(&self) -> bool {
        self.state.background.is_some()
    }

    pub fn state(&self) -> &HungerState {
        &self.state
    }

    pub fn rules(&self) -> &HungerRules {
        &self.rules
    }

    pub fn profile(&self) -> &AlertProfile {
        &self.profile
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Observe the hunger level. The receiver sees the latest value after
    /// every mutation.
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.level_tx.subscribe()
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            level: self.state.level,
            max_level: self.rules.max_level,
            hungry: self.is_hungry(),
            last_alert_at: self.state.last_alert_at,
            backgrounded_at: self.state.background.map(|s| s.at),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_profile(&mut self, profile: AlertProfile) {
        self.profile = profile;
    }

    /// Raise the level by one portion, reset the alert throttle and drop
    /// any pending alert.
    pub fn feed(&mut self, now: DateTime<Utc>) -> Event {
        let level_before = self.state.level;
        let fed = u16::from(level_before) + u16::from(self.rules.feed_amount);
        self.state.level = fed.min(u16::from(self.rules.max_level)) as u8;
        self.state.last_alert_at = None;
        self.notifier.cancel_all();
        self.publish();
        tracing::debug!(level_before, level = self.state.level, "fed");
        Event::Fed {
            level_before,
            level: self.state.level,
            at: now,
        }
    }

    /// Apply one foreground decay step. Raises an immediate alert when the
    /// pet is hungry and the cooldown since the previous one has passed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Event {
        self.state.level = self.state.level.saturating_sub(self.rules.tick_decay);
        self.publish();

        let mut alerted = false;
        if self.is_hungry() && self.cooldown_elapsed(now) {
            self.state.last_alert_at = Some(now);
            if self.profile.enabled {
                let alert = Alert::hunger(
                    AlertId::HungerNow,
                    &self.profile.pet_name,
                    self.rules.immediate_alert_delay(),
                    now,
                );
                self.notifier.schedule_one_shot(alert);
                alerted = true;
            }
            tracing::info!(level = self.state.level, alerted, "pet is hungry");
        }

        Event::Ticked {
            level: self.state.level,
            alerted,
            at: now,
        }
    }

    /// Record the level for catch-up and install the decay-to-threshold
    /// alert.
    pub fn enter_background(&mut self, now: DateTime<Utc>) -> Event {
        self.state.background = Some(BackgroundSnapshot {
            level: self.state.level,
            at: now,
        });
        let alert_in = self.reschedule(now);
        tracing::debug!(level = self.state.level, ?alert_in, "entered background");
        Event::Backgrounded {
            level: self.state.level,
            alert_in_secs: alert_in.map(|d| d.as_secs()),
            at: now,
        }
    }

    /// Apply the decay that accrued while in the background.
    ///
    /// Returns `None` when there is no background snapshot.
    pub fn resume_foreground(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let snapshot = self.state.background.take()?;
        let elapsed_secs = snapshot.elapsed_secs(now);
        let level_before = snapshot.level;
        let (steps, level) = snapshot.decayed(&self.rules, now);
        self.state.level = level;
        self.publish();

        let alert_in = self.reschedule(now);
        tracing::debug!(elapsed_secs, steps, level, "resumed foreground");
        Some(Event::Resumed {
            elapsed_secs,
            steps,
            level_before,
            level,
            alert_in_secs: alert_in.map(|d| d.as_secs()),
            at: now,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Cancel whatever is pending, then install the decay-to-threshold alert
    /// if it applies. Returns its delay.
    fn reschedule(&mut self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        self.notifier.cancel_all();
        if !self.profile.enabled {
            return None;
        }
        let delay = self.rules.threshold_alert_delay(self.state.level)?;
        let alert = Alert::hunger(AlertId::Hunger, &self.profile.pet_name, delay, now);
        self.notifier.schedule_one_shot(alert);
        Some(delay)
    }

    fn cooldown_elapsed(&self, now: DateTime<Utc>) -> bool {
        match self.state.last_alert_at {
            None => true,
            // A cooldown too long to represent never elapses.
            Some(last) => i64::try_from(self.rules.alert_cooldown_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .is_some_and(|cooldown| now - last > cooldown),
        }
    }

    fn publish(&self) {
        self.level_tx.send_replace(self.state.level);
    }
}
