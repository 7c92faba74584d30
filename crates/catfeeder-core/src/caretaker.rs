//! The controller that owns the pet's hunger state for one app session.
//!
//! A `Caretaker` is created when the app comes to the foreground
//! ([`Caretaker::wake`]) and consumed when it leaves ([`Caretaker::sleep`]).
//! In between it forwards commands to the [`HungerEngine`] and writes the
//! few values that must survive the process to the kv store.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::error::Result;
use crate::events::Event;
use crate::hunger::{AlertProfile, HungerEngine, HungerRules, HungerState};
use crate::notify::Notifier;
use crate::pet::Pet;
use crate::storage::Database;

/// Project the current state from storage without starting a session.
///
/// Nothing is written, so repeated peeks do not lose the fractional
/// catch-up step a wake/sleep cycle would round away.
pub fn peek(db: &Database, rules: &HungerRules, now: DateTime<Utc>) -> Result<Event> {
    let snapshot = db.background_snapshot()?;
    let level = match snapshot {
        Some(snapshot) => snapshot.decayed(rules, now).1,
        None => rules.initial_level,
    };
    Ok(Event::StateSnapshot {
        level,
        max_level: rules.max_level,
        hungry: rules.is_hungry(level),
        last_alert_at: db.load_last_alert_at()?,
        backgrounded_at: snapshot.map(|s| s.at),
        at: now,
    })
}

pub struct Caretaker<'db, N: Notifier> {
    db: &'db Database,
    pet: Pet,
    engine: HungerEngine<N>,
}

impl<'db, N: Notifier> Caretaker<'db, N> {
    /// Start a session: ask for alert permission, restore the throttle and
    /// apply whatever decay accrued since the last session.
    ///
    /// Returns the `Resumed` event when there was a background snapshot.
    pub fn wake(
        db: &'db Database,
        pet: Pet,
        rules: HungerRules,
        mut notifier: N,
        now: DateTime<Utc>,
    ) -> Result<(Self, Option<Event>)> {
        if !notifier.request_permission() {
            tracing::info!("alert permission not granted, alerts will not be shown");
        }

        let state = HungerState {
            level: rules.initial_level,
            last_alert_at: db.load_last_alert_at()?,
            background: db.take_background_snapshot()?,
        };
        let profile = AlertProfile::from(&pet);
        let mut caretaker = Self {
            db,
            pet,
            engine: HungerEngine::with_state(rules, profile, notifier, state),
        };
        let resumed = caretaker.engine.resume_foreground(now);
        Ok((caretaker, resumed))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn engine(&self) -> &HungerEngine<N> {
        &self.engine
    }

    pub fn level(&self) -> u8 {
        self.engine.level()
    }

    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.engine.subscribe()
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        self.engine.snapshot(now)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn feed(&mut self, now: DateTime<Utc>) -> Result<Event> {
        let event = self.engine.feed(now);
        self.db.save_last_alert_at(None)?;
        Ok(event)
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<Event> {
        let event = self.engine.tick(now);
        self.db.save_last_alert_at(self.engine.state().last_alert_at)?;
        Ok(event)
    }

    pub fn enter_background(&mut self, now: DateTime<Utc>) -> Result<Event> {
        let event = self.engine.enter_background(now);
        self.persist()?;
        Ok(event)
    }

    pub fn resume_foreground(&mut self, now: DateTime<Utc>) -> Result<Option<Event>> {
        let event = self.engine.resume_foreground(now);
        if event.is_some() {
            self.db.take_background_snapshot()?;
        }
        Ok(event)
    }

    /// Replace the pet (settings changes). Turning notifications off drops
    /// any pending alert.
    pub fn update_pet(&mut self, pet: Pet) -> Result<()> {
        self.db.save_pet(&pet)?;
        self.engine.set_profile(AlertProfile::from(&pet));
        if !pet.notifications_enabled {
            self.engine.notifier_mut().cancel_all();
        }
        self.pet = pet;
        Ok(())
    }

    /// End the session. Enters the background unless already there, and
    /// persists the snapshot either way.
    pub fn sleep(mut self, now: DateTime<Utc>) -> Result<Option<Event>> {
        if self.engine.is_backgrounded() {
            self.persist()?;
            return Ok(None);
        }
        self.enter_background(now).map(Some)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist(&self) -> Result<()> {
        let state = self.engine.state();
        if let Some(snapshot) = state.background {
            self.db.save_background_snapshot(&snapshot)?;
        }
        self.db.save_last_alert_at(state.last_alert_at)
    }
}
