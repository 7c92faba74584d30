//! Typed accessors for the values the app keeps in the kv store.
//!
//! Unreadable values are logged and treated as absent.

use chrono::{DateTime, Utc};

use super::Database;
use crate::error::Result;
use crate::hunger::BackgroundSnapshot;
use crate::notify::PendingAlert;
use crate::pet::Pet;

pub mod keys {
    pub const PET: &str = "pet";
    pub const LAST_HUNGER_LEVEL: &str = "last_hunger_level";
    pub const LAST_BACKGROUND_AT: &str = "last_background_at";
    pub const LAST_ALERT_AT: &str = "last_alert_at";
    pub const PENDING_ALERTS: &str = "pending_alerts";
}

fn parse_timestamp(key: &str, raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable timestamp");
            None
        }
    }
}

impl Database {
    // ── Pet ──────────────────────────────────────────────────────────

    /// The stored pet, or `None` when there is none or it cannot be decoded.
    pub fn load_pet(&self) -> Result<Option<Pet>> {
        Ok(self.kv_get(keys::PET)?.and_then(|data| Pet::decode(&data)))
    }

    pub fn save_pet(&self, pet: &Pet) -> Result<()> {
        self.kv_set(keys::PET, &pet.encode()?)?;
        Ok(())
    }

    // ── Hunger snapshot ──────────────────────────────────────────────

    pub fn save_background_snapshot(&self, snapshot: &BackgroundSnapshot) -> Result<()> {
        self.kv_set(keys::LAST_HUNGER_LEVEL, &snapshot.level.to_string())?;
        self.kv_set(keys::LAST_BACKGROUND_AT, &snapshot.at.to_rfc3339())?;
        Ok(())
    }

    /// Read the background snapshot, leaving it in place.
    pub fn background_snapshot(&self) -> Result<Option<BackgroundSnapshot>> {
        let level = self.kv_get(keys::LAST_HUNGER_LEVEL)?;
        let at = self.kv_get(keys::LAST_BACKGROUND_AT)?;

        let (Some(level), Some(at)) = (level, at) else {
            return Ok(None);
        };
        let level = match level.parse::<u8>() {
            Ok(level) => level,
            Err(e) => {
                tracing::warn!(key = keys::LAST_HUNGER_LEVEL, error = %e, "ignoring unreadable level");
                return Ok(None);
            }
        };
        Ok(parse_timestamp(keys::LAST_BACKGROUND_AT, &at).map(|at| BackgroundSnapshot { level, at }))
    }

    /// Read and clear the background snapshot.
    pub fn take_background_snapshot(&self) -> Result<Option<BackgroundSnapshot>> {
        let snapshot = self.background_snapshot()?;
        self.kv_delete(keys::LAST_HUNGER_LEVEL)?;
        self.kv_delete(keys::LAST_BACKGROUND_AT)?;
        Ok(snapshot)
    }

    // ── Alert throttle ───────────────────────────────────────────────

    pub fn load_last_alert_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .kv_get(keys::LAST_ALERT_AT)?
            .and_then(|raw| parse_timestamp(keys::LAST_ALERT_AT, &raw)))
    }

    pub fn save_last_alert_at(&self, at: Option<DateTime<Utc>>) -> Result<()> {
        match at {
            Some(at) => self.kv_set(keys::LAST_ALERT_AT, &at.to_rfc3339())?,
            None => self.kv_delete(keys::LAST_ALERT_AT)?,
        }
        Ok(())
    }

    /// Forget everything about the current hunger state. Used when a new
    /// pet is adopted.
    pub fn clear_hunger_state(&self) -> Result<()> {
        self.kv_delete(keys::LAST_HUNGER_LEVEL)?;
        self.kv_delete(keys::LAST_BACKGROUND_AT)?;
        self.kv_delete(keys::LAST_ALERT_AT)?;
        self.clear_pending_alerts()
    }

    // ── Alert spool ──────────────────────────────────────────────────

    pub fn pending_alerts(&self) -> Result<Vec<PendingAlert>> {
        let Some(raw) = self.kv_get(keys::PENDING_ALERTS)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(alerts) => Ok(alerts),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable alert spool");
                Ok(Vec::new())
            }
        }
    }

    fn save_pending_alerts(&self, alerts: &[PendingAlert]) -> Result<()> {
        if alerts.is_empty() {
            self.kv_delete(keys::PENDING_ALERTS)?;
        } else {
            self.kv_set(keys::PENDING_ALERTS, &serde_json::to_string(alerts)?)?;
        }
        Ok(())
    }

    /// Spool an alert, replacing a pending one with the same id.
    pub fn push_pending_alert(&self, alert: PendingAlert) -> Result<()> {
        let mut alerts = self.pending_alerts()?;
        alerts.retain(|a| a.id != alert.id);
        alerts.push(alert);
        self.save_pending_alerts(&alerts)
    }

    pub fn clear_pending_alerts(&self) -> Result<()> {
        self.kv_delete(keys::PENDING_ALERTS)?;
        Ok(())
    }

    /// Remove and return the alerts whose fire time has passed, oldest first.
    pub fn take_due_alerts(&self, now: DateTime<Utc>) -> Result<Vec<PendingAlert>> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending_alerts()?
            .into_iter()
            .partition(|a| a.is_due(now));
        if !due.is_empty() {
            self.save_pending_alerts(&waiting)?;
        }
        due.sort_by_key(|a| a.fire_at);
        Ok(due)
    }
}
