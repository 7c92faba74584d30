//! Alert delivery capability.
//!
//! The hunger engine talks to the outside world only through [`Notifier`].
//! Calls are fire-and-forget: the engine never inspects an outcome, and an
//! implementation that cannot deliver simply drops the alert.

mod recording;
mod spool;

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use recording::{NotifierCall, RecordingNotifier};
pub use spool::SpoolNotifier;

pub const ALERT_TITLE: &str = "Hunger alert! 🚨";

/// Identifies an alert slot. Scheduling an alert replaces any pending
/// alert with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertId {
    /// Decay-to-threshold alert installed when the app goes to the background.
    Hunger,
    /// Low-hunger alert raised by the foreground tick.
    HungerNow,
}

impl AlertId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertId::Hunger => "hunger",
            AlertId::HungerNow => "hunger-now",
        }
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A one-shot alert request. The delay counts from `requested_at`, the
/// engine's clock at the moment it asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub title: String,
    pub body: String,
    pub delay: Duration,
    pub requested_at: DateTime<Utc>,
}

impl Alert {
    pub fn hunger(id: AlertId, pet_name: &str, delay: Duration, requested_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: ALERT_TITLE.to_string(),
            body: format!("{pet_name} is starving! 🥺"),
            delay,
            requested_at,
        }
    }

    /// When the alert should fire. Delays past the representable range
    /// saturate to the latest instant, so such an alert never comes due.
    pub fn fire_at(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.delay)
            .ok()
            .and_then(|delay| self.requested_at.checked_add_signed(delay))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// An alert waiting in the spool for its fire time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAlert {
    pub id: AlertId,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
}

impl PendingAlert {
    pub fn from_alert(alert: Alert) -> Self {
        let fire_at = alert.fire_at();
        Self {
            id: alert.id,
            title: alert.title,
            body: alert.body,
            fire_at,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.fire_at <= now
    }
}

/// The OS-level alert subsystem as seen by the engine.
pub trait Notifier {
    /// Ask for permission to show alerts. `false` means alerts will not be
    /// visible; callers treat that as normal.
    fn request_permission(&mut self) -> bool;

    /// Remove every pending alert.
    fn cancel_all(&mut self);

    /// Register an alert to fire once after `alert.delay`.
    fn schedule_one_shot(&mut self, alert: Alert);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn request_permission(&mut self) -> bool {
        (**self).request_permission()
    }

    fn cancel_all(&mut self) {
        (**self).cancel_all()
    }

    fn schedule_one_shot(&mut self, alert: Alert) {
        (**self).schedule_one_shot(alert)
    }
}
