use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notify::AlertId;

/// Every state change in the engine produces an Event.
/// Front ends print or render them; nothing else consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Fed {
        level_before: u8,
        level: u8,
        at: DateTime<Utc>,
    },
    Ticked {
        level: u8,
        /// An immediate low-hunger alert was handed to the notifier.
        alerted: bool,
        at: DateTime<Utc>,
    },
    Backgrounded {
        level: u8,
        /// Delay of the decay-to-threshold alert, if one was scheduled.
        alert_in_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    Resumed {
        elapsed_secs: u64,
        steps: u64,
        level_before: u8,
        level: u8,
        alert_in_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    /// A spooled alert came due and was shown to the user.
    AlertDelivered {
        id: AlertId,
        title: String,
        body: String,
        fire_at: DateTime<Utc>,
    },
    StateSnapshot {
        level: u8,
        max_level: u8,
        hungry: bool,
        last_alert_at: Option<DateTime<Utc>>,
        backgrounded_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
}
