//! Notifier backed by the key-value store.
//!
//! Pending alerts outlive the process: a later invocation calls
//! [`Database::take_due_alerts`] and presents whatever has come due.

use super::{Alert, Notifier, PendingAlert};
use crate::storage::Database;

pub struct SpoolNotifier<'db> {
    db: &'db Database,
    permitted: bool,
}

impl<'db> SpoolNotifier<'db> {
    /// `permitted` mirrors the user's alert permission; when it is `false`
    /// scheduling silently does nothing.
    pub fn new(db: &'db Database, permitted: bool) -> Self {
        Self { db, permitted }
    }
}

impl Notifier for SpoolNotifier<'_> {
    fn request_permission(&mut self) -> bool {
        self.permitted
    }

    fn cancel_all(&mut self) {
        if let Err(e) = self.db.clear_pending_alerts() {
            tracing::warn!(error = %e, "failed to cancel pending alerts");
        }
    }

    fn schedule_one_shot(&mut self, alert: Alert) {
        if !self.permitted {
            tracing::debug!(id = %alert.id, "alert permission denied, dropping alert");
            return;
        }
        let pending = PendingAlert::from_alert(alert);
        tracing::debug!(id = %pending.id, fire_at = %pending.fire_at, "alert spooled");
        if let Err(e) = self.db.push_pending_alert(pending) {
            tracing::warn!(error = %e, "failed to spool alert");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::AlertId;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 28, 12, 0, 0).unwrap()
    }

    fn alert(id: AlertId, secs: u64) -> Alert {
        Alert::hunger(id, "Mochi", Duration::from_secs(secs), t0())
    }

    #[test]
    fn spooled_alert_comes_due_after_delay() {
        let db = Database::open_memory().unwrap();
        let mut n = SpoolNotifier::new(&db, true);
        n.schedule_one_shot(alert(AlertId::Hunger, 10));

        let later = t0() + chrono::Duration::seconds(9);
        assert!(db.take_due_alerts(later).unwrap().is_empty());
        let due = db.take_due_alerts(t0() + chrono::Duration::seconds(10)).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].fire_at, t0() + chrono::Duration::seconds(10));
        assert_eq!(due[0].body, "Mochi is starving! 🥺");
        assert!(db.pending_alerts().unwrap().is_empty());
    }

    #[test]
    fn same_id_replaces_spooled_alert() {
        let db = Database::open_memory().unwrap();
        let mut n = SpoolNotifier::new(&db, true);
        n.schedule_one_shot(alert(AlertId::Hunger, 10));
        n.schedule_one_shot(alert(AlertId::Hunger, 30));
        n.schedule_one_shot(alert(AlertId::HungerNow, 1));
        assert_eq!(db.pending_alerts().unwrap().len(), 2);
    }

    #[test]
    fn cancel_all_clears_spool() {
        let db = Database::open_memory().unwrap();
        let mut n = SpoolNotifier::new(&db, true);
        n.schedule_one_shot(alert(AlertId::Hunger, 10));
        n.cancel_all();
        assert!(db.pending_alerts().unwrap().is_empty());
    }

    #[test]
    fn denied_permission_drops_alerts() {
        let db = Database::open_memory().unwrap();
        let mut n = SpoolNotifier::new(&db, false);
        assert!(!n.request_permission());
        n.schedule_one_shot(alert(AlertId::Hunger, 10));
        assert!(db.pending_alerts().unwrap().is_empty());
    }
}
