//! In-memory notifier that records every call.

use super::{Alert, AlertId, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    RequestPermission,
    CancelAll,
    Schedule(Alert),
}

/// Fake alert subsystem for tests and dry runs.
///
/// Models the pending set the way a platform notification center does:
/// same-id scheduling replaces, `cancel_all` empties it.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    granted: bool,
    calls: Vec<NotifierCall>,
    pending: Vec<Alert>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            granted: true,
            calls: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// A notifier whose permission prompt is always declined.
    pub fn denied() -> Self {
        Self {
            granted: false,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> &[NotifierCall] {
        &self.calls
    }

    pub fn pending(&self) -> &[Alert] {
        &self.pending
    }

    pub fn pending_alert(&self, id: AlertId) -> Option<&Alert> {
        self.pending.iter().find(|a| a.id == id)
    }

    /// Every alert ever scheduled, in call order.
    pub fn scheduled(&self) -> impl Iterator<Item = &Alert> {
        self.calls.iter().filter_map(|call| match call {
            NotifierCall::Schedule(alert) => Some(alert),
            _ => None,
        })
    }

    pub fn count_scheduled(&self, id: AlertId) -> usize {
        self.scheduled().filter(|a| a.id == id).count()
    }
}

impl Notifier for RecordingNotifier {
    fn request_permission(&mut self) -> bool {
        self.calls.push(NotifierCall::RequestPermission);
        self.granted
    }

    fn cancel_all(&mut self) {
        self.calls.push(NotifierCall::CancelAll);
        self.pending.clear();
    }

    fn schedule_one_shot(&mut self, alert: Alert) {
        self.calls.push(NotifierCall::Schedule(alert.clone()));
        if !self.granted {
            return;
        }
        self.pending.retain(|a| a.id != alert.id);
        self.pending.push(alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn alert(id: AlertId, secs: u64) -> Alert {
        Alert::hunger(id, "Mochi", Duration::from_secs(secs), chrono::Utc::now())
    }

    #[test]
    fn same_id_replaces_pending() {
        let mut n = RecordingNotifier::new();
        n.schedule_one_shot(alert(AlertId::Hunger, 10));
        n.schedule_one_shot(alert(AlertId::Hunger, 20));
        n.schedule_one_shot(alert(AlertId::HungerNow, 1));
        assert_eq!(n.pending().len(), 2);
        assert_eq!(
            n.pending_alert(AlertId::Hunger).unwrap().delay,
            Duration::from_secs(20)
        );
        assert_eq!(n.count_scheduled(AlertId::Hunger), 2);
    }

    #[test]
    fn cancel_all_empties_pending() {
        let mut n = RecordingNotifier::new();
        n.schedule_one_shot(alert(AlertId::Hunger, 10));
        n.cancel_all();
        assert!(n.pending().is_empty());
        assert_eq!(n.calls().last(), Some(&NotifierCall::CancelAll));
    }

    #[test]
    fn denied_permission_keeps_nothing_pending() {
        let mut n = RecordingNotifier::denied();
        assert!(!n.request_permission());
        n.schedule_one_shot(alert(AlertId::Hunger, 10));
        assert!(n.pending().is_empty());
        assert_eq!(n.scheduled().count(), 1);
    }
}
