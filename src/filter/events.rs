//! Admission event log.
//!
//! Bounded in-memory ring of recent admission decisions, for the `status`
//! console surface and operator inspection.

use std::collections::VecDeque;
use std::sync::RwLock;

/// One admission decision.
#[derive(Debug, Clone)]
pub struct AdmissionEvent {
    /// When the decision was made.
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// The address text the transport handed us.
    pub address: String,
    /// Slot index of the first matching rule, if any.
    pub matched_slot: Option<usize>,
    /// Whether the connection was admitted.
    pub admitted: bool,
}

/// Bounded log of admission events; oldest entries are evicted first.
#[derive(Debug)]
pub struct AdmissionLog {
    events: RwLock<VecDeque<AdmissionEvent>>,
    max_events: usize,
}

impl AdmissionLog {
    /// Create a log holding at most `max_events` entries.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(max_events)),
            max_events,
        }
    }

    /// Record an event, evicting the oldest when full.
    pub fn log(&self, event: AdmissionEvent) {
        let mut events = self.events.write().unwrap();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Most recent events, newest first.
    pub fn recent(&self, count: usize) -> Vec<AdmissionEvent> {
        let events = self.events.read().unwrap();
        events.iter().rev().take(count).cloned().collect()
    }

    /// Number of events currently retained.
    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(address: &str, admitted: bool) -> AdmissionEvent {
        AdmissionEvent {
            timestamp: chrono::Utc::now(),
            address: address.to_string(),
            matched_slot: None,
            admitted,
        }
    }

    #[test]
    fn test_log_and_recent() {
        let log = AdmissionLog::new(8);
        log.log(event("1.2.3.4", true));
        log.log(event("5.6.7.8", false));

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].address, "5.6.7.8");
        assert!(!recent[0].admitted);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let log = AdmissionLog::new(2);
        log.log(event("1.1.1.1", true));
        log.log(event("2.2.2.2", true));
        log.log(event("3.3.3.3", true));

        assert_eq!(log.len(), 2);
        let recent = log.recent(2);
        assert_eq!(recent[0].address, "3.3.3.3");
        assert_eq!(recent[1].address, "2.2.2.2");
    }
}
