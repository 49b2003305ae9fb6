//! Notification delivery
//!
//! Sinks receive notifications after the state transition that produced them
//! has been persisted. A failing sink is retried, then logged and skipped; it
//! never rolls back or blocks the transition.

mod console;
mod journal;

pub use console::ConsoleSink;
pub use journal::JournalSink;

use crate::alerts::BudgetNotification;
use crate::config::{Settings, TrackerPaths};
use crate::error::TrackerResult;

/// Attempts per sink per notification
const DELIVERY_ATTEMPTS: usize = 2;

/// A channel that can surface a notification to the user
pub trait NotificationSink: Send + Sync {
    fn name(&self) -> &'static str;

    fn deliver(&self, notification: &BudgetNotification) -> TrackerResult<()>;
}

/// Counts from one dispatch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Fans notifications out to every configured sink
#[derive(Default)]
pub struct Dispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the sinks enabled in settings
    pub fn from_settings(settings: &Settings, paths: &TrackerPaths) -> Self {
        let mut dispatcher = Self::new();
        if settings.notifications.console {
            dispatcher.add_sink(ConsoleSink::new());
        }
        if settings.notifications.journal {
            dispatcher.add_sink(JournalSink::new(paths.alerts_log()));
        }
        dispatcher
    }

    pub fn add_sink(&mut self, sink: impl NotificationSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.add_sink(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Deliver every notification to every sink
    pub fn dispatch(&self, notifications: &[BudgetNotification]) -> DispatchReport {
        let mut report = DispatchReport::default();

        for notification in notifications {
            for sink in &self.sinks {
                if deliver_with_retry(sink.as_ref(), notification) {
                    report.delivered += 1;
                } else {
                    report.failed += 1;
                }
            }
        }

        report
    }
}

fn deliver_with_retry(sink: &dyn NotificationSink, notification: &BudgetNotification) -> bool {
    for attempt in 1..=DELIVERY_ATTEMPTS {
        match sink.deliver(notification) {
            Ok(()) => return true,
            Err(e) => {
                tracing::warn!(
                    sink = sink.name(),
                    attempt,
                    scope = %notification.scope_id,
                    error = %e,
                    "Notification delivery failed"
                );
            }
        }
    }
    false
}
