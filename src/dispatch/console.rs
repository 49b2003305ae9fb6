//! Terminal sink

use std::io::Write;

use crate::alerts::{BudgetNotification, NotificationKind};
use crate::error::{TrackerError, TrackerResult};

use super::NotificationSink;

/// Prints notifications to stdout as they fire
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

/// One-line rendering used by the console sink
pub fn render_line(notification: &BudgetNotification) -> String {
    let icon = match notification.kind {
        NotificationKind::Warning => "!",
        NotificationKind::Alert => "x",
    };
    format!("[{}] {}: {}", icon, notification.title, notification.message)
}

impl NotificationSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn deliver(&self, notification: &BudgetNotification) -> TrackerResult<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", render_line(notification))
            .map_err(|e| TrackerError::Dispatch(format!("Failed to write to terminal: {}", e)))
    }
}
