//! Toast/notification surface.
//!
//! The shell drains pending notifications and renders them however it
//! likes; every notification is also mirrored to the log so headless runs
//! keep the diagnostics.

use std::collections::VecDeque;
use std::sync::Arc;

use chameleon_domain::Result;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::bootstrap::App;
use crate::plugins::Plugin;

/// Oldest notifications are dropped past this bound.
const MAX_PENDING: usize = 32;

/// Severity of a notification, mirroring the shell's toast variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Primary,
    Success,
    Warning,
    Danger,
}

/// A single pending notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

/// In-memory notification queue.
#[derive(Default)]
pub struct Notifier {
    pending: Mutex<VecDeque<Notification>>,
}

impl Notifier {
    /// Queue a notification and mirror it to the log.
    pub fn notify(&self, level: NotifyLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NotifyLevel::Warning | NotifyLevel::Danger => warn!(%message, "notification"),
            NotifyLevel::Primary | NotifyLevel::Success => info!(%message, "notification"),
        }

        let mut pending = self.pending.lock();
        if pending.len() == MAX_PENDING {
            pending.pop_front();
        }
        pending.push_back(Notification { level, message });
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.pending.lock().drain(..).collect()
    }

    /// Number of notifications waiting to be rendered.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }
}

/// Registers the [`Notifier`] capability.
pub struct NotifyPlugin;

impl Plugin for NotifyPlugin {
    fn name(&self) -> &'static str {
        "notify"
    }

    fn register(&self, app: &mut App) -> Result<()> {
        app.install_notifier(Arc::new(Notifier::default()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queues_and_drains_in_order() {
        let notifier = Notifier::default();
        notifier.notify(NotifyLevel::Primary, "first");
        notifier.notify(NotifyLevel::Danger, "second");

        let drained = notifier.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].level, NotifyLevel::Danger);
        assert_eq!(notifier.pending(), 0);
    }

    #[test]
    fn drops_the_oldest_when_full() {
        let notifier = Notifier::default();
        for i in 0..(MAX_PENDING + 3) {
            notifier.notify(NotifyLevel::Primary, format!("msg-{i}"));
        }

        let drained = notifier.drain();
        assert_eq!(drained.len(), MAX_PENDING);
        assert_eq!(drained[0].message, "msg-3");
    }
}
