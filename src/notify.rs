//! User-visible notifications, delivered over a channel.
//!
//! The shell is headless; whatever renders it (a toast area, a test)
//! subscribes to the notifier and drains notices at its own pace. Sends
//! never block and a notifier with no subscriber left simply drops the
//! notice.

use chrono::{DateTime, Utc};

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One user-visible notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub when: DateTime<Utc>,
}

/// Fan-out sender for notices.
///
/// Cloning is cheap; receivers obtained from [`subscribe`](Self::subscribe)
/// share one queue, so a single consumer sees every notice in send order.
#[derive(Clone)]
pub struct Notifier {
    tx: flume::Sender<Notice>,
    rx: flume::Receiver<Notice>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self { tx, rx }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&self, level: NoticeLevel, message: String) {
        tracing::debug!(?level, %message, "notice");
        let _ = self.tx.send(Notice {
            level,
            message,
            when: Utc::now(),
        });
    }

    /// A receiver over the shared notice queue.
    #[must_use]
    pub fn subscribe(&self) -> flume::Receiver<Notice> {
        self.rx.clone()
    }

    /// Drains every notice queued so far without blocking.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        self.rx.try_iter().collect()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
