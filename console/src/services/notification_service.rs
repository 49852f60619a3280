//! Service for publishing user-visible notices.
//!
//! Controllers report the outcome of user actions here; whatever presents
//! toasts subscribes to the broadcast channel.

use tokio::sync::broadcast;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Fan-out point for notices.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    sender: broadcast::Sender<Notice>,
}

impl NotificationCenter {
    const CAPACITY: usize = 64;

    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.publish(Notice {
            level: NoticeLevel::Success,
            message,
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.publish(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    fn publish(&self, notice: Notice) {
        if self.sender.send(notice).is_err() {
            debug!("No notification subscribers");
        }
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
