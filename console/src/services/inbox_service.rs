//! Service for the contact inbox.
//!
//! Messages left through the public contact form are held client-side;
//! opening one marks it read.

use crate::errors::{ApiError, ApiResult};
use crate::models::contact::{ContactMessage, MessageStatus};
use crate::services::notification_service::NotificationCenter;
use tokio::sync::RwLock;

/// Contact-form messages held client-side.
pub struct Inbox {
    messages: RwLock<Vec<ContactMessage>>,
    notifications: NotificationCenter,
}

impl Inbox {
    pub fn new(messages: Vec<ContactMessage>, notifications: NotificationCenter) -> Self {
        Self {
            messages: RwLock::new(messages),
            notifications,
        }
    }

    pub async fn search(&self, text: &str) -> Vec<ContactMessage> {
        let text = text.trim();
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| text.is_empty() || m.matches(text))
            .cloned()
            .collect()
    }

    /// Opens a message, marking it read.
    pub async fn view(&self, id: &str) -> ApiResult<ContactMessage> {
        let mut messages = self.messages.write().await;
        let message = find(&mut messages, id)?;
        message.status = MessageStatus::Read;
        Ok(message.clone())
    }

    pub async fn toggle_read(&self, id: &str) -> ApiResult<MessageStatus> {
        let status = {
            let mut messages = self.messages.write().await;
            let message = find(&mut messages, id)?;
            message.status = match message.status {
                MessageStatus::Read => MessageStatus::Unread,
                MessageStatus::Unread => MessageStatus::Read,
            };
            message.status
        };
        self.notifications
            .success(format!("Message marked as {}", status));
        Ok(status)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let removed = {
            let mut messages = self.messages.write().await;
            let before = messages.len();
            messages.retain(|m| m.id != id);
            messages.len() < before
        };
        if !removed {
            return Err(ApiError::not_found("Message", id));
        }
        self.notifications.success("Message deleted successfully!");
        Ok(())
    }

    pub async fn unread_count(&self) -> usize {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.is_unread())
            .count()
    }
}

fn find<'a>(messages: &'a mut [ContactMessage], id: &str) -> ApiResult<&'a mut ContactMessage> {
    messages
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| ApiError::not_found("Message", id))
}
