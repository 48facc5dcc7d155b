//! User-facing notifications
//!
//! Every failure the editor recovers from (rejected drags, malformed imports,
//! failed saves) ends up here as a dismissible, severity-tagged message. The
//! host UI drains the queue and renders it however it likes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Default number of notifications retained before the oldest is dropped.
pub const DEFAULT_MAX_PENDING: usize = 32;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single dismissible message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub level: MessageLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Queue of pending notifications
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    pending: VecDeque<Notification>,
    next_id: u64,
    max_pending: usize,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_PENDING)
    }

    /// Create a center that retains at most `max_pending` messages
    pub fn with_capacity(max_pending: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            next_id: 1,
            max_pending: max_pending.max(1),
        }
    }

    /// Queue a notification and return its id
    pub fn push(&mut self, level: MessageLevel, message: impl Into<String>) -> u64 {
        let message = message.into();
        match level {
            MessageLevel::Error => tracing::error!("{}", message),
            MessageLevel::Warning => tracing::warn!("{}", message),
            MessageLevel::Success | MessageLevel::Info => tracing::info!("{}", message),
        }

        let id = self.next_id;
        self.next_id += 1;
        if self.pending.len() == self.max_pending {
            self.pending.pop_front();
        }
        self.pending.push_back(Notification {
            id,
            level,
            message,
            created_at: Utc::now(),
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(MessageLevel::Success, message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(MessageLevel::Info, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(MessageLevel::Warning, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(MessageLevel::Error, message)
    }

    /// Remove a notification. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.pending.len();
        self.pending.retain(|n| n.id != id);
        self.pending.len() != before
    }

    /// Take every pending notification, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.pending.back()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
