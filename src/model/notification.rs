//! Transient notifications with automatic dismissal

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// How long a notification stays up unless dismissed first
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Danger,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    pub created: Instant,
    pub timestamp: DateTime<Local>,
}

impl Notification {
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Notification container
#[derive(Debug)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, level: NotificationLevel) -> u64 {
        self.push_at(message, level, Instant::now())
    }

    pub fn push_at(&mut self, message: impl Into<String>, level: NotificationLevel, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        tracing::info!(id, %message, ?level, "notification shown");
        self.items.push(Notification {
            id,
            message,
            level,
            created: now,
            timestamp: Local::now(),
        });
        id
    }

    /// Remove a notification immediately
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        before != self.items.len()
    }

    pub fn dismiss_latest(&mut self) -> bool {
        self.items.pop().is_some()
    }

    /// Drop every notification older than the TTL; returns how many went
    pub fn expire(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.items.len();
        self.items
            .retain(|n| now.saturating_duration_since(n.created) < ttl);
        before - self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
