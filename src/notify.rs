//! Transient notifications
//!
//! There is at most one notification at a time. Showing a new one replaces
//! the old one and cancels its removal timer; each notification removes
//! itself once its lifetime is over.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::format::escape_html;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    fn alert_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "alert-success",
            NotificationKind::Error => "alert-danger",
            NotificationKind::Info => "alert-info",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Slot {
    next_id: u64,
    current: Option<Notification>,
    timer: Option<JoinHandle<()>>,
}

/// Single-slot notification display with automatic removal
///
/// Must be used from within a tokio runtime: removal runs on a spawned task.
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Notifier {
            ttl,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Shows `message`, replacing whatever was visible
    ///
    /// Returns the id of the new notification.
    pub fn show(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let message = message.into();
        match kind {
            NotificationKind::Error => tracing::warn!("notify: {}", message),
            _ => tracing::info!("notify: {}", message),
        }

        let mut slot = self.lock();
        slot.next_id += 1;
        let id = slot.next_id;

        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        slot.current = Some(Notification {
            id,
            kind,
            message,
            shown_at: Utc::now(),
        });

        let shared = Arc::clone(&self.slot);
        let ttl = self.ttl;
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut slot = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.current.as_ref().map(|current| current.id) == Some(id) {
                slot.current = None;
                slot.timer = None;
            }
        }));

        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(NotificationKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(NotificationKind::Info, message)
    }

    /// The visible notification, if any
    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    /// Removes the visible notification right away
    pub fn dismiss(&self) {
        let mut slot = self.lock();
        slot.current = None;
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
    }

    /// Markup of the visible notification, empty when there is none
    pub fn render(&self) -> String {
        match self.current() {
            Some(notification) => format!(
                r#"<div class="alert {} alert-message position-fixed" role="alert" data-id="{}">{}</div>"#,
                notification.kind.alert_class(),
                notification.id,
                escape_html(&notification.message)
            ),
            None => String::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
