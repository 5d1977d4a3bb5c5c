//! User-visible notifications raised by transport hooks.

use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    /// Destructive "Error" toast with `description` as its text.
    pub fn error(description: impl Into<String>) -> Self {
        Self { title: "Error".to_owned(), description: description.into(), variant: NotificationVariant::Destructive }
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Notifier that keeps everything it was given; used by tests and the
/// server render pass.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).push(notification);
    }
}
