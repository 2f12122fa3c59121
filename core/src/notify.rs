//! Outward user notifications.
//!
//! The core decides *that* the user must be told something; showing a
//! dialog or a toast is the host's business. Nothing in the core depends on
//! the notifier succeeding.

use crate::config::{
    ALERT_TITLE, CREATE_FAILED_MESSAGE, CREATE_SUCCEEDED_MESSAGE, FETCH_FAILED_MESSAGE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Blocking alert, used for both fetch and create failures.
    Error { title: String, message: String },
    /// Transient toast, used only after a successful create.
    Success { message: String },
}

impl Notification {
    pub fn fetch_failed() -> Self {
        Notification::Error {
            title: ALERT_TITLE.to_string(),
            message: FETCH_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn create_failed() -> Self {
        Notification::Error {
            title: ALERT_TITLE.to_string(),
            message: CREATE_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn create_succeeded() -> Self {
        Notification::Success {
            message: CREATE_SUCCEEDED_MESSAGE.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error { .. })
    }
}

/// Sink for notifications, implemented by the presentation layer.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<F: Fn(Notification)> Notifier for F {
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}
