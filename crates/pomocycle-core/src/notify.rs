//! Completion notifiers.
//!
//! The scheduler hands each completion message to a [`Notifier`]. Delivery is
//! best-effort: a returned error is logged by the caller and otherwise ignored.

use notify_rust::Notification;
use thiserror::Error;

/// Title used for desktop notifications.
pub const NOTIFICATION_TITLE: &str = "Pomodoro Timer";

#[derive(Error, Debug)]
pub enum NotifyError {
    /// The platform notification service rejected or could not show the message.
    #[error("notification could not be shown: {0}")]
    Unavailable(String),
}

pub trait Notifier {
    fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Emits messages as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        tracing::info!(target: "pomocycle::notify", "{message}");
        Ok(())
    }
}

/// Shows messages through the desktop notification service.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    title: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        Notification::new()
            .summary(&self.title)
            .body(message)
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Unavailable(e.to_string()))
    }
}

/// Drops every message. Used when notifications are not permitted.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl Notifier for Muted {
    fn notify(&self, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        (**self).notify(message)
    }
}
