//! Notification surfaces
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::Local;
use log::{debug, info};
use tokio::sync::mpsc;

/// Fire-and-forget sink for user-visible messages
pub trait NotificationSurface: Send + Sync {
    fn show(&self, message: &str);
}

/// Prints notifications to stdout with a local clock prefix
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl NotificationSurface for ConsoleNotifier {
    fn show(&self, message: &str) {
        info!("Notification: {message}");
        println!("[{}] {}", Local::now().format("%H:%M:%S"), message);
    }
}

/// Forwards notifications into an mpsc channel (for UIs and tests)
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    /// Create a notifier along with the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn from_sender(sender: mpsc::UnboundedSender<String>) -> Self {
        Self { sender }
    }
}

impl NotificationSurface for ChannelNotifier {
    fn show(&self, message: &str) {
        if self.sender.send(message.to_string()).is_err() {
            debug!("Notification dropped, receiver closed: {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_forwards_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.show("first");
        notifier.show("second");

        assert_eq!(rx.try_recv().unwrap(), "first");
        assert_eq!(rx.try_recv().unwrap(), "second");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_notifier_ignores_closed_receiver() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.show("nobody listening");
    }
}
