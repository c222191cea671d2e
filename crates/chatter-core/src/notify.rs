//! User-visible failure notifications.
//!
//! The composer reports every failure exactly once through a [`Notifier`].
//! Notification is fire-and-forget: the composer never waits on or inspects
//! the sink.

use tokio::sync::mpsc;

/// A sink for human-readable failure messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Logs notifications at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Forwards notifications into an unbounded channel, e.g. a toast queue.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    /// Create a notifier together with the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str) {
        // A closed receiver just means nobody is listening anymore
        let _ = self.tx.send(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify("first");
        notifier.notify("second");

        assert_eq!(rx.try_recv().unwrap(), "first");
        assert_eq!(rx.try_recv().unwrap(), "second");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_notifier_survives_closed_receiver() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify("nobody hears this");
    }
}
