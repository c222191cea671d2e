//! The message composer: stages an image attachment next to draft text and
//! hands both to the send collaborator on submit.

use std::time::Instant;

use tokio::sync::watch;

use crate::api::MessageSender;
use crate::config::Config;
use crate::error::ComposeError;
use crate::notify::Notifier;
use crate::pipeline::{Acquirer, SelectedFile, Transcoder};
use crate::types::{DeliveredMessage, OutgoingMessage};

use super::state::{Activity, CompositionState};

/// Result of a submission that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The collaborator accepted the message; the draft was cleared
    Sent(DeliveredMessage),
    /// Nothing to send, or another operation is in flight
    NoOp,
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// Owns one composition and drives it through its lifecycle.
///
/// The state lives in a `watch` cell: it gives the composer interior
/// mutability behind `&self` and lets any number of observers follow every
/// transition. Each composer owns its cell exclusively.
pub struct Composer {
    state: watch::Sender<CompositionState>,
    acquirer: Acquirer,
    transcoder: Transcoder,
    sender: Box<dyn MessageSender>,
    notifier: Box<dyn Notifier>,
}

impl Composer {
    /// Create a composer with an empty draft.
    pub fn new(config: &Config, sender: Box<dyn MessageSender>, notifier: Box<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(CompositionState::default());
        Self {
            state,
            acquirer: Acquirer::new(config.attachment.clone()),
            transcoder: Transcoder::new(config.transcode.clone()),
            sender,
            notifier,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CompositionState {
        self.state.borrow().clone()
    }

    /// Follow state transitions.
    ///
    /// The receiver always holds the latest state. Rapid transitions are
    /// coalesced, so intermediate states (such as `Transcoding`) may be skipped.
    pub fn subscribe(&self) -> watch::Receiver<CompositionState> {
        self.state.subscribe()
    }

    /// Replace the draft text. Ignored (returns `false`) while busy.
    pub fn set_text(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        let mut accepted = false;
        self.state.send_if_modified(|s| {
            if s.is_busy() {
                return false;
            }
            accepted = true;
            if s.text() == text {
                return false;
            }
            s.set_text(text);
            true
        });
        accepted
    }

    /// Validate, read and transcode a file, then stage the result.
    ///
    /// On any failure the user is notified once, `busy` is cleared and the
    /// previously staged preview (or its absence) is kept.
    pub async fn select_file(&self, file: SelectedFile) -> Result<(), ComposeError> {
        if self.state.borrow().is_busy() {
            tracing::debug!("Ignoring selection of {:?} while busy", file.name());
            return Err(ComposeError::Busy);
        }

        self.acquirer.check(&file).map_err(|e| self.fail(e))?;

        let guard = self.begin(Activity::Acquiring).ok_or(ComposeError::Busy)?;
        let start = Instant::now();
        tracing::debug!("Acquiring {:?} ({} bytes, {})", file.name(), file.size(), file.media_type());

        let raw = self.acquirer.read(file).await.map_err(|e| self.fail(e))?;
        self.state
            .send_modify(|s| s.set_activity(Some(Activity::Transcoding)));

        let preview = self
            .transcoder
            .transcode(raw)
            .await
            .map_err(|e| self.fail(e))?;

        tracing::info!(
            "Staged {}x{} preview ({} bytes) in {:?}",
            preview.width(),
            preview.height(),
            preview.bytes().len(),
            start.elapsed()
        );
        self.state.send_modify(|s| {
            s.set_attachment(Some(preview));
            s.set_activity(None);
        });
        guard.disarm();
        Ok(())
    }

    /// Drop the staged preview. Ignored while busy; returns whether a preview
    /// was removed.
    pub fn remove_attachment(&self) -> bool {
        self.state.send_if_modified(|s| {
            if s.is_busy() {
                tracing::debug!("Ignoring attachment removal while busy");
                return false;
            }
            if s.attachment().is_none() {
                return false;
            }
            s.set_attachment(None);
            true
        })
    }

    /// Send the draft.
    ///
    /// A no-op when busy or when there is neither text nor an attachment. On
    /// success the draft is cleared; on failure it is left exactly as it was so
    /// the user can resubmit.
    pub async fn submit(&self) -> Result<SubmitOutcome, ComposeError> {
        let message = {
            let state = self.state.borrow();
            if !state.can_submit() {
                return Ok(SubmitOutcome::NoOp);
            }
            OutgoingMessage {
                text: state.text().trim().to_string(),
                image: state.attachment().cloned(),
            }
        };

        let Some(guard) = self.begin(Activity::Sending) else {
            return Ok(SubmitOutcome::NoOp);
        };
        let start = Instant::now();

        let delivered = self
            .sender
            .send(&message)
            .await
            .map_err(|e| self.fail(e))?;

        tracing::debug!(
            "Message delivered via {} in {:?} (image: {})",
            self.sender.name(),
            start.elapsed(),
            message.image.is_some()
        );
        self.state.send_modify(|s| {
            s.set_text(String::new());
            s.set_attachment(None);
            s.set_activity(None);
        });
        guard.disarm();
        Ok(SubmitOutcome::Sent(delivered))
    }

    /// Mark the composer busy, unless it already is.
    fn begin(&self, activity: Activity) -> Option<BusyGuard<'_>> {
        let started = self.state.send_if_modified(|s| {
            if s.is_busy() {
                return false;
            }
            s.set_activity(Some(activity));
            true
        });
        started.then(|| BusyGuard {
            state: &self.state,
            armed: true,
        })
    }

    /// Log and notify a failure, then hand it back for propagation.
    fn fail(&self, error: impl Into<ComposeError>) -> ComposeError {
        let error = error.into();
        if let Some(kind) = error.kind() {
            tracing::warn!("{error}");
            self.notifier.notify(kind.message());
        }
        error
    }
}

/// Clears `busy` when dropped unless disarmed. Covers early returns and
/// callers that drop an in-flight future.
struct BusyGuard<'a> {
    state: &'a watch::Sender<CompositionState>,
    armed: bool,
}

impl BusyGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_modify(|s| s.set_activity(None));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Phase;
    use crate::error::ApiError;
    use crate::notify::ChannelNotifier;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSender {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MessageSender for CountingSender {
        fn name(&self) -> &str {
            "counting"
        }

        async fn send(&self, _message: &OutgoingMessage) -> Result<DeliveredMessage, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(DeliveredMessage::default())
        }
    }

    fn composer() -> (Composer, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let sender = CountingSender {
            calls: Arc::clone(&calls),
        };
        let (notifier, _rx) = ChannelNotifier::new();
        let composer = Composer::new(&Config::default(), Box::new(sender), Box::new(notifier));
        (composer, calls)
    }

    #[test]
    fn test_busy_guard_clears_on_drop() {
        let (composer, _) = composer();
        let guard = composer.begin(Activity::Acquiring).unwrap();
        assert!(composer.state().is_busy());
        assert!(composer.begin(Activity::Sending).is_none());

        drop(guard);
        assert!(!composer.state().is_busy());
    }

    #[test]
    fn test_disarmed_guard_leaves_state() {
        let (composer, _) = composer();
        let guard = composer.begin(Activity::Sending).unwrap();
        guard.disarm();
        assert_eq!(composer.state().activity(), Some(Activity::Sending));
    }

    #[test]
    fn test_set_text_ignored_while_busy() {
        let (composer, _) = composer();
        assert!(composer.set_text("draft"));

        let _guard = composer.begin(Activity::Transcoding).unwrap();
        assert!(!composer.set_text("changed"));
        assert_eq!(composer.state().text(), "draft");
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_noop() {
        let (composer, calls) = composer();
        composer.set_text("hello");
        let _guard = composer.begin(Activity::Acquiring).unwrap();

        let outcome = composer.submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::NoOp);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_select_while_busy_is_rejected() {
        let (composer, _) = composer();
        let _guard = composer.begin(Activity::Sending).unwrap();

        let file = SelectedFile::from_bytes("a.png", "image/png", vec![1, 2, 3]);
        let err = composer.select_file(file).await.unwrap_err();
        assert!(matches!(err, ComposeError::Busy));
        assert_eq!(composer.state().phase(), Phase::Sending);
    }

    #[tokio::test]
    async fn test_submit_text_only_clears_draft() {
        let (composer, calls) = composer();
        composer.set_text("  hello  ");

        let outcome = composer.submit().await.unwrap();
        assert!(outcome.is_sent());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(composer.state(), CompositionState::default());
    }

    #[tokio::test]
    async fn test_dropped_selection_future_clears_busy() {
        let (composer, _) = composer();
        // A reader that never completes keeps the selection in flight
        struct Stalled;
        impl tokio::io::AsyncRead for Stalled {
            fn poll_read(
                self: std::pin::Pin<&mut Self>,
                _cx: &mut std::task::Context<'_>,
                _buf: &mut tokio::io::ReadBuf<'_>,
            ) -> std::task::Poll<std::io::Result<()>> {
                std::task::Poll::Pending
            }
        }

        let file = SelectedFile::new("slow.png", 10, "image/png", Stalled);
        let selection = composer.select_file(file);
        let timed_out = tokio::time::timeout(std::time::Duration::from_millis(20), selection).await;

        assert!(timed_out.is_err());
        assert!(!composer.state().is_busy());
        assert_eq!(composer.state().phase(), Phase::Idle);
    }
}
