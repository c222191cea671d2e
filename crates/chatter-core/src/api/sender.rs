//! The message-send collaborator interface.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{DeliveredMessage, OutgoingMessage};

/// Delivers a composed message somewhere.
///
/// Uses `async_trait` because the composer holds a `Box<dyn MessageSender>`.
/// Implementations must not retry on their own; the composer surfaces the
/// failure and the user decides whether to resubmit.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sender name for logging.
    fn name(&self) -> &str;

    /// Send one message.
    async fn send(&self, message: &OutgoingMessage) -> Result<DeliveredMessage, ApiError>;
}
