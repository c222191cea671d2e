//! Chatter Core - the message composer behind the Chatter client.
//!
//! The interesting part is the image attachment pipeline: a user-selected
//! file is validated, read, decoded, fitted into a bounding box and
//! re-encoded as JPEG before it is staged next to the draft text.
//!
//! # Architecture
//!
//! ```text
//! SelectedFile → Validate → Read → Decode → Resize → JPEG → Staged preview
//!                                                              │
//!                                       submit → MessageSender ┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use chatter_core::{ApiClient, Composer, Config, SelectedFile, TracingNotifier};
//!
//! #[tokio::main]
//! async fn main() -> chatter_core::Result<()> {
//!     let config = Config::load()?;
//!     let api = ApiClient::new(&config.api)?;
//!     let composer = Composer::new(
//!         &config,
//!         Box::new(api.conversation("65f0c0ffee")),
//!         Box::new(TracingNotifier),
//!     );
//!
//!     composer.set_text("look at this");
//!     composer.select_file(SelectedFile::open("cat.jpg".as_ref()).await?).await?;
//!     composer.submit().await?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod compose;
pub mod config;
pub mod contacts;
pub mod error;
pub mod notify;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use api::{ApiClient, Conversation, MessageSender};
pub use compose::{Composer, CompositionState, Phase, SubmitOutcome};
pub use config::Config;
pub use contacts::ContactView;
pub use error::{
    ApiError, AttachmentError, AttachmentResult, ChatterError, ComposeError, ConfigError,
    FailureKind, Result,
};
pub use notify::{ChannelNotifier, Notifier, TracingNotifier};
pub use pipeline::{Acquirer, RawImage, SelectedFile, Transcoder};
pub use types::{Contact, DeliveredMessage, EncodedPreview, OutgoingMessage, PreviewFormat};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
