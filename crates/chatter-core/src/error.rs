//! Error types for the Chatter composer core.
//!
//! Errors are organized by concern: attachment processing, the messaging
//! backend, the composer itself and configuration. Every attachment or send
//! failure also maps onto a [`FailureKind`], which owns the user-facing
//! notification text.

use thiserror::Error;

/// Top-level error type for Chatter operations.
#[derive(Error, Debug)]
pub enum ChatterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Attachment acquisition or transcoding errors
    #[error("Attachment error: {0}")]
    Attachment(#[from] AttachmentError),

    /// Messaging backend errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Composer errors
    #[error("Composer error: {0}")]
    Compose(#[from] ComposeError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Attachment errors, organized by pipeline stage.
#[derive(Error, Debug)]
pub enum AttachmentError {
    /// Declared media type is not an image
    #[error("Not an image: {name} has media type '{media_type}'")]
    InvalidMediaType { name: String, media_type: String },

    /// File exceeds the size limit
    #[error("File too large: {name} ({size} bytes > {max} bytes)")]
    FileTooLarge { name: String, size: u64, max: u64 },

    /// Reading the file contents failed
    #[error("Read error for {name}: {message}")]
    Read { name: String, message: String },

    /// Image bytes could not be decoded
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Resampling or re-encoding failed
    #[error("Encode error: {message}")]
    Encode { message: String },

    /// A stage ran past its deadline
    #[error("Timeout in {stage} stage after {timeout_ms}ms")]
    Timeout { stage: &'static str, timeout_ms: u64 },
}

impl AttachmentError {
    /// Classify the error into the user-facing failure kind.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidMediaType { .. } => FailureKind::InvalidMediaType,
            Self::FileTooLarge { .. } => FailureKind::FileTooLarge,
            Self::Read { .. } => FailureKind::ReadFailure,
            Self::Timeout { stage: "read", .. } => FailureKind::ReadFailure,
            Self::Decode { .. }
            | Self::Encode { .. }
            | Self::Timeout { .. } => FailureKind::DecodeFailure,
        }
    }
}

/// Messaging backend errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never reached the backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request did not complete in time
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The backend answered with a body we could not understand
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The client could not be constructed
    #[error("Client configuration error: {0}")]
    Client(String),
}

/// Errors surfaced by the composer's user actions.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Another acquisition, transcode or send is still in flight
    #[error("Composer is busy")]
    Busy,

    /// The attachment could not be staged
    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    /// The message-send collaborator reported a failure
    #[error("Send failed: {0}")]
    Send(#[from] ApiError),
}

impl ComposeError {
    /// The failure kind reported to the user, if this error was notified.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Busy => None,
            Self::Attachment(e) => Some(e.kind()),
            Self::Send(_) => Some(FailureKind::SendFailure),
        }
    }
}

/// The five user-visible failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidMediaType,
    FileTooLarge,
    ReadFailure,
    DecodeFailure,
    SendFailure,
}

impl FailureKind {
    /// Human-readable notification text for this kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidMediaType => "Please select an image file",
            Self::FileTooLarge => "Image size should be less than 10MB",
            Self::ReadFailure => "Failed to read image file",
            Self::DecodeFailure => "Failed to process image",
            Self::SendFailure => "Failed to send message",
        }
    }
}

/// Convenience type alias for Chatter results.
pub type Result<T> = std::result::Result<T, ChatterError>;

/// Convenience type alias for attachment-stage results.
pub type AttachmentResult<T> = std::result::Result<T, AttachmentError>;
