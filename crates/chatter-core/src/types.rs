//! Core data types shared by the composer, the pipeline and the backend client.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Encoded image format of a staged preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    Jpeg,
}

impl PreviewFormat {
    /// MIME type for this format.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// A size-bounded, re-encoded attachment ready for preview and transmission.
///
/// The bytes are immutable and reference-counted: the composer's preview and
/// the outbound message share one buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPreview {
    format: PreviewFormat,
    width: u32,
    height: u32,
    bytes: Arc<[u8]>,
}

impl EncodedPreview {
    pub fn new(format: PreviewFormat, width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            format,
            width,
            height,
            bytes: bytes.into(),
        }
    }

    pub fn format(&self) -> PreviewFormat {
        self.format
    }

    /// Output width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded image bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }

    /// Return a `data:` URL, the form the messaging backend accepts.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type(), BASE64.encode(&self.bytes))
    }
}

impl fmt::Debug for EncodedPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedPreview")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The payload handed to the message-send collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Message text, already trimmed (may be empty when an image is attached)
    pub text: String,

    /// Staged preview, if any
    pub image: Option<EncodedPreview>,
}

impl Serialize for OutgoingMessage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            text: &'a str,
            image: Option<String>,
        }

        Wire {
            text: &self.text,
            image: self.image.as_ref().map(EncodedPreview::data_url),
        }
        .serialize(serializer)
    }
}

/// A message as acknowledged by the backend.
///
/// Every field is optional so that a sparse acknowledgement still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveredMessage {
    /// Backend message id
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "senderId", default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,

    #[serde(rename = "receiverId", default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Hosted image URL assigned by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Creation timestamp (ISO 8601)
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A user the current account can message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "fullName")]
    pub full_name: String,

    #[serde(rename = "profilePic", default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}
