//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Limits applied while acquiring a user-selected file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Maximum declared (and read) file size in bytes, before compression
    pub max_file_size_bytes: u64,

    /// Timeout for reading the file contents in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            read_timeout_ms: 10_000,
        }
    }
}

/// Resampling filter used when downscaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    #[default]
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl ResampleFilter {
    /// The matching `image` crate filter.
    pub fn filter_type(self) -> image::imageops::FilterType {
        use image::imageops::FilterType;
        match self {
            Self::Bilinear => FilterType::Triangle,
            Self::Bicubic => FilterType::CatmullRom,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Transcoding settings for staged previews.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// Bounding box edge for the re-encoded image (both axes)
    pub max_dimension: u32,

    /// Lossy quality factor, 0.0 (exclusive) to 1.0
    pub quality: f32,

    /// Resampling filter
    pub filter: ResampleFilter,

    /// Upper bound on memory the decoder may allocate for one image
    pub max_decode_alloc_bytes: u64,

    /// Optional deadline for each of the decode and render stages in
    /// milliseconds. Unset by default; expiry does not stop the blocking task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1200,
            quality: 0.8,
            filter: ResampleFilter::Bilinear,
            max_decode_alloc_bytes: 512 * 1024 * 1024,
            timeout_ms: None,
        }
    }
}

impl TranscodeConfig {
    /// Quality on the JPEG encoder's 1-100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Messaging backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL, without the `/api` suffix
    pub base_url: String,

    /// Session token sent as the `jwt` cookie (`${ENV_VAR}` is resolved)
    pub auth_token: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            auth_token: "${CHATTER_TOKEN}".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
