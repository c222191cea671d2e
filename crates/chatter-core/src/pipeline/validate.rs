//! Input validation before any bytes are read.

use crate::config::AttachmentConfig;
use crate::error::{AttachmentError, AttachmentResult};

use super::source::SelectedFile;

/// Validates declared file properties before acquisition starts.
pub struct Validator {
    limits: AttachmentConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: AttachmentConfig) -> Self {
        Self { limits }
    }

    /// Perform the synchronous pre-read checks.
    ///
    /// Checks:
    /// - Declared media type is an `image/*` type
    /// - Declared size is within the limit
    pub fn validate(&self, file: &SelectedFile) -> AttachmentResult<()> {
        if !Self::is_image_media_type(file.media_type()) {
            return Err(AttachmentError::InvalidMediaType {
                name: file.name().to_string(),
                media_type: file.media_type().to_string(),
            });
        }

        if file.size() > self.limits.max_file_size_bytes {
            return Err(AttachmentError::FileTooLarge {
                name: file.name().to_string(),
                size: file.size(),
                max: self.limits.max_file_size_bytes,
            });
        }

        Ok(())
    }

    /// Maximum accepted size in bytes.
    pub fn max_file_size(&self) -> u64 {
        self.limits.max_file_size_bytes
    }

    /// MIME types compare case-insensitively.
    fn is_image_media_type(media_type: &str) -> bool {
        media_type
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
    }
}
