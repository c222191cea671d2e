//! Image acquisition: validate a selected file, then read its bytes.

use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::time::timeout;

use crate::config::AttachmentConfig;
use crate::error::{AttachmentError, AttachmentResult};

use super::source::{RawImage, SelectedFile};
use super::validate::Validator;

/// Reads validated files into memory with a size cap and a deadline.
pub struct Acquirer {
    validator: Validator,
    read_timeout_ms: u64,
}

impl Acquirer {
    pub fn new(config: AttachmentConfig) -> Self {
        let read_timeout_ms = config.read_timeout_ms;
        Self {
            validator: Validator::new(config),
            read_timeout_ms,
        }
    }

    /// Validate and read in one step.
    pub async fn acquire(&self, file: SelectedFile) -> AttachmentResult<RawImage> {
        self.check(&file)?;
        self.read(file).await
    }

    /// The synchronous pre-read checks (media type, declared size).
    pub fn check(&self, file: &SelectedFile) -> AttachmentResult<()> {
        self.validator.validate(file)
    }

    /// Read the full contents of an already-validated file.
    ///
    /// At most `max_file_size + 1` bytes are pulled from the stream, so a
    /// picker that under-reports the size cannot push an unbounded buffer
    /// through.
    pub async fn read(&self, file: SelectedFile) -> AttachmentResult<RawImage> {
        let start = std::time::Instant::now();
        let max = self.validator.max_file_size();
        let (name, media_type, contents) = file.into_parts();

        let mut bytes = Vec::new();
        let read = timeout(
            Duration::from_millis(self.read_timeout_ms),
            contents.take(max.saturating_add(1)).read_to_end(&mut bytes),
        )
        .await;

        match read {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(AttachmentError::Read {
                    name,
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(AttachmentError::Timeout {
                    stage: "read",
                    timeout_ms: self.read_timeout_ms,
                })
            }
        }

        if bytes.len() as u64 > max {
            return Err(AttachmentError::FileTooLarge {
                name,
                size: bytes.len() as u64,
                max,
            });
        }

        tracing::trace!("  Read {} bytes from {:?} in {:?}", bytes.len(), name, start.elapsed());

        Ok(RawImage {
            name,
            media_type,
            bytes,
        })
    }
}
