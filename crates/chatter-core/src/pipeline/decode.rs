//! Image decoding with content-based format detection, an allocation limit
//! and optional timeout support.

use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, Limits};
use std::io::Cursor;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::config::TranscodeConfig;
use crate::error::{AttachmentError, AttachmentResult};

use super::source::RawImage;

/// Image decoder with a configurable allocation limit and deadline.
pub struct ImageDecoder {
    max_alloc_bytes: u64,
    timeout_ms: Option<u64>,
}

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded bitmap
    pub image: DynamicImage,
    /// Format detected from the content
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Create a new decoder from the transcode settings.
    pub fn new(config: &TranscodeConfig) -> Self {
        Self {
            max_alloc_bytes: config.max_decode_alloc_bytes,
            timeout_ms: config.timeout_ms,
        }
    }

    /// Decode raw file bytes off the async executor.
    ///
    /// Intrinsic dimensions are not limited; only the decoder's memory is.
    pub async fn decode(&self, raw: RawImage) -> AttachmentResult<DecodedImage> {
        let bytes = raw.bytes;
        let max_alloc_bytes = self.max_alloc_bytes;
        let task =
            tokio::task::spawn_blocking(move || Self::decode_bytes_sync(bytes, max_alloc_bytes));

        match join_blocking(task, self.timeout_ms, "decode").await? {
            Ok(decoded) => decoded,
            Err(e) => Err(AttachmentError::Decode {
                message: format!("Task join error: {}", e),
            }),
        }
    }

    /// Synchronous decode from bytes (runs in spawn_blocking).
    ///
    /// The declared media type is ignored; the content decides the format.
    fn decode_bytes_sync(bytes: Vec<u8>, max_alloc_bytes: u64) -> AttachmentResult<DecodedImage> {
        let mut reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| AttachmentError::Decode {
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = reader.format().ok_or_else(|| AttachmentError::Decode {
            message: "Unrecognized image format".to_string(),
        })?;

        let mut limits = Limits::default();
        limits.max_alloc = Some(max_alloc_bytes);
        reader.limits(limits);

        let image = reader.decode().map_err(|e| AttachmentError::Decode {
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}

/// Await a blocking task, bounded by `timeout_ms` when one is configured.
///
/// On expiry the task keeps running on the blocking pool; its result is
/// discarded.
pub(crate) async fn join_blocking<T>(
    task: JoinHandle<T>,
    timeout_ms: Option<u64>,
    stage: &'static str,
) -> AttachmentResult<Result<T, tokio::task::JoinError>> {
    match timeout_ms {
        Some(ms) => timeout(Duration::from_millis(ms), task)
            .await
            .map_err(|_| AttachmentError::Timeout {
                stage,
                timeout_ms: ms,
            }),
        None => Ok(task.await),
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::WebP => "webp",
        ImageFormat::Gif => "gif",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Ico => "ico",
        ImageFormat::Pnm => "pnm",
        ImageFormat::Avif => "avif",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    fn raw(bytes: Vec<u8>, media_type: &str) -> RawImage {
        RawImage {
            name: "test".to_string(),
            media_type: media_type.to_string(),
            bytes,
        }
    }

    #[test]
    fn test_format_to_string() {
        assert_eq!(format_to_string(ImageFormat::Jpeg), "jpeg");
        assert_eq!(format_to_string(ImageFormat::Png), "png");
        assert_eq!(format_to_string(ImageFormat::WebP), "webp");
    }

    #[tokio::test]
    async fn test_format_detected_by_content() {
        // PNG bytes declared as JPEG still decode as PNG
        let bytes = encode(&DynamicImage::new_rgb8(40, 30), ImageFormat::Png);
        let decoder = ImageDecoder::new(&TranscodeConfig::default());

        let decoded = decoder.decode(raw(bytes, "image/jpeg")).await.unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!((decoded.width, decoded.height), (40, 30));
    }

    #[tokio::test]
    async fn test_corrupt_bytes_fail_to_decode() {
        let decoder = ImageDecoder::new(&TranscodeConfig::default());
        let err = decoder
            .decode(raw(b"definitely not an image".to_vec(), "image/png"))
            .await
            .unwrap_err();
        assert!(matches!(err, AttachmentError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_truncated_png_fails_to_decode() {
        let mut bytes = encode(&DynamicImage::new_rgb8(64, 64), ImageFormat::Png);
        // Signature and IHDR survive, the image data does not
        bytes.truncate(40);
        let decoder = ImageDecoder::new(&TranscodeConfig::default());

        let err = decoder.decode(raw(bytes, "image/png")).await.unwrap_err();
        assert!(matches!(err, AttachmentError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_extreme_aspect_ratio_decodes() {
        let bytes = encode(&DynamicImage::new_rgb8(24_000, 2), ImageFormat::Png);
        let decoder = ImageDecoder::new(&TranscodeConfig::default());

        let decoded = decoder.decode(raw(bytes, "image/png")).await.unwrap();
        assert_eq!((decoded.width, decoded.height), (24_000, 2));
    }

    #[tokio::test]
    async fn test_allocation_limit_is_decode_error() {
        let config = TranscodeConfig {
            max_decode_alloc_bytes: 1024,
            ..TranscodeConfig::default()
        };
        // 60x20 RGB needs 3600 bytes
        let bytes = encode(&DynamicImage::new_rgb8(60, 20), ImageFormat::Png);
        let err = ImageDecoder::new(&config)
            .decode(raw(bytes, "image/png"))
            .await
            .unwrap_err();
        assert!(matches!(err, AttachmentError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_join_blocking_without_deadline_waits() {
        let task = tokio::task::spawn_blocking(|| {
            std::thread::sleep(Duration::from_millis(30));
            7
        });
        let joined = join_blocking(task, None, "decode").await.unwrap();
        assert_eq!(joined.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_join_blocking_with_deadline_expires() {
        let task = tokio::task::spawn_blocking(|| {
            std::thread::sleep(Duration::from_millis(200));
        });
        let err = join_blocking(task, Some(10), "encode").await.unwrap_err();
        assert!(matches!(
            err,
            AttachmentError::Timeout { stage: "encode", timeout_ms: 10 }
        ));
    }
}
