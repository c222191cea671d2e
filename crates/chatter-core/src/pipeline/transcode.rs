//! Preview transcoding: decode, fit to the bounding box, re-encode as JPEG.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::config::TranscodeConfig;
use crate::error::{AttachmentError, AttachmentResult};
use crate::types::{EncodedPreview, PreviewFormat};

use super::decode::{format_to_string, join_blocking, DecodedImage, ImageDecoder};
use super::resize::target_dimensions;
use super::source::RawImage;

/// Turns raw file bytes into a size-bounded JPEG preview.
pub struct Transcoder {
    decoder: ImageDecoder,
    config: TranscodeConfig,
}

impl Transcoder {
    /// Create a new transcoder with the given configuration.
    pub fn new(config: TranscodeConfig) -> Self {
        Self {
            decoder: ImageDecoder::new(&config),
            config,
        }
    }

    /// Run the full transcode. The decoded bitmap is dropped before this
    /// returns; only the encoded preview survives.
    pub async fn transcode(&self, raw: RawImage) -> AttachmentResult<EncodedPreview> {
        let start = std::time::Instant::now();
        let source_size = raw.bytes.len();

        let decoded = self.decoder.decode(raw).await?;
        let decode_time = start.elapsed();
        tracing::trace!(
            "  Decode: {:?} ({} {}x{})",
            decode_time,
            format_to_string(decoded.format),
            decoded.width,
            decoded.height
        );

        let render_start = std::time::Instant::now();
        let preview = self.render(decoded).await?;
        tracing::trace!("  Render: {:?}", render_start.elapsed());

        tracing::debug!(
            "Transcoded {} bytes to {}x{} JPEG ({} bytes) in {:?}",
            source_size,
            preview.width(),
            preview.height(),
            preview.bytes().len(),
            start.elapsed()
        );

        Ok(preview)
    }

    /// Resample and encode off the async executor.
    async fn render(&self, decoded: DecodedImage) -> AttachmentResult<EncodedPreview> {
        let config = self.config.clone();
        let task = tokio::task::spawn_blocking(move || Self::render_sync(decoded.image, &config));

        match join_blocking(task, self.config.timeout_ms, "encode").await? {
            Ok(result) => result,
            Err(e) => Err(AttachmentError::Encode {
                message: format!("Task join error: {}", e),
            }),
        }
    }

    /// Synchronous resample + JPEG encode (runs in spawn_blocking).
    pub fn render_sync(
        image: DynamicImage,
        config: &TranscodeConfig,
    ) -> AttachmentResult<EncodedPreview> {
        let (width, height) = target_dimensions(image.width(), image.height(), config.max_dimension);

        let resized = if (width, height) == (image.width(), image.height()) {
            image
        } else {
            image.resize_exact(width, height, config.filter.filter_type())
        };

        // JPEG has no alpha channel; transparent pixels lose their alpha.
        let rgb = resized.to_rgb8();
        drop(resized);

        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, config.jpeg_quality())
            .encode_image(&rgb)
            .map_err(|e| AttachmentError::Encode {
                message: e.to_string(),
            })?;

        Ok(EncodedPreview::new(
            PreviewFormat::Jpeg,
            rgb.width(),
            rgb.height(),
            buffer,
        ))
    }
}
