//! Image attachment pipeline.
//!
//! This module contains the stages that turn a user-selected file into a
//! staged preview:
//! - **source**: File handles and raw bytes
//! - **validate**: Media type and size checks before reading
//! - **acquire**: Bounded, timed reads of validated files
//! - **decode**: Content-sniffed decoding off the async executor
//! - **resize**: Bounding-box sizing
//! - **transcode**: Decode, resample and JPEG re-encode

pub mod acquire;
pub mod decode;
pub mod resize;
pub mod source;
pub mod transcode;
pub mod validate;

// Re-exports for convenient access
pub use acquire::Acquirer;
pub use decode::{DecodedImage, ImageDecoder};
pub use resize::target_dimensions;
pub use source::{media_type_for_path, RawImage, SelectedFile};
pub use transcode::Transcoder;
pub use validate::Validator;
