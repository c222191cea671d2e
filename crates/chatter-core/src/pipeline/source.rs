//! File handles supplied by a file picker, and the raw bytes read from them.

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::pin::Pin;

use tokio::io::AsyncRead;

/// A user-selected file: declared size and media type plus a byte stream.
///
/// Nothing here is trusted. The declared size and type are what the picker
/// reported; the stream may disagree with both.
pub struct SelectedFile {
    name: String,
    size: u64,
    media_type: String,
    contents: Pin<Box<dyn AsyncRead + Send>>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        media_type: impl Into<String>,
        contents: impl AsyncRead + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
            contents: Box::pin(contents),
        }
    }

    /// Build a file handle over an in-memory buffer.
    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self::new(name, size, media_type, Cursor::new(bytes))
    }

    /// Open a file from disk the way a browser file picker would: size from
    /// the filesystem, media type from the extension.
    pub async fn open(path: &Path) -> std::io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Ok(Self::new(name, size, media_type_for_path(path), file))
    }

    /// Replace the declared media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Declared MIME type
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub(crate) fn into_parts(self) -> (String, String, Pin<Box<dyn AsyncRead + Send>>) {
        (self.name, self.media_type, self.contents)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("media_type", &self.media_type)
            .finish_non_exhaustive()
    }
}

/// File contents after a successful read.
#[derive(Debug, Clone)]
pub struct RawImage {
    /// Name of the file the bytes came from
    pub name: String,
    /// Declared MIME type
    pub media_type: String,
    /// Encoded image bytes, exactly as read
    pub bytes: Vec<u8>,
}

/// Guess a MIME type from a file extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "avif" => "image/avif",
        "heic" | "heif" => "image/heic",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("a/photo.JPG")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("shot.webp")), "image/webp");
        assert_eq!(media_type_for_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(
            media_type_for_path(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_from_bytes_declares_length() {
        let file = SelectedFile::from_bytes("a.png", "image/png", vec![0; 42]);
        assert_eq!(file.size(), 42);
        assert_eq!(file.media_type(), "image/png");
    }

    #[tokio::test]
    async fn test_open_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let file = SelectedFile::open(&path).await.unwrap();
        assert_eq!(file.name(), "cat.png");
        assert_eq!(file.size(), 4);
        assert_eq!(file.media_type(), "image/png");
    }
}
