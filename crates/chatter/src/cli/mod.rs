//! Command implementations.

pub mod config;
pub mod contacts;
pub mod preview;
pub mod send;

use chatter_core::SelectedFile;
use std::path::{Path, PathBuf};

/// Resolve `~` in a user-supplied path.
pub(crate) fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

/// Open an image the way the web file picker would, optionally overriding the
/// media type guessed from the extension.
pub(crate) async fn open_selected(
    path: &Path,
    media_type: Option<&str>,
) -> anyhow::Result<SelectedFile> {
    let path = expand_path(path);
    let file = SelectedFile::open(&path)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot open {}: {e}", path.display()))?;
    Ok(match media_type {
        Some(media_type) => file.with_media_type(media_type),
        None => file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_leaves_relative_paths() {
        assert_eq!(expand_path(Path::new("cat.jpg")), PathBuf::from("cat.jpg"));
    }

    #[tokio::test]
    async fn test_open_selected_overrides_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.bin");
        std::fs::write(&path, [0u8; 8]).unwrap();

        let guessed = open_selected(&path, None).await.unwrap();
        assert_eq!(guessed.media_type(), "application/octet-stream");

        let forced = open_selected(&path, Some("image/png")).await.unwrap();
        assert_eq!(forced.media_type(), "image/png");
    }

    #[tokio::test]
    async fn test_open_selected_missing_file() {
        let err = open_selected(Path::new("/definitely/not/here.png"), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Cannot open"));
    }
}
