//! The `chatter preview` command: run the attachment pipeline locally.

use chatter_core::{Acquirer, Config, Transcoder};
use clap::Args;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Arguments for the `preview` command.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Image to transcode
    pub input: PathBuf,

    /// Where to write the JPEG (defaults to `<name>-preview.jpg` next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the media type guessed from the extension
    #[arg(long)]
    pub media_type: Option<String>,
}

/// Execute the preview command.
pub async fn execute(args: PreviewArgs, config: &Config) -> anyhow::Result<()> {
    let input = super::expand_path(&args.input);
    let output = match &args.output {
        Some(path) => super::expand_path(path),
        None => default_output(&input),
    };

    let file = super::open_selected(&input, args.media_type.as_deref()).await?;
    let source_bytes = file.size();

    let raw = Acquirer::new(config.attachment.clone()).acquire(file).await?;
    let preview = Transcoder::new(config.transcode.clone())
        .transcode(raw)
        .await?;

    tokio::fs::write(&output, preview.bytes()).await?;
    tracing::info!("Preview written to {}", output.display());

    let summary = json!({
        "source": input,
        "source_bytes": source_bytes,
        "output": output,
        "media_type": preview.media_type(),
        "width": preview.width(),
        "height": preview.height(),
        "bytes": preview.bytes().len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    input.with_file_name(format!("{stem}-preview.jpg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_next_to_input() {
        assert_eq!(
            default_output(Path::new("/photos/beach.png")),
            PathBuf::from("/photos/beach-preview.jpg")
        );
        assert_eq!(
            default_output(Path::new("shot.jpeg")),
            PathBuf::from("shot-preview.jpg")
        );
    }
}
