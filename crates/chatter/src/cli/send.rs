//! The `chatter send` command.

use chatter_core::{ApiClient, Composer, Config, SubmitOutcome, TracingNotifier};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the `send` command.
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Recipient user id
    #[arg(long)]
    pub to: String,

    /// Message text
    #[arg(short, long, default_value = "")]
    pub text: String,

    /// Image to attach (downscaled and re-encoded before sending)
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Override the media type guessed from the image extension
    #[arg(long, requires = "image")]
    pub media_type: Option<String>,
}

/// Execute the send command.
pub async fn execute(args: SendArgs, config: &Config) -> anyhow::Result<()> {
    let api = ApiClient::new(&config.api)?;
    let composer = Composer::new(
        config,
        Box::new(api.conversation(args.to.as_str())),
        Box::new(TracingNotifier),
    );

    composer.set_text(args.text);

    if let Some(path) = &args.image {
        let file = super::open_selected(path, args.media_type.as_deref()).await?;
        composer.select_file(file).await?;
    }

    match composer.submit().await? {
        SubmitOutcome::Sent(delivered) => {
            tracing::info!("Message sent to {}", args.to);
            println!("{}", serde_json::to_string_pretty(&delivered)?);
            Ok(())
        }
        SubmitOutcome::NoOp => anyhow::bail!("Nothing to send: provide --text or --image"),
    }
}
