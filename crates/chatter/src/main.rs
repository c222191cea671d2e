//! Chatter CLI - send messages and image attachments to a Chatter backend.
//!
//! Images are validated, downscaled to fit 1200x1200 and re-encoded as JPEG
//! before they leave the machine, exactly as the web composer does.
//!
//! # Usage
//!
//! ```bash
//! # Send a text message
//! chatter send --to 65f0c0ffee --text "hi"
//!
//! # Send a photo with a caption
//! chatter send --to 65f0c0ffee --text "look" --image ~/Pictures/beach.jpg
//!
//! # See what the attachment pipeline would produce
//! chatter preview beach.jpg --output beach-preview.jpg
//!
//! # List contacts, online ones first
//! chatter contacts --me 65f0c0ffee --online 65f1,65f2
//!
//! # View configuration
//! chatter config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Chatter - command-line client for the Chatter messaging backend.
#[derive(Parser, Debug)]
#[command(name = "chatter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "CHATTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose and send a message, optionally with an image
    Send(cli::send::SendArgs),

    /// Run the attachment pipeline on an image without sending it
    Preview(cli::preview::PreviewArgs),

    /// List contacts
    Contacts(cli::contacts::ContactsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let loaded = match &cli.config {
        Some(path) => chatter_core::Config::load_from(path),
        None => chatter_core::Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `chatter config path`."
            );
            chatter_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Chatter v{}", chatter_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Send(args) => cli::send::execute(args, &config).await,
        Commands::Preview(args) => cli::preview::execute(args, &config).await,
        Commands::Contacts(args) => cli::contacts::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args, cli.config.as_deref()).await,
    }
}
