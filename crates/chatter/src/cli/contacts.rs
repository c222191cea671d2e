//! The `chatter contacts` command.

use chatter_core::{ApiClient, Config, ContactView};
use clap::Args;
use serde_json::json;

/// Arguments for the `contacts` command.
#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// Your own user id (excluded from the list)
    #[arg(long)]
    pub me: Option<String>,

    /// Ids currently online, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub online: Vec<String>,

    /// Only show online contacts
    #[arg(long)]
    pub online_only: bool,
}

/// Execute the contacts command.
pub async fn execute(args: ContactsArgs, config: &Config) -> anyhow::Result<()> {
    let api = ApiClient::new(&config.api)?;
    let contacts = api.list_contacts().await?;

    let view = ContactView::new(args.me, args.online).online_only(args.online_only);
    let arranged = view.arrange(&contacts);
    tracing::debug!(
        "{} contacts, {} shown, {} online",
        contacts.len(),
        arranged.len(),
        view.online_count()
    );

    let listing: Vec<_> = arranged
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.full_name,
                "online": view.is_online(c),
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "online_count": view.online_count(),
            "contacts": listing,
        }))?
    );
    Ok(())
}
