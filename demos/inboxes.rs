//! Walk every account's inboxes and print the newest message of each.
//!
//! ```sh
//! MAILTRAP_API_KEY=... cargo run --example inboxes
//! ```

use mailtrap_client::{Client, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_env()?;

    let (accounts, _) = client.accounts().list().await?;
    for account in accounts {
        println!("account {} ({})", account.name, account.id);

        let (inboxes, _) = client.inboxes().list(account.id).await?;
        for inbox in inboxes {
            println!(
                "  inbox {} ({}): {} messages, {} unread",
                inbox.name, inbox.id, inbox.emails_count, inbox.emails_unread_count
            );

            let messages = match client.messages().list(account.id, inbox.id).await {
                Ok((messages, _)) => messages,
                Err(Error::Api(err)) => {
                    eprintln!("    skipped: {} {}", err.status(), err.message());
                    continue;
                }
                Err(err) => return Err(err),
            };

            if let Some(latest) = messages.first() {
                println!("    latest: {} from {}", latest.subject, latest.from_email);
                let (text, _) = client
                    .messages()
                    .as_text(account.id, inbox.id, latest.id)
                    .await?;
                println!("    {}", text.lines().next().unwrap_or_default());
            }
        }
    }

    Ok(())
}
