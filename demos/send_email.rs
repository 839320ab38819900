//! Send one email through the sending API.
//!
//! ```sh
//! MAILTRAP_API_KEY=... RUST_LOG=mailtrap_client=debug cargo run --example send_email -- you@example.com
//! ```

use mailtrap_client::{Client, EmailAddress, SendEmailRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), mailtrap_client::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let recipient = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "john@example.com".to_string());

    let client = Client::from_env()?;
    let request = SendEmailRequest {
        from: EmailAddress::with_name("mailtrap@example.com", "Mailtrap Test"),
        to: vec![EmailAddress::new(recipient)],
        subject: "You are awesome!".to_string(),
        text: "Congrats for sending test email with Mailtrap!".to_string(),
        category: "Integration Test".to_string(),
        ..Default::default()
    };

    let (sent, response) = client.send_email().send(&request).await?;
    println!(
        "{} success: {}, ids: {:?}",
        response.status(),
        sent.success,
        sent.message_ids
    );
    Ok(())
}
