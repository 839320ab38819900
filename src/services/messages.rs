//! Message operations.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::error::ValidationError;
use crate::{Client, Message, Response, Result, SpamReport};

/// Loose `local@domain` check used before forwarding.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s<>()\[\],;:]+@[^@\s<>()\[\],;:]+\.[^@\s<>()\[\],;:]+$").unwrap()
});

/// Service for messages captured in an inbox.
pub struct MessagesService<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct MessagePayload {
    message: ReadState,
}

#[derive(Serialize)]
struct ReadState {
    is_read: bool,
}

#[derive(Serialize)]
struct ForwardPayload<'e> {
    email: &'e str,
}

impl<'a> MessagesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the messages in an inbox.
    pub async fn list(&self, account_id: u64, inbox_id: u64) -> Result<(Vec<Message>, Response)> {
        let path = format!("/accounts/{account_id}/inboxes/{inbox_id}/messages");
        self.client.fetch_json(Method::GET, &path, None::<&()>).await
    }

    /// Gets a message with its attributes.
    pub async fn get(&self, account_id: u64, inbox_id: u64, message_id: u64) -> Result<(Message, Response)> {
        let path = message_path(account_id, inbox_id, message_id, "");
        self.client.fetch_json(Method::GET, &path, None::<&()>).await
    }

    /// Marks a message as read or unread.
    pub async fn update(&self, account_id: u64, inbox_id: u64, message_id: u64, is_read: bool) -> Result<(Message, Response)> {
        let path = message_path(account_id, inbox_id, message_id, "");
        let payload = MessagePayload {
            message: ReadState { is_read },
        };
        self.client
            .fetch_json(Method::PATCH, &path, Some(&payload))
            .await
    }

    /// Deletes a message.
    pub async fn delete(&self, account_id: u64, inbox_id: u64, message_id: u64) -> Result<Response> {
        let path = message_path(account_id, inbox_id, message_id, "");
        self.client
            .fetch_empty(Method::DELETE, &path, None::<&()>)
            .await
    }

    /// Forwards a message to `email`.
    ///
    /// The address must have been confirmed by its owner beforehand. An address
    /// that does not look like `local@domain.tld` is rejected without a request.
    pub async fn forward(&self, account_id: u64, inbox_id: u64, message_id: u64, email: &str) -> Result<Response> {
        if !is_valid_address(email) {
            debug!(email, "rejecting forward target");
            return Err(ValidationError::new("Forward 'email' is invalid.").into());
        }

        let path = message_path(account_id, inbox_id, message_id, "/forward");
        self.client
            .fetch_empty(Method::POST, &path, Some(&ForwardPayload { email }))
            .await
    }

    /// Gets the spam score report of a message.
    pub async fn spam_report(&self, account_id: u64, inbox_id: u64, message_id: u64) -> Result<(SpamReport, Response)> {
        let path = message_path(account_id, inbox_id, message_id, "/spam_report");
        self.client.fetch_json(Method::GET, &path, None::<&()>).await
    }

    /// Gets the raw message body exactly as received, headers included.
    ///
    /// Returned as bytes since captured mail is often 8-bit and not valid UTF-8.
    pub async fn as_raw(&self, account_id: u64, inbox_id: u64, message_id: u64) -> Result<(Vec<u8>, Response)> {
        let path = message_path(account_id, inbox_id, message_id, "/body.raw");
        self.client.fetch_bytes(&path, "text/plain").await
    }

    /// Gets the plain-text body, if the message has one.
    pub async fn as_text(&self, account_id: u64, inbox_id: u64, message_id: u64) -> Result<(String, Response)> {
        let path = message_path(account_id, inbox_id, message_id, "/body.txt");
        self.client.fetch_text(&path, "text/plain").await
    }

    /// Gets the formatted HTML body. Not available for plain-text messages.
    pub async fn as_html(&self, account_id: u64, inbox_id: u64, message_id: u64) -> Result<(String, Response)> {
        let path = message_path(account_id, inbox_id, message_id, "/body.html");
        self.client.fetch_text(&path, "text/html").await
    }

    /// Gets the HTML source of the message.
    pub async fn as_html_source(&self, account_id: u64, inbox_id: u64, message_id: u64) -> Result<(String, Response)> {
        let path = message_path(account_id, inbox_id, message_id, "/body.htmlsource");
        self.client.fetch_text(&path, "text/html").await
    }

    /// Gets the message in `.eml` format, byte for byte.
    pub async fn as_eml(&self, account_id: u64, inbox_id: u64, message_id: u64) -> Result<(Vec<u8>, Response)> {
        let path = message_path(account_id, inbox_id, message_id, "/body.eml");
        self.client.fetch_bytes(&path, "message/rfc822").await
    }
}

fn message_path(account_id: u64, inbox_id: u64, message_id: u64, suffix: &str) -> String {
    format!("/accounts/{account_id}/inboxes/{inbox_id}/messages/{message_id}{suffix}")
}

fn is_valid_address(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
