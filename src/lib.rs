//! # Mailtrap Client
//! Asynchronous wrapper around the Mailtrap HTTP APIs: the testing API (accounts, projects, inboxes and the messages captured in them) and the sending API (transactional email), through a single [`Client`] configured with [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who send transactional email through Mailtrap, or who point their staging SMTP at a Mailtrap sandbox and want to assert on what arrived: create inboxes, read captured [`Message`]s as JSON, text, HTML or `.eml`, and clean up afterwards.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Each operation is a single request; nothing is retried and there is no background work.
//!
//! ## Routing
//! Requests for `/send` go to the sending root (`https://send.api.mailtrap.io/api`); every other path goes to the testing root (`https://mailtrap.io/api`). Both can be overridden on the builder.
//!
//! ## Responses
//! Every operation hands back the [`Response`] envelope (method, final URL, status, headers) next to its decoded value, so headers such as rate-limit counters stay readable after a successful call. Raw and `.eml` message bodies are returned as bytes, untouched.
//!
//! ## Errors
//! [`Error`] separates requests that could not be built ([`Error::Construction`]), payloads rejected before sending ([`Error::Validation`]), network failures ([`Error::Transport`]), non-2xx replies ([`Error::Api`], carrying status, message and sub-errors) and unreadable bodies ([`Error::Decode`]). The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Requests and responses are reported through `tracing` at debug level and API rejections at warn level. Install a subscriber to see them. The API key is never logged.
//!
//! ## Example
//! ```no_run
//! use mailtrap_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailtrap_client::Error> {
//!     let client = Client::from_env()?;
//!
//!     let (accounts, _) = client.accounts().list().await?;
//!     for account in accounts {
//!         let (inboxes, _) = client.inboxes().list(account.id).await?;
//!         for inbox in inboxes {
//!             let (messages, response) = client.messages().list(account.id, inbox.id).await?;
//!             println!("{}: {} messages ({})", inbox.name, messages.len(), response.status());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod email;
mod error;
mod models;
mod response;
pub mod services;
mod webhook;

pub use client::{API_KEY_ENV, Client, ClientBuilder, check_response};
pub use email::{
    CATEGORY_MAX_LENGTH, Disposition, EmailAddress, EmailAttachment, SendEmailRequest,
    SendEmailResponse,
};
pub use error::{ApiError, ConstructionError, DecodeError, Error, ValidationError};
pub use models::{
    Account, AccountUser, AccountUserResource, AccountUserSpecifier, Attachment, Inbox, Message,
    Permissions, Project, Resource, ShareLinks, SmtpInfo, SmtpInfoData, SpamReport,
    SpamReportDetails,
};
pub use response::{Body, DecodeTarget, Response};
pub use webhook::{Event, Events, decode_webhook};

/// Result type alias for Mailtrap operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
