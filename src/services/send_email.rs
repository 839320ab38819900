//! Email sending.

use reqwest::Method;
use tracing::debug;

use crate::client::SEND_EMAIL_PATH;
use crate::{Client, Response, Result, SendEmailRequest, SendEmailResponse};

/// Service for the sending API.
pub struct SendEmailService<'a> {
    client: &'a Client,
}

impl<'a> SendEmailService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Sends an email.
    ///
    /// The payload is validated first; an invalid payload fails with
    /// [`Error::Validation`](crate::Error::Validation) and nothing is sent.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtrap_client::{Client, EmailAddress, SendEmailRequest};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailtrap_client::Error> {
    /// let client = Client::from_env()?;
    /// let request = SendEmailRequest {
    ///     from: EmailAddress::with_name("sales@example.com", "Example Sales"),
    ///     to: vec![EmailAddress::new("customer@example.com")],
    ///     subject: "Your order".to_string(),
    ///     text: "Thanks for your order!".to_string(),
    ///     ..Default::default()
    /// };
    /// let (sent, response) = client.send_email().send(&request).await?;
    /// println!("{} {:?}", response.status(), sent.message_ids);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send(&self, request: &SendEmailRequest) -> Result<(SendEmailResponse, Response)> {
        if let Err(err) = request.validate() {
            debug!(reason = err.message(), "email payload rejected");
            return Err(err.into());
        }

        self.client
            .fetch_json(Method::POST, SEND_EMAIL_PATH, Some(request))
            .await
    }
}
