//! Attachment operations.

use reqwest::Method;

use crate::{Attachment, Client, Response, Result};

/// Service for attachments of captured messages.
pub struct AttachmentsService<'a> {
    client: &'a Client,
}

impl<'a> AttachmentsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the attachments of a message.
    pub async fn list(&self, account_id: u64, inbox_id: u64, message_id: u64) -> Result<(Vec<Attachment>, Response)> {
        let path = format!("/accounts/{account_id}/inboxes/{inbox_id}/messages/{message_id}/attachments");
        self.client.fetch_json(Method::GET, &path, None::<&()>).await
    }

    /// Gets a single attachment.
    pub async fn get(
        &self,
        account_id: u64,
        inbox_id: u64,
        message_id: u64,
        attachment_id: u64,
    ) -> Result<(Attachment, Response)> {
        let path = format!(
            "/accounts/{account_id}/inboxes/{inbox_id}/messages/{message_id}/attachments/{attachment_id}"
        );
        self.client.fetch_json(Method::GET, &path, None::<&()>).await
    }
}
