//! Inbox operations.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{Client, Inbox, Response, Result};

/// Service for sandbox inboxes.
pub struct InboxesService<'a> {
    client: &'a Client,
}

/// Fields of an inbox that can be changed. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInboxRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_username: Option<String>,
}

#[derive(Serialize)]
struct InboxPayload<T> {
    inbox: T,
}

#[derive(Serialize)]
struct InboxName<'n> {
    name: &'n str,
}

impl<'a> InboxesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists all inboxes of the account.
    pub async fn list(&self, account_id: u64) -> Result<(Vec<Inbox>, Response)> {
        let path = format!("/accounts/{account_id}/inboxes");
        self.client.fetch_json(Method::GET, &path, None::<&()>).await
    }

    /// Gets the attributes of an inbox.
    pub async fn get(&self, account_id: u64, inbox_id: u64) -> Result<(Inbox, Response)> {
        self.inbox_call(Method::GET, account_id, inbox_id, "").await
    }

    /// Creates an inbox in a project.
    pub async fn create(&self, account_id: u64, project_id: u64, name: &str) -> Result<(Inbox, Response)> {
        let path = format!("/accounts/{account_id}/projects/{project_id}/inboxes");
        let payload = InboxPayload {
            inbox: InboxName { name },
        };
        self.client
            .fetch_json(Method::POST, &path, Some(&payload))
            .await
    }

    /// Updates the inbox name and/or email username.
    pub async fn update(&self, account_id: u64, inbox_id: u64, update: &UpdateInboxRequest) -> Result<(Inbox, Response)> {
        let path = format!("/accounts/{account_id}/inboxes/{inbox_id}");
        self.client
            .fetch_json(Method::PATCH, &path, Some(&InboxPayload { inbox: update }))
            .await
    }

    /// Deletes an inbox with all its messages.
    pub async fn delete(&self, account_id: u64, inbox_id: u64) -> Result<Response> {
        let path = format!("/accounts/{account_id}/inboxes/{inbox_id}");
        self.client
            .fetch_empty(Method::DELETE, &path, None::<&()>)
            .await
    }

    /// Deletes every message in the inbox.
    pub async fn clean(&self, account_id: u64, inbox_id: u64) -> Result<(Inbox, Response)> {
        self.inbox_call(Method::PATCH, account_id, inbox_id, "/clean").await
    }

    /// Marks every message in the inbox as read.
    pub async fn mark_as_read(&self, account_id: u64, inbox_id: u64) -> Result<(Inbox, Response)> {
        self.inbox_call(Method::PATCH, account_id, inbox_id, "/all_read").await
    }

    /// Issues new SMTP credentials for the inbox.
    pub async fn reset_credentials(&self, account_id: u64, inbox_id: u64) -> Result<(Inbox, Response)> {
        self.inbox_call(Method::PATCH, account_id, inbox_id, "/reset_credentials")
            .await
    }

    /// Toggles the inbox's email address on or off.
    pub async fn enable_email(&self, account_id: u64, inbox_id: u64) -> Result<(Inbox, Response)> {
        self.inbox_call(Method::PATCH, account_id, inbox_id, "/toggle_email_username")
            .await
    }

    /// Resets the username part of the inbox's email address.
    pub async fn reset_email(&self, account_id: u64, inbox_id: u64) -> Result<(Inbox, Response)> {
        self.inbox_call(Method::PATCH, account_id, inbox_id, "/reset_email_username")
            .await
    }

    async fn inbox_call(&self, method: Method, account_id: u64, inbox_id: u64, action: &str) -> Result<(Inbox, Response)> {
        let path = format!("/accounts/{account_id}/inboxes/{inbox_id}{action}");
        self.client.fetch_json(method, &path, None::<&()>).await
    }
}
