//! Account operations.

use reqwest::Method;

use crate::{Account, Client, Response, Result};

/// Service for listing accounts.
pub struct AccountsService<'a> {
    client: &'a Client,
}

impl<'a> AccountsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the accounts the API token has access to.
    pub async fn list(&self) -> Result<(Vec<Account>, Response)> {
        self.client
            .fetch_json(Method::GET, "/accounts", None::<&()>)
            .await
    }
}
