//! Account user (account access) operations.

use reqwest::{Method, Request};

use crate::{AccountUser, Client, Response, Result};

/// Service for users and invites with access to an account.
///
/// These endpoints require account admin or owner permissions.
pub struct AccountUsersService<'a> {
    client: &'a Client,
}

/// Filters for [`AccountUsersService::list`].
///
/// When either list is non-empty only users with access to those projects or
/// inboxes are returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccountUsersParams {
    pub project_ids: Vec<u64>,
    pub inbox_ids: Vec<u64>,
}

impl ListAccountUsersParams {
    fn apply(&self, request: &mut Request) {
        if self.project_ids.is_empty() && self.inbox_ids.is_empty() {
            return;
        }
        let mut query = request.url_mut().query_pairs_mut();
        for id in &self.project_ids {
            query.append_pair("project_ids[]", &id.to_string());
        }
        for id in &self.inbox_ids {
            query.append_pair("inbox_ids[]", &id.to_string());
        }
    }
}

impl<'a> AccountUsersService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists all users in the account, optionally filtered by resource.
    pub async fn list(&self, account_id: u64, params: &ListAccountUsersParams) -> Result<(Vec<AccountUser>, Response)> {
        let path = format!("/accounts/{account_id}/account_accesses");
        let mut request = self.client.new_request(Method::GET, &path, None::<&()>)?;
        params.apply(&mut request);
        self.client.execute_json(request).await
    }

    /// Removes a user's access from the account.
    pub async fn remove(&self, account_id: u64, account_access_id: u64) -> Result<Response> {
        let path = format!("/accounts/{account_id}/account_accesses/{account_access_id}");
        self.client
            .fetch_empty(Method::DELETE, &path, None::<&()>)
            .await
    }
}
