//! Permission and resource operations.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{Client, Resource, Response, Result};

/// Service for account resources and access permissions.
pub struct PermissionsService<'a> {
    client: &'a Client,
}

/// Kind of resource a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Account,
    Billing,
    Project,
    Inbox,
    MailsendDomain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Admin,
    Viewer,
}

/// One entry of a bulk permission update.
///
/// An existing `(resource_type, resource_id)` pair is updated, a new one is
/// created, and `destroy` removes it instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRequest {
    pub resource_id: u64,
    pub resource_type: ResourceType,
    pub access_level: AccessLevel,
    #[serde(rename = "_destroy", default, skip_serializing_if = "std::ops::Not::not")]
    pub destroy: bool,
}

#[derive(Serialize)]
struct BulkPermissions<'p> {
    permissions: &'p [PermissionRequest],
}

impl<'a> PermissionsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Gets all resources in the account to which the token has admin access.
    pub async fn resources(&self, account_id: u64) -> Result<(Vec<Resource>, Response)> {
        let path = format!("/accounts/{account_id}/permissions/resources");
        self.client.fetch_json(Method::GET, &path, None::<&()>).await
    }

    /// Creates, updates or removes permissions of a user or token in one call.
    pub async fn manage(
        &self,
        account_id: u64,
        account_access_id: u64,
        permissions: &[PermissionRequest],
    ) -> Result<Response> {
        let path = format!("/accounts/{account_id}/account_accesses/{account_access_id}/permissions/bulk");
        self.client
            .fetch_empty(Method::PUT, &path, Some(&BulkPermissions { permissions }))
            .await
    }
}
