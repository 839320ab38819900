//! Data models returned by the Mailtrap testing API.
//!
//! Fields the API may omit or send as `null` default to empty values rather
//! than failing the whole decode.

use serde::{Deserialize, Deserializer, Serialize};

/// A Mailtrap account the token has access to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub access_levels: Vec<u32>,
}

/// A user or invite with access to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountUser {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    /// `User` or `Invite`.
    #[serde(deserialize_with = "null_as_default")]
    pub specifier_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resources: Vec<AccountUserResource>,
    #[serde(deserialize_with = "null_as_default")]
    pub specifier: AccountUserSpecifier,
    #[serde(deserialize_with = "null_as_default")]
    pub permissions: Permissions,
}

/// A resource an account user has been granted access to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountUserResource {
    /// One of `account`, `billing`, `project`, `inbox`, `mailsend_domain`.
    #[serde(deserialize_with = "null_as_default")]
    pub resource_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_id: u64,
    /// 1000 (owner), 100 (admin) or 10 (viewer).
    #[serde(deserialize_with = "null_as_default")]
    pub access_level: u32,
}

/// Who an account access belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountUserSpecifier {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// What the current token may do with a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    #[serde(deserialize_with = "null_as_default")]
    pub can_read: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_update: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_destroy: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_leave: bool,
}

/// A node in the account's resource tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    /// Access level of the token used to make the request.
    #[serde(deserialize_with = "null_as_default")]
    pub access_level: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub resources: Vec<Resource>,
}

/// A project and the inboxes it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub share_links: ShareLinks,
    #[serde(deserialize_with = "null_as_default")]
    pub inboxes: Vec<Inbox>,
    #[serde(deserialize_with = "null_as_default")]
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareLinks {
    #[serde(deserialize_with = "null_as_default")]
    pub admin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub viewer: String,
}

/// A sandbox inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inbox {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// SMTP username.
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    /// SMTP password.
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(deserialize_with = "null_as_default")]
    pub max_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_username_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub sent_messages_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub forwarded_messages_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub used: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub forward_from_email_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pop3_domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub emails_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub emails_unread_count: u64,
    pub last_message_sent_at: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub smtp_ports: Vec<u16>,
    #[serde(deserialize_with = "null_as_default")]
    pub pop3_ports: Vec<u16>,
    #[serde(deserialize_with = "null_as_default")]
    pub max_message_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub permissions: Permissions,
}

/// A message captured in an inbox.
///
/// Timestamps are kept as the RFC 3339 strings the API returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub inbox_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sent_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub from_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub from_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_read: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_body_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub text_body_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub human_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub txt_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub raw_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub download_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_source_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub blacklists_report_info: bool,
    #[serde(rename = "smtp_information")]
    pub smtp_info: Option<SmtpInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub ok: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub data: SmtpInfoData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpInfoData {
    #[serde(deserialize_with = "null_as_default")]
    pub mail_from_addr: String,
    #[serde(deserialize_with = "null_as_default")]
    pub client_ip: String,
}

/// Spam analysis of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpamReport {
    #[serde(deserialize_with = "null_as_default")]
    pub report: SpamReportDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SpamReportDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub response_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub response_message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub response_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub spam: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub threshold: f64,
    /// Rule hits; entries are objects or `null` depending on the checker.
    #[serde(deserialize_with = "null_as_default")]
    pub details: Vec<serde_json::Value>,
}

/// An attachment of a captured message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub message_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub filename: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attachment_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transfer_encoding: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attachment_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attachment_human_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub download_path: String,
}

/// Treat an explicit `null` like a missing key and fall back to `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
