//! Per-resource services. Each one borrows a [`Client`](crate::Client) and
//! maps its operations onto a verb and path of the testing or sending API.

mod account_users;
mod accounts;
mod attachments;
mod inboxes;
mod messages;
mod permissions;
mod projects;
mod send_email;

pub use account_users::{AccountUsersService, ListAccountUsersParams};
pub use accounts::AccountsService;
pub use attachments::AttachmentsService;
pub use inboxes::{InboxesService, UpdateInboxRequest};
pub use messages::MessagesService;
pub use permissions::{AccessLevel, PermissionRequest, PermissionsService, ResourceType};
pub use projects::ProjectsService;
pub use send_email::SendEmailService;
