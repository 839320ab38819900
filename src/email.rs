//! Outbound email payload for the sending API and its pre-flight checks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::null_as_default;

/// Longest category the sending API accepts, in characters.
pub const CATEGORY_MAX_LENGTH: usize = 255;

/// One email to dispatch through the sending API.
///
/// `from`, at least one `to` address, `subject` and one of `text` or `html`
/// are required; see [`SendEmailRequest::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailRequest {
    pub from: EmailAddress,
    pub to: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<EmailAttachment>,
    /// Extra headers. Values must already be encoded if they contain non-ASCII text.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    /// Key/value pairs carried with the email and its activity data.
    #[serde(default, rename = "custom_variables", skip_serializing_if = "HashMap::is_empty")]
    pub custom_vars: HashMap<String, String>,
    pub subject: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
}

/// A mailbox: address plus optional display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// A file attached to an outbound email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAttachment {
    /// Base64-encoded file content.
    pub content: String,
    pub filename: String,
    /// MIME type, e.g. `text/html`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposition: Option<Disposition>,
    /// Referenced from the HTML body when `disposition` is inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    Inline,
    Attachment,
}

/// Result of a successful send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendEmailResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message_ids: Vec<String>,
}

impl SendEmailRequest {
    /// Check the payload against the sending API's required fields.
    ///
    /// Rules run in order and the first failing rule is reported, except that
    /// all attachment problems are reported together, joined by `"; "`.
    /// Addresses are only checked for presence, not syntax.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from.email.is_empty() {
            return Err(ValidationError::new("'from' address is required"));
        }

        if self.to.is_empty() {
            return Err(ValidationError::new("'to' address is required"));
        }
        if self.to.iter().any(|address| address.email.is_empty()) {
            return Err(ValidationError::new("'email' is required in 'to' address"));
        }

        let attachment_errors: Vec<&str> = self
            .attachments
            .iter()
            .flat_map(|attachment| {
                let content = attachment
                    .content
                    .is_empty()
                    .then_some("'content' is required in attachment");
                let filename = attachment
                    .filename
                    .is_empty()
                    .then_some("'filename' is required in attachment");
                content.into_iter().chain(filename)
            })
            .collect();
        if !attachment_errors.is_empty() {
            return Err(ValidationError::new(attachment_errors.join("; ")));
        }

        if self.subject.is_empty() {
            return Err(ValidationError::new("'subject' is required"));
        }

        if self.text.is_empty() && self.html.is_empty() {
            return Err(ValidationError::new("one of 'text' or 'html' is required"));
        }

        if self.category.chars().count() > CATEGORY_MAX_LENGTH {
            return Err(ValidationError::new(format!(
                "'category' is greater than {CATEGORY_MAX_LENGTH} chars"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SendEmailRequest {
        SendEmailRequest {
            from: EmailAddress::with_name("ches@example.com", "Ches"),
            to: vec![EmailAddress::new("johndoe@example.com")],
            subject: "Your Example Order Confirmation".to_string(),
            text: "Congratulations on your order no.123".to_string(),
            ..Default::default()
        }
    }

    fn attachment(content: &str, filename: &str) -> EmailAttachment {
        EmailAttachment {
            content: content.to_string(),
            filename: filename.to_string(),
            ..Default::default()
        }
    }

    fn message(request: &SendEmailRequest) -> String {
        request.validate().unwrap_err().message().to_string()
    }

    #[test]
    fn valid_request_passes() {
        assert_eq!(valid_request().validate(), Ok(()));
    }

    #[test]
    fn sender_is_required() {
        let request = SendEmailRequest {
            from: EmailAddress::default(),
            ..valid_request()
        };
        assert_eq!(message(&request), "'from' address is required");
    }

    #[test]
    fn recipients_are_required() {
        let request = SendEmailRequest {
            to: vec![],
            ..valid_request()
        };
        assert_eq!(message(&request), "'to' address is required");

        let request = SendEmailRequest {
            to: vec![EmailAddress::new("a@example.com"), EmailAddress::new("")],
            ..valid_request()
        };
        assert_eq!(message(&request), "'email' is required in 'to' address");
    }

    #[test]
    fn every_attachment_problem_is_reported() {
        let request = SendEmailRequest {
            attachments: vec![
                attachment("", "a.txt"),
                attachment("aGVsbG8=", ""),
                attachment("aGVsbG8=", "ok.txt"),
                attachment("", ""),
            ],
            ..valid_request()
        };
        assert_eq!(
            message(&request),
            "'content' is required in attachment; \
             'filename' is required in attachment; \
             'content' is required in attachment; \
             'filename' is required in attachment"
        );
    }

    #[test]
    fn well_formed_attachments_pass() {
        let request = SendEmailRequest {
            attachments: vec![attachment("aGVsbG8=", "hello.txt")],
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rules_fail_fast_in_order() {
        let request = SendEmailRequest {
            to: vec![],
            subject: String::new(),
            attachments: vec![attachment("", "")],
            ..valid_request()
        };
        assert_eq!(message(&request), "'to' address is required");

        let request = SendEmailRequest {
            subject: String::new(),
            attachments: vec![attachment("", "x")],
            ..valid_request()
        };
        assert_eq!(message(&request), "'content' is required in attachment");
    }

    #[test]
    fn subject_is_required() {
        let request = SendEmailRequest {
            subject: String::new(),
            ..valid_request()
        };
        assert_eq!(message(&request), "'subject' is required");
    }

    #[test]
    fn one_body_is_required() {
        let request = SendEmailRequest {
            text: String::new(),
            ..valid_request()
        };
        assert_eq!(message(&request), "one of 'text' or 'html' is required");

        let html_only = SendEmailRequest {
            text: String::new(),
            html: "<p>hi</p>".to_string(),
            ..valid_request()
        };
        assert!(html_only.validate().is_ok());
    }

    #[test]
    fn category_length_is_bounded() {
        let at_limit = SendEmailRequest {
            category: "c".repeat(CATEGORY_MAX_LENGTH),
            ..valid_request()
        };
        assert!(at_limit.validate().is_ok());

        let over = SendEmailRequest {
            category: "c".repeat(CATEGORY_MAX_LENGTH + 1),
            ..valid_request()
        };
        assert_eq!(message(&over), "'category' is greater than 255 chars");
    }

    #[test]
    fn category_length_counts_characters() {
        let request = SendEmailRequest {
            category: "é".repeat(CATEGORY_MAX_LENGTH),
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn empty_optional_fields_are_omitted_from_json() {
        let json = serde_json::to_value(valid_request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from": {"email": "ches@example.com", "name": "Ches"},
                "to": [{"email": "johndoe@example.com"}],
                "subject": "Your Example Order Confirmation",
                "text": "Congratulations on your order no.123"
            })
        );
    }

    #[test]
    fn attachment_fields_use_wire_names() {
        let request = SendEmailRequest {
            attachments: vec![EmailAttachment {
                content_type: Some("text/html".to_string()),
                disposition: Some(Disposition::Attachment),
                ..attachment("PGh0bWw+", "index.html")
            }],
            custom_vars: HashMap::from([("user_id".to_string(), "1".to_string())]),
            ..valid_request()
        };
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(
            json["attachments"][0],
            serde_json::json!({
                "content": "PGh0bWw+",
                "filename": "index.html",
                "type": "text/html",
                "disposition": "attachment"
            })
        );
        assert_eq!(json["custom_variables"]["user_id"], "1");
    }
}
