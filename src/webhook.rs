//! Decoding of sending-API webhook deliveries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::DecodeError;
use crate::models::null_as_default;

/// A webhook delivery: one or more events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Events {
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

/// An email event the webhook is subscribed to (delivery, open, bounce, ...).
///
/// Which fields are filled depends on the event type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub event: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_variables: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub event_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub response: String,
    #[serde(deserialize_with = "null_as_default")]
    pub response_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_agent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Decode a webhook request body.
///
/// # Examples
/// ```
/// let body = br#"{"events":[{"event":"delivery","email":"john@example.com","timestamp":1}]}"#;
/// let events = mailtrap_client::decode_webhook(body)?;
/// assert_eq!(events.events[0].event, "delivery");
/// # Ok::<(), mailtrap_client::Error>(())
/// ```
pub fn decode_webhook(body: &[u8]) -> Result<Events> {
    serde_json::from_slice(body)
        .map_err(|err| DecodeError::with_source(None, "invalid webhook payload", err).into())
}
