//! Error types for Mailtrap operations.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::Response;

/// Errors returned by the Mailtrap client.
///
/// Each variant answers a different question: was the request malformed
/// ([`Error::Construction`], [`Error::Validation`]), did the network fail
/// ([`Error::Transport`]), did the server reject it ([`Error::Api`]), or could
/// the reply not be read ([`Error::Decode`]).
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be built (bad URL, unserializable payload, invalid key).
    #[error("failed to build request: {0}")]
    Construction(#[from] ConstructionError),

    /// A payload was rejected before it was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network-level failure: DNS, connect, TLS, redirect loop, or timeout.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a status outside 200-299.
    #[error(transparent)]
    Api(Box<ApiError>),

    /// The response body could not be interpreted as requested.
    #[error(transparent)]
    Decode(Box<DecodeError>),
}

impl Error {
    /// HTTP status of the response behind this error, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(err) => Some(err.status()),
            Self::Decode(err) => err.response().map(Response::status),
            Self::Transport(err) => err.status(),
            Self::Construction(_) | Self::Validation(_) => None,
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Self::Api(Box::new(err))
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Decode(Box::new(err))
    }
}

/// Reasons a request could not be constructed.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// No API key was configured.
    #[error("API key is required")]
    MissingApiKey,

    /// The base URL and path did not form a valid URL.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A header value (API key or user agent) contains forbidden characters.
    #[error("invalid {name} header value")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// The request payload could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The underlying HTTP client could not be created.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// A payload failed a pre-flight business rule.
///
/// The message names the offending field, e.g. `'to' address is required`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable rule violation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Structured error parsed from a non-2xx response.
///
/// When the body does not have the documented `{"message", "errors"}` shape
/// the raw body text becomes the message and `errors` is empty.
#[derive(Debug, Clone)]
pub struct ApiError {
    response: Response,
    message: String,
    errors: Vec<String>,
}

impl ApiError {
    /// Classify a response body received with a non-2xx status.
    pub(crate) fn from_body(response: Response, body: &[u8]) -> Self {
        let (message, errors) = if body.is_empty() {
            (String::new(), Vec::new())
        } else {
            match serde_json::from_slice::<ErrorBody>(body) {
                Ok(parsed) => parsed.into_parts(),
                Err(_) => (String::from_utf8_lossy(body).into_owned(), Vec::new()),
            }
        };

        Self {
            response,
            message,
            errors,
        }
    }

    /// The response envelope (status, headers, URL) this error came from.
    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Sub-errors reported by the API, possibly empty.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.response.method(),
            self.response.url(),
            self.response.status().as_u16(),
            self.message
        )?;
        if !self.errors.is_empty() {
            write!(f, " [{}]", self.errors.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Error body as sent by the API.
///
/// Mailtrap mostly answers `{"message": .., "errors": [..]}`, but some
/// endpoints use `{"error": ".."}` or a bare string under `errors`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<ErrorList>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorList {
    Many(Vec<String>),
    One(String),
}

impl ErrorBody {
    fn into_parts(self) -> (String, Vec<String>) {
        let message = self.message.or(self.error).unwrap_or_default();
        let errors = match self.errors {
            Some(ErrorList::Many(errors)) => errors,
            Some(ErrorList::One(error)) => vec![error],
            None => Vec::new(),
        };
        (message, errors)
    }
}

/// A successful response whose body could not be decoded as requested.
#[derive(Debug, Error)]
#[error("failed to decode response: {message}")]
pub struct DecodeError {
    response: Option<Response>,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DecodeError {
    pub(crate) fn new(response: Option<Response>, message: impl Into<String>) -> Self {
        Self {
            response,
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn with_source(
        response: Option<Response>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            response,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The response envelope, absent when decoding data that did not come from a request.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
