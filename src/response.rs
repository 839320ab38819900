//! Response envelope and decode targets.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

/// Metadata of a completed HTTP exchange.
///
/// Returned by [`Client::execute`](crate::Client::execute) and carried by
/// [`ApiError`](crate::ApiError) so status and headers stay readable when a
/// call fails.
#[derive(Debug, Clone)]
pub struct Response {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
}

impl Response {
    pub(crate) fn new(method: Method, response: &reqwest::Response) -> Self {
        Self {
            method,
            url: response.url().clone(),
            status: response.status(),
            headers: response.headers().clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(method: Method, url: Url, status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            method,
            url,
            status,
            headers,
        }
    }

    /// Method of the request that produced this response.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Final URL after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// How a successful response body should be handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeTarget {
    /// Read and drop the body.
    Discard,
    /// Return the body verbatim as UTF-8 text.
    Text,
    /// Return the body verbatim as bytes.
    Bytes,
    /// Decode the body as JSON. Only valid for requests sent with
    /// `Accept: application/json`.
    Json,
}

/// A decoded response body, shaped by the [`DecodeTarget`] that was asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Body<T> {
    Empty,
    Text(String),
    Bytes(Vec<u8>),
    Json(T),
}
