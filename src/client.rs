//! Mailtrap async client and the request/response transport shared by every service.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Method, Request, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ApiError, ConstructionError, DecodeError};
use crate::services::{
    AccountUsersService, AccountsService, AttachmentsService, InboxesService, MessagesService,
    PermissionsService, ProjectsService, SendEmailService,
};
use crate::{Body, DecodeTarget, Error, Response, Result};

/// Environment variable read by [`ClientBuilder::from_env`].
pub const API_KEY_ENV: &str = "MAILTRAP_API_KEY";

/// The only path served by the sending API.
pub(crate) const SEND_EMAIL_PATH: &str = "/send";

pub(crate) const JSON_CONTENT: &str = "application/json";

const TESTING_API_URL: &str = "https://mailtrap.io/api";
const SENDING_API_URL: &str = "https://send.api.mailtrap.io/api";

/// Async client for the Mailtrap testing and sending APIs.
///
/// The client is immutable once built and cheap to clone; services returned by
/// [`Client::inboxes`], [`Client::messages`] and friends borrow it.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    authorization: HeaderValue,
    user_agent: HeaderValue,
    proxy: Option<String>,
    testing_url: String,
    sending_url: String,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default endpoints for the given API key.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtrap_client::Client;
    /// # fn main() -> Result<(), mailtrap_client::Error> {
    /// let client = Client::new("my-api-token")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Create a client using the API key from `MAILTRAP_API_KEY`.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env().build()
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Root of the testing API (accounts, inboxes, messages, ...).
    pub fn testing_url(&self) -> &str {
        &self.testing_url
    }

    /// Root of the sending API.
    pub fn sending_url(&self) -> &str {
        &self.sending_url
    }

    /// Accounts the token can access.
    pub fn accounts(&self) -> AccountsService<'_> {
        AccountsService::new(self)
    }

    /// Users and invites with access to an account.
    pub fn account_users(&self) -> AccountUsersService<'_> {
        AccountUsersService::new(self)
    }

    /// Account resources and bulk permission changes.
    pub fn permissions(&self) -> PermissionsService<'_> {
        PermissionsService::new(self)
    }

    /// Projects grouping sandbox inboxes.
    pub fn projects(&self) -> ProjectsService<'_> {
        ProjectsService::new(self)
    }

    /// Sandbox inboxes and their maintenance actions.
    pub fn inboxes(&self) -> InboxesService<'_> {
        InboxesService::new(self)
    }

    /// Messages captured in an inbox.
    pub fn messages(&self) -> MessagesService<'_> {
        MessagesService::new(self)
    }

    /// Attachments of captured messages.
    pub fn attachments(&self) -> AttachmentsService<'_> {
        AttachmentsService::new(self)
    }

    /// Transactional sending through the sending API.
    pub fn send_email(&self) -> SendEmailService<'_> {
        SendEmailService::new(self)
    }

    /// Build an authenticated request for `path`.
    ///
    /// `path` is relative to the sending root when it is exactly `/send` and to
    /// the testing root otherwise. GET, HEAD and OPTIONS never carry a body;
    /// for other methods a `Some` body is sent as JSON.
    ///
    /// No network I/O happens here.
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let raw = format!("{}{}", self.base_url_for(path), path);
        let url = Url::parse(&raw)
            .map_err(|source| ConstructionError::InvalidUrl { url: raw, source })?;

        let body = match body {
            Some(body) if allows_body(&method) => {
                Some(serde_json::to_vec(body).map_err(ConstructionError::Serialize)?)
            }
            _ => None,
        };

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT));
        }
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT));
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(AUTHORIZATION, self.authorization.clone());
        *request.body_mut() = body.map(Into::into);

        Ok(request)
    }

    /// Send a request built by [`Client::new_request`] and decode the reply.
    ///
    /// The body is always read to the end. Statuses outside 200-299 become
    /// [`Error::Api`]; otherwise `target` decides what comes back. Asking for
    /// [`DecodeTarget::Json`] on a request whose `Accept` is not
    /// `application/json` fails with [`Error::Decode`]. A body that breaks off
    /// after the headers arrived is also a [`Error::Decode`] carrying the
    /// envelope.
    pub async fn execute<T>(&self, request: Request, target: DecodeTarget) -> Result<(Response, Body<T>)>
    where
        T: DeserializeOwned,
    {
        let method = request.method().clone();
        let accepts_json = request
            .headers()
            .get(ACCEPT)
            .is_some_and(|accept| accept == JSON_CONTENT);

        debug!(%method, url = %request.url(), "sending request");
        let response = self.http.execute(request).await.map_err(Error::Transport)?;
        let envelope = Response::new(method, &response);
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(status = envelope.status().as_u16(), url = %envelope.url(), "response body cut short");
                return Err(
                    DecodeError::with_source(Some(envelope), "failed to read response body", err).into(),
                );
            }
        };
        debug!(status = envelope.status().as_u16(), len = bytes.len(), "received response");

        if let Err(err) = check_response(&envelope, &bytes) {
            warn!(
                status = err.status().as_u16(),
                url = %envelope.url(),
                message = err.message(),
                "request rejected by api"
            );
            return Err(err.into());
        }

        let body = match target {
            DecodeTarget::Discard => Body::Empty,
            DecodeTarget::Bytes => Body::Bytes(bytes.to_vec()),
            DecodeTarget::Text => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => Body::Text(text),
                Err(err) => {
                    return Err(DecodeError::with_source(
                        Some(envelope),
                        "response body is not valid UTF-8",
                        err,
                    )
                    .into());
                }
            },
            DecodeTarget::Json if accepts_json => match serde_json::from_slice(&bytes) {
                Ok(value) => Body::Json(value),
                Err(err) => {
                    return Err(
                        DecodeError::with_source(Some(envelope), "invalid JSON body", err).into(),
                    );
                }
            },
            DecodeTarget::Json => {
                return Err(DecodeError::new(Some(envelope), "undefined response type").into());
            }
        };

        Ok((envelope, body))
    }

    /// Request `path` and decode the JSON reply into `T`.
    pub(crate) async fn fetch_json<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(T, Response)>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.new_request(method, path, body)?;
        self.execute_json(request).await
    }

    /// Execute a prepared request and decode the JSON reply into `T`.
    pub(crate) async fn execute_json<T>(&self, request: Request) -> Result<(T, Response)>
    where
        T: DeserializeOwned,
    {
        match self.execute(request, DecodeTarget::Json).await? {
            (response, Body::Json(value)) => Ok((value, response)),
            (response, _) => Err(DecodeError::new(Some(response), "expected a JSON body").into()),
        }
    }

    /// Request `path`, ignoring whatever body comes back.
    pub(crate) async fn fetch_empty<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let request = self.new_request(method, path, body)?;
        let (response, _) = self
            .execute::<serde::de::IgnoredAny>(request, DecodeTarget::Discard)
            .await?;
        Ok(response)
    }

    /// GET `path` with a non-JSON `Accept` and return the body as UTF-8 text.
    pub(crate) async fn fetch_text(&self, path: &str, accept: &'static str) -> Result<(String, Response)> {
        let request = self.accepting(path, accept)?;
        match self.execute::<serde::de::IgnoredAny>(request, DecodeTarget::Text).await? {
            (response, Body::Text(text)) => Ok((text, response)),
            (response, _) => Err(DecodeError::new(Some(response), "expected a text body").into()),
        }
    }

    /// GET `path` with a non-JSON `Accept` and return the body bytes untouched.
    pub(crate) async fn fetch_bytes(&self, path: &str, accept: &'static str) -> Result<(Vec<u8>, Response)> {
        let request = self.accepting(path, accept)?;
        match self.execute::<serde::de::IgnoredAny>(request, DecodeTarget::Bytes).await? {
            (response, Body::Bytes(bytes)) => Ok((bytes, response)),
            (response, _) => Err(DecodeError::new(Some(response), "expected a binary body").into()),
        }
    }

    fn accepting(&self, path: &str, accept: &'static str) -> Result<Request> {
        let mut request = self.new_request(Method::GET, path, None::<&()>)?;
        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static(accept));
        Ok(request)
    }

    fn base_url_for(&self, path: &str) -> &str {
        if path == SEND_EMAIL_PATH {
            &self.sending_url
        } else {
            &self.testing_url
        }
    }
}

/// Classify a completed response.
///
/// Returns `Ok` for statuses in 200-299. Anything else becomes an
/// [`ApiError`] built from `body`; a body that is not the documented error
/// JSON is used verbatim as the message.
pub fn check_response(response: &Response, body: &[u8]) -> std::result::Result<(), ApiError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(ApiError::from_body(response.clone(), body))
}

fn allows_body(method: &Method) -> bool {
    !(*method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS)
}

fn default_user_agent() -> String {
    format!(
        "mailtrap-rust/{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Builder for configuring a Mailtrap client.
///
/// Start with [`Client::builder`] or [`ClientBuilder::from_env`].
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    timeout: Option<Duration>,
    user_agent: String,
    testing_url: String,
    sending_url: String,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No API key
    /// - No proxy, no timeout
    /// - `danger_accept_invalid_certs = false`
    /// - `mailtrap-rust/<version>` user agent
    /// - Production testing and sending endpoints
    pub fn new() -> Self {
        Self {
            api_key: None,
            proxy: None,
            danger_accept_invalid_certs: false,
            timeout: None,
            user_agent: default_user_agent(),
            testing_url: TESTING_API_URL.to_string(),
            sending_url: SENDING_API_URL.to_string(),
            http: None,
        }
    }

    /// Create a builder seeded with the API key from `MAILTRAP_API_KEY`, if set.
    pub fn from_env() -> Self {
        let builder = Self::new();
        match std::env::var(API_KEY_ENV) {
            Ok(key) => builder.api_key(key),
            Err(_) => builder,
        }
    }

    /// Set the API token sent as `Authorization: Bearer <key>`.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:1080").
    ///
    /// Ignored when a prepared client is supplied with [`ClientBuilder::http_client`].
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Total timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the testing API root.
    ///
    /// Useful for testing against a mock server.
    pub fn testing_url(mut self, url: impl Into<String>) -> Self {
        self.testing_url = url.into();
        self
    }

    /// Override the sending API root.
    pub fn sending_url(mut self, url: impl Into<String>) -> Self {
        self.sending_url = url.into();
        self
    }

    /// Use a prepared `reqwest::Client` as the transport.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client. No network request is made.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtrap_client::Client;
    /// # fn main() -> Result<(), mailtrap_client::Error> {
    /// let client = Client::builder()
    ///     .api_key("my-api-token")
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or(ConstructionError::MissingApiKey)?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(
            |source| ConstructionError::InvalidHeader {
                name: "authorization",
                source,
            },
        )?;
        authorization.set_sensitive(true);

        let user_agent = HeaderValue::from_str(&self.user_agent).map_err(|source| {
            ConstructionError::InvalidHeader {
                name: "user-agent",
                source,
            }
        })?;

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder()
                    .danger_accept_invalid_certs(self.danger_accept_invalid_certs);
                if let Some(proxy_url) = &self.proxy {
                    builder = builder.proxy(
                        reqwest::Proxy::all(proxy_url).map_err(ConstructionError::HttpClient)?,
                    );
                }
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(ConstructionError::HttpClient)?
            }
        };

        let testing_url = self.testing_url.trim_end_matches('/').to_string();
        let sending_url = self.sending_url.trim_end_matches('/').to_string();
        debug!(%testing_url, %sending_url, "mailtrap client ready");

        Ok(Client {
            http,
            authorization,
            user_agent,
            proxy: self.proxy,
            testing_url,
            sending_url,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("proxy", &self.proxy)
            .field("danger_accept_invalid_certs", &self.danger_accept_invalid_certs)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("testing_url", &self.testing_url)
            .field("sending_url", &self.sending_url)
            .finish_non_exhaustive()
    }
}
