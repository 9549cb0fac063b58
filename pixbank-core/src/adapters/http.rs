//! PixBank REST API client
//!
//! Every request leaves through [`ApiClient::execute`], which runs it past
//! the [`RequestAuthenticator`] first. No other code attaches credentials.

use std::sync::Arc;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::services::session::SessionStore;

/// Outbound request hook
///
/// Adds `Accept: application/json` to every request and
/// `Authorization: Bearer <token>` whenever the session store holds a token.
pub struct RequestAuthenticator {
    session: Arc<SessionStore>,
}

impl RequestAuthenticator {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let request = request.header(ACCEPT, "application/json");
        match self.session.token()? {
            Some(token) => Ok(request.header(AUTHORIZATION, format!("Bearer {}", token))),
            None => Ok(request),
        }
    }
}

/// Blocking HTTP client bound to the API base URL
pub struct ApiClient {
    client: Client,
    base_url: String,
    authenticator: RequestAuthenticator,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:3000/v1`)
    pub fn new(base_url: &str, session: Arc<SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pixbank/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authenticator: RequestAuthenticator::new(session),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.request(Method::GET, path))
    }

    pub fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::GET, path).query(query))
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body))
    }

    pub fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PUT, path).json(body))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.client.request(method, url)
    }

    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self
            .authenticator
            .authenticate(request)?
            .send()
            .map_err(map_request_error)?;

        let body = check_response_status(response)?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Map request errors to readable messages. No status: nothing came back.
fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::transport("Connection to the PixBank API timed out")
    } else if error.is_connect() {
        Error::transport(format!("Unable to connect to the PixBank API: {}", error))
    } else {
        Error::transport(format!("PixBank request failed: {}", error))
    }
}

/// Read the body, failing with the backend's status and body on non-2xx
fn check_response_status(response: Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| Error::transport(format!("Failed to read response body: {}", e)))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(Error::backend(status.as_u16(), body))
    }
}
