//! HTTP transport for feature service queries.
//!
//! [`HttpClient`] is the seam between the lookup logic and the network, so a
//! canned implementation can stand in for the live service in tests.

use reqwest::blocking::Client;
use tracing::trace;
use url::Url;

use crate::error::Result;

/// Raw outcome of a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as UTF-8.
    pub body: String,
}

impl ServiceResponse {
    /// Create a response from a status code and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status signals a client or server error (4xx/5xx).
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Synchronous GET transport.
///
/// Implementations perform exactly one request per call and must not retry.
/// An HTTP error status is a successful call returning that status; only
/// transport failures (DNS, connect, TLS, timeouts) are errors.
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and return the status and body.
    fn get(&self, url: &Url) -> Result<ServiceResponse>;
}

/// [`HttpClient`] backed by `reqwest`'s blocking client.
///
/// Uses the transport's default timeout and sends no custom headers.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Create a client with default settings.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

impl From<Client> for ReqwestClient {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &Url) -> Result<ServiceResponse> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status().as_u16();
        let bytes = response.bytes()?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        trace!(status, bytes = bytes.len(), "Feature service responded");

        Ok(ServiceResponse { status, body })
    }
}

impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    fn get(&self, url: &Url) -> Result<ServiceResponse> {
        (**self).get(url)
    }
}
