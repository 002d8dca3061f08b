//! The HTTP seam between [`Geocoder`](super::Geocoder) and the network.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::TransportError;

/// Upper bound on a buffered response body.
///
/// A maximum-size geographies batch response is a few megabytes.
pub const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

/// A fully-read HTTP response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the two kinds of request the geocoder needs.
///
/// Implementations must read the body completely and release the connection
/// before returning, on success and on error. Non-2xx statuses are returned
/// as responses, not errors: the service reports problems inside JSON bodies
/// that the caller still needs to read.
///
/// Timeouts and cancellation are the implementation's business; the
/// geocoder issues each request exactly once.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;

    fn post(&self, url: &Url, content_type: &str, body: &[u8])
        -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }

    fn post(
        &self,
        url: &Url,
        content_type: &str,
        body: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        (**self).post(url, content_type, body)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }

    fn post(
        &self,
        url: &Url,
        content_type: &str,
        body: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        (**self).post(url, content_type, body)
    }
}

/// Default transport backed by a blocking [`ureq::Agent`].
#[derive(Clone, Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Creates a transport with an optional whole-request timeout.
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
        }
    }

    /// Wraps an agent the caller configured (proxies, TLS, pooling).
    ///
    /// The agent should have `http_status_as_error` disabled so service error
    /// bodies reach the geocoder.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn read(mut response: ureq::http::Response<ureq::Body>) -> Result<HttpResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_vec()?;
        Ok(HttpResponse { status, body })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let response = self.agent.get(url.as_str()).call()?;
        Self::read(response)
    }

    fn post(
        &self,
        url: &Url,
        content_type: &str,
        body: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .agent
            .post(url.as_str())
            .header("Content-Type", content_type)
            .send(body)?;
        Self::read(response)
    }
}
