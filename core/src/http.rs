//! HTTP transport types and the blocking transport behind the client.
//!
//! # Design
//! Requests and responses are described as plain data. `WebmasterClient`
//! builds an `HttpRequest`, hands it to a `Transport` for the round-trip and
//! interprets the returned `HttpResponse` itself, so status classification
//! and decoding never depend on the HTTP library in use. `UreqTransport` is
//! the production implementation; tests plug in scripted transports.
//!
//! All fields use owned types (`String`, `Vec`) so values can be recorded,
//! cloned and compared freely in tests.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and ready to send; `endpoint` is the path relative to
/// the API base and is what errors report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Response body as text. `UreqTransport` decodes it lossily: byte
    /// sequences that are not valid UTF-8 become U+FFFD, so `body` (and the
    /// `error_data` built from it) is exact only for UTF-8 payloads.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one blocking HTTP round-trip.
///
/// Implementations must return every received response as `Ok`, whatever its
/// status; `Err` is reserved for failures where no response exists.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a pooled `ureq::Agent`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data and the client can classify them.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()
            .new_agent();
        Self { agent }
    }

    fn prepare<B>(builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
        let mut builder = request
            .headers
            .iter()
            .fold(builder, |builder, (name, value)| {
                builder.header(name.as_str(), value.as_str())
            });
        if let Some(timeout) = request.timeout {
            builder = builder.config().timeout_global(Some(timeout)).build();
        }
        builder
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => Self::prepare(self.agent.get(url), request).call(),
            (HttpMethod::Delete, _) => Self::prepare(self.agent.delete(url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                Self::prepare(self.agent.post(url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => Self::prepare(self.agent.post(url), request).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| TransportError::new(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body: body_text(&bytes),
        })
    }
}

/// Lossy UTF-8 decoding of a response body.
fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
