//! Error types for the Webmaster API client.
//!
//! # Design
//! Every failure carries enough context to diagnose it without logs: the
//! endpoint that was attempted, the status code (if a response arrived), the
//! raw response body and a message. The accessors `http_code`, `endpoint`,
//! `error_data` and `message` expose that tuple uniformly across variants.
//! Nothing here is retried; the caller decides.

use thiserror::Error;

/// Status reported for failures where no HTTP response was received.
pub const SERVICE_UNAVAILABLE: u16 = 503;

/// Result type alias for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by `WebmasterClient` and its resource accessors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, timeout, body read).
    #[error("transport failure on {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        status: u16,
        endpoint: String,
        body: String,
    },

    /// A 2xx response body could not be decoded into the expected type.
    #[error("failed to decode HTTP {status} response from {endpoint}: {message}")]
    Decode {
        status: u16,
        endpoint: String,
        body: String,
        message: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// An endpoint or base URL could not be parsed.
    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// A parameter was rejected before any request was made.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing or malformed client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The user id lookup failed while building a client handle.
    #[error("failed to resolve user id: {0}")]
    Construction(#[source] Box<ApiError>),
}

impl ApiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// HTTP status associated with the failure.
    ///
    /// Transport failures report 503 so callers can treat "no response" and
    /// "service unavailable" alike.
    #[must_use]
    pub fn http_code(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => Some(SERVICE_UNAVAILABLE),
            Self::HttpStatus { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Construction(inner) => inner.http_code(),
            Self::Serialization(_)
            | Self::InvalidUrl { .. }
            | Self::InvalidParameter(_)
            | Self::Config(_) => None,
        }
    }

    /// Relative endpoint the failed request targeted.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Transport { endpoint, .. }
            | Self::HttpStatus { endpoint, .. }
            | Self::Decode { endpoint, .. } => Some(endpoint),
            Self::Construction(inner) => inner.endpoint(),
            _ => None,
        }
    }

    /// Raw response body, if a response was received.
    #[must_use]
    pub fn error_data(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } | Self::Decode { body, .. } => Some(body),
            Self::Construction(inner) => inner.error_data(),
            _ => None,
        }
    }

    /// Diagnostic message. Empty for plain status failures, whose body is
    /// left for the caller to inspect.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Transport { message, .. } | Self::Decode { message, .. } => message.clone(),
            Self::HttpStatus { .. } => String::new(),
            Self::Serialization(msg) | Self::InvalidParameter(msg) | Self::Config(msg) => {
                msg.clone()
            }
            Self::InvalidUrl { message, .. } => message.clone(),
            Self::Construction(inner) => inner.message(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.http_code() == Some(404) && matches!(self, Self::HttpStatus { .. })
    }
}

/// Failure reported by a [`Transport`](crate::http::Transport) implementation
/// when no response could be obtained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failure_reports_service_unavailable() {
        let err = ApiError::Transport {
            endpoint: "user".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.http_code(), Some(503));
        assert_eq!(err.endpoint(), Some("user"));
        assert_eq!(err.error_data(), None);
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn status_failure_has_empty_message() {
        let err = ApiError::HttpStatus {
            status: 404,
            endpoint: "user/1/hosts/x".to_string(),
            body: r#"{"error_code":"HOST_NOT_FOUND"}"#.to_string(),
        };
        assert_eq!(err.http_code(), Some(404));
        assert_eq!(err.error_data(), Some(r#"{"error_code":"HOST_NOT_FOUND"}"#));
        assert!(err.message().is_empty());
        assert!(err.is_not_found());
    }

    #[test]
    fn construction_delegates_to_cause() {
        let err = ApiError::Construction(Box::new(ApiError::HttpStatus {
            status: 401,
            endpoint: "user".to_string(),
            body: "denied".to_string(),
        }));
        assert_eq!(err.http_code(), Some(401));
        assert_eq!(err.endpoint(), Some("user"));
        assert_eq!(err.error_data(), Some("denied"));
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("failed to resolve user id"));
    }

    #[test]
    fn local_failures_have_no_status() {
        assert_eq!(ApiError::config("missing token").http_code(), None);
        assert_eq!(ApiError::invalid_parameter("range").endpoint(), None);
        assert_eq!(ApiError::Serialization("bad".into()).message(), "bad");
    }
}
