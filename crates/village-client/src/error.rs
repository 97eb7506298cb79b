//! Structured error handling for API operations.

use reqwest::StatusCode;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while talking to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The backend rejected the request payload or parameters.
    InvalidInput,
    /// No response was received.
    NetworkError,
    /// The session could not be authenticated, even after a refresh.
    Authentication,
    /// The authenticated user may not perform the operation.
    Authorization,
    /// Rate limit exceeded.
    RateLimited,
    /// Backend temporarily unavailable.
    ServiceUnavailable,
    /// Backend failed while handling the request.
    ExternalError,
    /// Client configuration is invalid.
    Configuration,
    /// Resource not found.
    NotFound,
    /// Timeout occurred.
    Timeout,
    /// Request or response body could not be (de)serialized.
    Serialization,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Check if this error kind is typically retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::ServiceUnavailable | Self::RateLimited
        )
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => Self::Authentication,
            403 => Self::Authorization,
            404 => Self::NotFound,
            408 => Self::Timeout,
            429 => Self::RateLimited,
            502..=504 => Self::ServiceUnavailable,
            400..=499 => Self::InvalidInput,
            500..=599 => Self::ExternalError,
            _ => Self::Unknown,
        }
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}{}",
    status.as_ref().map(|s| format!(" HTTP {s}")).unwrap_or_default(),
    message.as_ref().map(|m| format!(": {m}")).unwrap_or_default()
)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// HTTP status returned by the backend, if a response was received.
    pub status: Option<u16>,
    /// Primary error message.
    pub message: Option<String>,
    /// Raw JSON error body, kept for field-level feedback.
    pub body: Option<serde_json::Value>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            status: None,
            message: None,
            body: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// Creates a new authentication error.
    pub fn authentication() -> Self {
        Self::new(ErrorKind::Authentication)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Records the HTTP status that produced this error.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status.as_u16());
        self
    }

    /// Attaches the decoded error body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the error kind.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error is retryable based on its kind.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if the session is gone and the user must log in again.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::timeout()
                .with_message(err.to_string())
                .with_source(err)
        } else if err.is_connect() {
            Error::network_error()
                .with_message("Connection failed")
                .with_source(err)
        } else if err.is_decode() {
            Error::serialization()
                .with_message(err.to_string())
                .with_source(err)
        } else if err.is_builder() {
            Error::configuration()
                .with_message(err.to_string())
                .with_source(err)
        } else {
            Error::network_error()
                .with_message(err.to_string())
                .with_source(err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization()
            .with_message(err.to_string())
            .with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration()
            .with_message(format!("invalid URL: {err}"))
            .with_source(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::from_source(ErrorKind::Unknown, error).with_message("I/O operation failed")
    }
}
