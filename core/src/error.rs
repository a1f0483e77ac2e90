use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// The error type for pritunl operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    body: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Credentials are missing or malformed
    CredentialInvalid,

    /// Configuration or input error detected before any I/O
    /// (malformed address, conflicting body options, missing fields).
    ConfigInvalid,

    /// Connection, TLS or other transport failure.
    Transport,

    /// The call deadline elapsed before the request completed.
    Timeout,

    /// The call was cancelled by its cancellation token.
    Cancelled,

    /// The server answered with a status outside the accepted set.
    UnexpectedStatus,

    /// The response body could not be read or decoded.
    Decode,

    /// The response decoded fine but its content is not what we expected.
    UnexpectedContent,

    /// A well-known object the caller relies on does not exist.
    NotFound,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status returned by the server, set for [`ErrorKind::UnexpectedStatus`].
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Response body text returned by the server, set for [`ErrorKind::UnexpectedStatus`].
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Check if this error was raised before any request was sent.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ConfigInvalid | ErrorKind::CredentialInvalid
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create a cancelled error
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    /// Create an unexpected status error carrying the status and body text.
    pub fn unexpected_status(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        let mut err = Self::new(
            ErrorKind::UnexpectedStatus,
            format!("resp status code is: {}, resp body: {}", status.as_u16(), body),
        );
        err.status = Some(status);
        err.body = Some(body);
        err
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create an unexpected content error
    pub fn unexpected_content(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedContent, message)
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Timeout => write!(f, "deadline exceeded"),
            ErrorKind::Cancelled => write!(f, "cancelled"),
            ErrorKind::UnexpectedStatus => write!(f, "unexpected status"),
            ErrorKind::Decode => write!(f, "decode error"),
            ErrorKind::UnexpectedContent => write!(f, "unexpected content"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::config_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::config_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::config_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::decode(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
