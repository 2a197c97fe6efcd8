//! Error taxonomy of the adapter.
//!
//! Three kinds of failure exist at this boundary:
//!
//! - [`ConfigError`] — raised synchronously while building a handler;
//!   fatal, no handler is produced.
//! - [`HttpQueryError`] — the recognized query failure from the execution
//!   engine; always translated into an HTTP response.
//! - [`ExecuteError::Internal`] — anything else from the engine; propagated
//!   to the platform untranslated so its generic failure handling applies.

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use thiserror::Error;

/// Handler construction failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No options source was supplied.
    #[error("options required")]
    MissingOptions,
    /// More than one options source was supplied.
    #[error("expected exactly one options source, got {0}")]
    ConflictingOptions(usize),
}

/// Recognized query failure from the execution engine.
///
/// Carries the full response shape: the bridge adopts status, headers and
/// message verbatim. Represents an expected problem with the operation
/// itself (syntax error, validation error, unsupported method), never an
/// internal fault.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpQueryError {
    /// Status code of the translated response.
    pub status: StatusCode,
    /// Headers of the translated response.
    pub headers: HeaderMap,
    /// Body of the translated response.
    pub message: String,
}

impl HttpQueryError {
    /// Create a recognized failure with the given status and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            message: message.into(),
        }
    }

    /// A `400 Bad Request` failure.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// A `405 Method Not Allowed` failure.
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
    }

    /// Attach a response header. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }
}

/// Outcome of delegating to the execution engine, failure side.
///
/// The discriminant replaces name-string comparison on an ad-hoc error
/// shape: the bridge pattern-matches on the variant.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// Expected, data-carrying failure — translated into a response.
    #[error(transparent)]
    Query(#[from] HttpQueryError),
    /// Unexpected failure — propagated to the platform untranslated.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
