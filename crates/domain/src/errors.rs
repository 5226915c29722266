//! Error types used throughout the client
//!
//! Failures fall into four families: local validation, transport, remote
//! application errors (decoded error envelopes) and JSON decode failures.

use std::error::Error as StdError;

use thiserror::Error;

use crate::impl_domain_status_conversions;
use crate::types::ApiErrorBody;

/// Coarse classification of a transport-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request did not complete within the configured timeout
    Timeout,
    /// DNS, TCP or TLS connection could not be established
    Connect,
    /// The request could not be sent
    Request,
    /// The response body could not be read
    Body,
    /// The request could not be built (bad URL, bad header)
    Builder,
    /// Anything else reported by the HTTP stack
    Other,
}

impl_domain_status_conversions!(TransportErrorKind {
    Timeout => "timeout",
    Connect => "connect",
    Request => "request",
    Body => "body",
    Builder => "builder",
    Other => "other",
});

impl TransportErrorKind {
    /// Whether a failure of this kind is worth another attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connect | Self::Request)
    }
}

/// Transport failure reported by the HTTP adapter
///
/// The underlying client error is kept as the `source()` so callers can
/// inspect it without the adapter having to flatten it into a string.
#[derive(Debug, Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), source: None }
    }

    /// Attach the originating error
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// Main error type for the Easemob client
#[derive(Debug, Error)]
pub enum EasemobError {
    /// Local validation failed; no request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// DNS/TLS/timeout/connection failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-200 response decoded as an error envelope
    #[error("{}", .body.error_description)]
    Api { status: u16, body: ApiErrorBody },

    /// Malformed JSON in a success or error body
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EasemobError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Decoded error envelope, when the server answered with one
    pub fn api_error(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// HTTP status of an application error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, EasemobError>;
