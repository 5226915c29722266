//! Conversions from external infrastructure errors into domain errors.

use easemob_domain::{EasemobError, TransportError, TransportErrorKind};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TransportError);

impl From<InfraError> for TransportError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<InfraError> for EasemobError {
    fn from(value: InfraError) -> Self {
        EasemobError::Transport(value.0)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTransportError {
    fn into_transport(self) -> TransportError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

fn classify(err: &HttpError) -> TransportErrorKind {
    if err.is_timeout() {
        return TransportErrorKind::Timeout;
    }

    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return TransportErrorKind::Connect;
    }

    if err.is_builder() {
        TransportErrorKind::Builder
    } else if err.is_body() || err.is_decode() {
        TransportErrorKind::Body
    } else if err.is_request() {
        TransportErrorKind::Request
    } else {
        TransportErrorKind::Other
    }
}

impl IntoTransportError for HttpError {
    fn into_transport(self) -> TransportError {
        let kind = classify(&self);
        let message = match kind {
            TransportErrorKind::Timeout => "HTTP request timed out".to_string(),
            TransportErrorKind::Connect => "HTTP connection failure".to_string(),
            _ => self.to_string(),
        };
        TransportError::new(kind, message).with_source(self)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_transport())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
