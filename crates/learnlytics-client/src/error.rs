//! Client-side error types.
//!
//! The split matters for display: messages the service itself produced pass
//! through verbatim, while anything the transport could not complete
//! collapses into a generic connectivity message.

use thiserror::Error;

/// Errors from talking to the prediction service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service rejected the request and said why (`{error}` body).
    #[error("{0}")]
    Service(String),

    /// Non-2xx with no parseable error body.
    #[error("service returned HTTP {status}")]
    Api { status: u16 },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The service could not be reached at all.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx response whose body did not conform to the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Whether the service itself produced a message worth showing as-is.
    pub fn is_service(&self) -> bool {
        matches!(self, ClientError::Service(_))
    }

    /// Message suitable for the user. Service-provided text passes through
    /// verbatim; transport failures collapse to a connectivity message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Service(message) => message.clone(),
            _ => "could not reach the prediction service; check that it is running".to_string(),
        }
    }
}
