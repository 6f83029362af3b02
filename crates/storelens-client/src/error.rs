use storelens_core::ContractError;
use thiserror::Error;

/// Errors returned by [`InsightsClient`](crate::InsightsClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or no response arrived (DNS, connect,
    /// TLS, timeout, or a body that could not be read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// A 2xx body did not match the expected contract shape.
    #[error("invalid response for {context}: {source}")]
    Validation {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The caller passed an argument the client refuses to send.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// Returns `true` if the request was abandoned because a timeout elapsed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Network(e) if e.is_timeout())
    }

    /// HTTP status of a non-2xx response, if this error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ContractError> for ClientError {
    fn from(err: ContractError) -> Self {
        ClientError::Validation {
            context: err.context,
            source: err.source,
        }
    }
}
