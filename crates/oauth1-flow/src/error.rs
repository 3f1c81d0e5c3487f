//! Error types for the login flow.

use std::fmt;

use oauth1_core::RequestError;

/// Leg of the handshake an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Temporary credential request.
    RequestToken,
    /// Access token exchange.
    AccessToken,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestToken => f.write_str("request token"),
            Self::AccessToken => f.write_str("access token"),
        }
    }
}

/// Failure talking to the provider over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network error, timeout, TLS failure.
    #[error("HTTP request failed")]
    Http(#[from] ureq::Error),

    /// Request could not be expressed as HTTP (bad method, URI or header).
    #[error("invalid HTTP request: {0}")]
    InvalidRequest(String),

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Error from the three-legged flow.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FlowError {
    /// Provider answered with a status other than 200.
    #[error("{stage} failed ({status}): {body}")]
    ProviderStatus {
        /// Leg that failed.
        stage: Stage,
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Provider response lacked a required parameter.
    #[error("{stage} response missing parameter: {name}")]
    MissingParameter {
        /// Leg that failed.
        stage: Stage,
        /// Parameter name.
        name: &'static str,
    },

    /// Callback carried a token that was never issued (or already forgotten).
    #[error("unknown OAuth token: {0}")]
    UnknownToken(String),

    /// Transport failure while talking to the provider.
    #[error("transport error")]
    Transport(#[from] TransportError),

    /// Token store or handler I/O failure.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Flow configuration produced an invalid request.
    #[error("invalid request")]
    Request(#[from] RequestError),
}

impl FlowError {
    /// True for failures attributable to the provider's response.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::ProviderStatus { .. } | Self::MissingParameter { .. }
        )
    }

    /// True when the callback token is unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownToken(_))
    }
}
