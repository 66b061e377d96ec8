use std::error::Error as StdError;

use crate::domain::{ConnectorStatus, ValidationError};

#[derive(Debug, thiserror::Error)]
/// Errors returned by the connector and by [`crate::WerbelokalClient`].
///
/// [`ConnectorError::Provider`] displays the gateway's own message unchanged so the host
/// can show it to the user as-is.
pub enum ConnectorError {
    /// The gateway answered with an empty body (or not at all).
    #[error("service unreachable")]
    ServiceUnavailable,

    /// The gateway rejected the request; holds the first line of its reply.
    #[error("{0}")]
    Provider(String),

    /// Preferences do not allow issuing requests yet.
    #[error("connector is not ready: {status:?}")]
    NotReady { status: ConnectorStatus },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// A configured endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}
