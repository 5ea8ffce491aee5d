//! Client error types.
//!
//! Every variant is fatal to the run. A non-success status on a per-node call
//! is not an error at this layer: it comes back as a [`crate::Reply`] and the
//! caller decides whether it is recoverable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("unable to reach {endpoint}: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    /// The request body could not be encoded.
    #[error("unable to encode {endpoint} request: {source}")]
    Encode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A success response did not match the expected shape.
    #[error("unable to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered a call that must succeed with a non-success status.
    #[error("API error ({status}) from {endpoint}: {message}")]
    Api {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    /// The token is not a valid header value.
    #[error("stored token cannot be sent as an Authorization header")]
    InvalidToken,

    /// Login succeeded but the reply carried no token.
    #[error("login response did not contain a token")]
    MissingToken,
}
