//! Transport-level error types.
//!
//! This module contains the error type returned by [`Transport`] call sites.
//! The core never surfaces these errors to callers directly: public getters
//! collapse every failure to a neutral "no value" outcome. The variants exist
//! so internal fetch paths and tests can tell a refused verb from an empty
//! body from a contract mismatch.
//!
//! [`Transport`]: crate::clients::Transport

use crate::clients::transport::Method;
use thiserror::Error;

/// Error returned by a transport call.
///
/// # Example
///
/// ```rust
/// use epages_api::clients::{Method, TransportError};
///
/// let error = TransportError::MethodNotAllowed { method: Method::Put };
/// assert!(error.to_string().contains("PUT"));
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport refuses to perform the requested HTTP verb.
    ///
    /// Call sites check [`Transport::allows`](crate::clients::Transport::allows)
    /// first and abort without side effects when the verb is refused.
    #[error("Request method {method} is not allowed by this transport")]
    MethodNotAllowed {
        /// The refused method.
        method: Method,
    },

    /// The server returned nothing usable (no body, or a body that is not
    /// valid JSON).
    #[error("Empty or undecodable response")]
    EmptyResponse,

    /// The server answered with a non-success status code.
    #[error("HTTP {code}: {message}")]
    Http {
        /// The HTTP status code of the response.
        code: u16,
        /// The raw response body, for logging.
        message: String,
    },

    /// A network-level error occurred before a response was received.
    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

// Verify TransportError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
};
