//! The transport abstraction consumed by every shop object.
//!
//! The core of this crate (locale registry, localized field caches, product
//! sub-resource caches, product search) never talks to the network directly.
//! It consumes the [`Transport`] trait: one remote call per invocation,
//! optionally scoped by a locale and/or carrying a JSON payload, resolving to
//! a decoded response map or a [`TransportError`].
//!
//! Two implementations ship with the crate:
//!
//! - [`RestTransport`](crate::clients::RestTransport): the reqwest-backed
//!   transport speaking to a real shop backend
//! - [`MockTransport`](crate::clients::MockTransport): a deterministic
//!   in-memory double for tests
//!
//! # Verb gating
//!
//! A transport may refuse to perform a verb ([`Transport::allows`] returns
//! `false`). Call sites check the gate before doing anything else and abort
//! the whole operation without side effects when refused.

use crate::clients::TransportError;
use crate::config::LocaleTag;
use serde_json::Value;
use std::fmt;

/// Supported HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// HTTP GET - retrieve a resource.
    Get,
    /// HTTP POST - create a resource.
    Post,
    /// HTTP PUT - update a resource.
    Put,
    /// HTTP DELETE - remove a resource.
    Delete,
}

impl Method {
    /// Returns the method as an uppercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collaborator performing one remote call per invocation.
///
/// Implementations must be cheap to share (`&self` methods, `Send + Sync`);
/// shop objects hold the transport behind an [`Arc`](std::sync::Arc) for
/// their full lifetime.
///
/// Every call resolves to either a usable decoded payload or an error; there
/// is no intermediate or partial result.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Returns `true` if this transport permits the given verb.
    fn allows(&self, method: Method) -> bool;

    /// Performs one remote call against a resource path.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the verb is refused, the call fails,
    /// or the response carries no usable payload.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError>;

    /// Performs one remote call scoped by a locale.
    ///
    /// # Errors
    ///
    /// Same contract as [`Transport::send`].
    async fn send_localized(
        &self,
        method: Method,
        path: &str,
        locale: &LocaleTag,
        body: Option<Value>,
    ) -> Result<Value, TransportError>;
}
