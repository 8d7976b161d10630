//! Transport types for shop backend communication.
//!
//! This module provides the thin REST plumbing the shop object caches sit
//! on top of. The main types are:
//!
//! - [`Transport`]: the one-call-per-invocation collaborator trait
//! - [`Method`]: supported HTTP verbs (GET, POST, PUT, DELETE)
//! - [`TransportError`]: what a single call can fail with
//! - [`RestTransport`]: the reqwest-backed implementation
//! - [`MockTransport`]: a deterministic in-memory double for tests
//!
//! There is no retry logic anywhere in this module; every retry in the crate
//! is implicit in a cache getter re-attempting its fetch on the next call.

mod errors;
mod mock;
mod rest;
mod transport;

pub use errors::TransportError;
pub use mock::{MockTransport, RecordedCall};
pub use rest::{RestTransport, CLIENT_VERSION};
pub use transport::{Method, Transport};
