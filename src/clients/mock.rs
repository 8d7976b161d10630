//! A deterministic in-memory transport for tests.
//!
//! [`MockTransport`] answers calls from a stubbed route table, records every
//! call it receives, and can refuse individual verbs. It exists so cache
//! behavior (single fetch per miss, TTL-driven refresh, no-op on refused
//! verbs) can be asserted without a network.
//!
//! # Example
//!
//! ```rust
//! use epages_api::clients::{Method, MockTransport, Transport};
//! use serde_json::json;
//!
//! # async fn run() {
//! let mock = MockTransport::new();
//! mock.stub(Method::Get, "locales", json!({"default": "en_GB", "items": ["en_GB"]}));
//!
//! let response = mock.send(Method::Get, "locales", None).await.unwrap();
//! assert_eq!(response["default"], "en_GB");
//! assert_eq!(mock.call_count(Method::Get, "locales"), 1);
//! # }
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::clients::{Method, Transport, TransportError};
use crate::config::LocaleTag;
use serde_json::Value;

/// One call received by a [`MockTransport`].
#[derive(Clone, Debug)]
pub struct RecordedCall {
    /// The HTTP verb of the call.
    pub method: Method,
    /// The resource path of the call.
    pub path: String,
    /// The locale scope, if the call was localized.
    pub locale: Option<LocaleTag>,
    /// The JSON payload, if one was sent.
    pub body: Option<Value>,
}

/// An in-memory [`Transport`] double with a stubbed route table.
///
/// Unstubbed routes answer with [`TransportError::EmptyResponse`], the same
/// outcome a silent backend produces. All state lives behind mutexes, so a
/// single instance can be shared via `Arc` and re-stubbed mid-test.
///
/// # Panics
///
/// Methods panic if another thread panicked while holding an internal lock.
/// This is acceptable in the test contexts the type is built for.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Value>>,
    denied: Mutex<HashSet<Method>>,
    calls: Mutex<Vec<RecordedCall>>,
}

// Verify MockTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MockTransport>();
};

impl MockTransport {
    /// Creates a mock with no stubs that permits all verbs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stubs a route. Later stubs for the same route replace earlier ones.
    pub fn stub(&self, method: Method, path: impl Into<String>, response: Value) {
        self.routes
            .lock()
            .expect("mock transport lock poisoned")
            .insert((method, path.into()), response);
    }

    /// Removes a stub, making the route answer with an empty response again.
    pub fn unstub(&self, method: Method, path: &str) {
        self.routes
            .lock()
            .expect("mock transport lock poisoned")
            .remove(&(method, path.to_string()));
    }

    /// Refuses a verb from now on.
    pub fn deny(&self, method: Method) {
        self.denied
            .lock()
            .expect("mock transport lock poisoned")
            .insert(method);
    }

    /// Permits a previously refused verb again.
    pub fn allow(&self, method: Method) {
        self.denied
            .lock()
            .expect("mock transport lock poisoned")
            .remove(&method);
    }

    /// Returns a snapshot of every call received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .expect("mock transport lock poisoned")
            .clone()
    }

    /// Returns how many calls hit the given route.
    #[must_use]
    pub fn call_count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .expect("mock transport lock poisoned")
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    fn record_and_answer(
        &self,
        method: Method,
        path: &str,
        locale: Option<&LocaleTag>,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        if !self.allows(method) {
            return Err(TransportError::MethodNotAllowed { method });
        }

        self.calls
            .lock()
            .expect("mock transport lock poisoned")
            .push(RecordedCall {
                method,
                path: path.to_string(),
                locale: locale.cloned(),
                body,
            });

        self.routes
            .lock()
            .expect("mock transport lock poisoned")
            .get(&(method, path.to_string()))
            .cloned()
            .ok_or(TransportError::EmptyResponse)
    }
}

impl Transport for MockTransport {
    fn allows(&self, method: Method) -> bool {
        !self
            .denied
            .lock()
            .expect("mock transport lock poisoned")
            .contains(&method)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.record_and_answer(method, path, None, body)
    }

    async fn send_localized(
        &self,
        method: Method,
        path: &str,
        locale: &LocaleTag,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.record_and_answer(method, path, Some(locale), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_stubbed_route_answers_with_response() {
        let mock = MockTransport::new();
        mock.stub(Method::Get, "locales", json!({"default": "en_GB"}));

        let response = mock.send(Method::Get, "locales", None).await.unwrap();
        assert_eq!(response["default"], "en_GB");
    }

    #[tokio::test]
    async fn test_unstubbed_route_answers_empty() {
        let mock = MockTransport::new();
        let result = mock.send(Method::Get, "missing", None).await;
        assert!(matches!(result, Err(TransportError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_denied_verb_is_refused_and_not_recorded() {
        let mock = MockTransport::new();
        mock.stub(Method::Put, "products/1/stock-level", json!({"stocklevel": 5}));
        mock.deny(Method::Put);

        assert!(!mock.allows(Method::Put));
        let result = mock
            .send(Method::Put, "products/1/stock-level", None)
            .await;
        assert!(matches!(
            result,
            Err(TransportError::MethodNotAllowed { method: Method::Put })
        ));
        assert_eq!(mock.call_count(Method::Put, "products/1/stock-level"), 0);
    }

    #[tokio::test]
    async fn test_calls_are_recorded_with_locale_and_body() {
        let mock = MockTransport::new();
        let locale = LocaleTag::new("de_DE").unwrap();
        mock.stub(Method::Put, "resource", json!({"name": "Neu"}));

        mock.send_localized(
            Method::Put,
            "resource",
            &locale,
            Some(json!({"name": "Neu"})),
        )
        .await
        .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].locale.as_ref().map(AsRef::as_ref), Some("de_DE"));
        assert_eq!(calls[0].body.as_ref().unwrap()["name"], "Neu");
    }

    #[tokio::test]
    async fn test_allow_reinstates_a_denied_verb() {
        let mock = MockTransport::new();
        mock.deny(Method::Get);
        mock.allow(Method::Get);
        assert!(mock.allows(Method::Get));
    }
}
