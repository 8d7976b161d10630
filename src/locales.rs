//! The shop's locale registry.
//!
//! [`Locales`] caches the shop's default locale and the set of supported
//! locales. Both are loaded lazily from the `locales` resource on first
//! access and served from memory afterwards. The registry carries no TTL:
//! it is only invalidated by an explicit [`reset`](Locales::reset), after
//! which the next read re-fetches.
//!
//! A failed load leaves the registry empty rather than stale, so every
//! getter keeps re-attempting one fetch per call while the backend stays
//! silent. Callers are expected to cache results upstream.

use std::sync::Arc;

use crate::clients::{Method, Transport};
use crate::config::LocaleTag;
use serde_json::Value;
use tokio::sync::Mutex;

/// The REST path for localizations.
const REST_PATH: &str = "locales";

#[derive(Debug, Default)]
struct State {
    default: Option<LocaleTag>,
    items: Vec<LocaleTag>,
}

/// Cache of the shop's default and supported locales.
///
/// Share one instance per shop via `Arc`; everything that resolves a
/// default locale (localized field caches, product search) borrows it.
/// All state sits behind a single async mutex held across the fetch, so
/// concurrent readers of an empty registry coalesce into one remote call.
///
/// # Example
///
/// ```rust
/// use epages_api::Locales;
/// use epages_api::clients::{Method, MockTransport};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # async fn run() {
/// let mock = Arc::new(MockTransport::new());
/// mock.stub(Method::Get, "locales", json!({"default": "en_GB", "items": ["en_GB", "de_DE"]}));
///
/// let locales = Locales::new(Arc::clone(&mock));
/// let default = locales.default_locale().await.unwrap();
/// assert_eq!(default.as_ref(), "en_GB");
/// # }
/// ```
#[derive(Debug)]
pub struct Locales<T> {
    transport: Arc<T>,
    state: Mutex<State>,
}

impl<T: Transport> Locales<T> {
    /// Creates an empty registry backed by the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            state: Mutex::new(State::default()),
        }
    }

    /// Returns the shop's default locale.
    ///
    /// Triggers one load when the cache is empty; returns whatever is
    /// cached afterwards, which is still `None` if the load failed.
    pub async fn default_locale(&self) -> Option<LocaleTag> {
        let mut state = self.state.lock().await;
        if state.default.is_none() {
            self.load(&mut state).await;
        }
        state.default.clone()
    }

    /// Returns the supported locales of the shop.
    ///
    /// Same lazy pattern as [`default_locale`](Self::default_locale);
    /// `None` means the service has not answered usably yet.
    pub async fn items(&self) -> Option<Vec<LocaleTag>> {
        let mut state = self.state.lock().await;
        if state.items.is_empty() {
            self.load(&mut state).await;
        }
        if state.items.is_empty() {
            None
        } else {
            Some(state.items.clone())
        }
    }

    /// Clears the cached default and locale set unconditionally.
    ///
    /// The next read after a reset re-fetches from the backend.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.default = None;
        state.items.clear();
    }

    /// Loads default and supported locales from the backend.
    ///
    /// A refused verb or a failed call leaves the cache untouched. A
    /// response missing the `default` or `items` field is a contract
    /// mismatch and is logged as an error. Only a fully interpretable
    /// response replaces the cached state.
    async fn load(&self, state: &mut State) {
        if !self.transport.allows(Method::Get) {
            return;
        }

        let Ok(content) = self.transport.send(Method::Get, REST_PATH, None).await else {
            return;
        };

        let (Some(default), Some(items)) = (content.get("default"), content.get("items")) else {
            tracing::error!("response for {REST_PATH} can not be interpreted");
            return;
        };

        state.default = default.as_str().and_then(|tag| LocaleTag::new(tag).ok());
        state.items = parse_items(items);
    }
}

/// Parses the `items` array, skipping entries that are not locale tags.
fn parse_items(items: &Value) -> Vec<LocaleTag> {
    items
        .as_array()
        .map(|array| {
            array
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|tag| LocaleTag::new(tag).ok())
                .collect()
        })
        .unwrap_or_default()
}
