//! The reqwest-backed transport.
//!
//! [`RestTransport`] speaks JSON over HTTPS to an ePages shop backend. It is
//! deliberately thin: one request per call, no retries, no pagination. All
//! staleness and failure semantics live in the caches that consume it.

use std::collections::HashSet;

use crate::clients::{Method, Transport, TransportError};
use crate::config::{LocaleTag, ShopConfig};
use serde_json::Value;

/// Client version from Cargo.toml, sent in the User-Agent header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport for an ePages shop.
///
/// The transport handles:
/// - Base URI construction from the configured host and shop name
/// - Default headers including User-Agent and the bearer token
/// - Locale scoping via the `locale` query parameter
/// - A configurable allowed-verb set; refused verbs fail before any
///   network activity
///
/// # Thread Safety
///
/// `RestTransport` is `Send + Sync`, making it safe to share across async
/// tasks behind an `Arc`.
///
/// # Example
///
/// ```rust,no_run
/// use epages_api::{Host, ShopConfig};
/// use epages_api::clients::{Method, RestTransport, Transport};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ShopConfig::builder()
///     .host(Host::new("shop.example.com")?)
///     .shop_name("DemoShop")
///     .build()?;
///
/// let transport = RestTransport::new(&config);
/// let locales = transport.send(Method::Get, "locales", None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RestTransport {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI up to and including the shop segment.
    base_uri: String,
    /// Bearer token, if configured.
    auth_token: Option<String>,
    /// The verbs this transport permits.
    allowed_methods: HashSet<Method>,
}

// Verify RestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestTransport>();
};

impl RestTransport {
    /// Creates a transport for the configured shop, permitting all verbs.
    ///
    /// The base URI is `https://{host}/rs/shops/{shop_name}`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &ShopConfig) -> Self {
        let base_uri = format!(
            "https://{}/rs/shops/{}",
            config.host().as_ref(),
            config.shop_name()
        );
        Self::with_base_uri(base_uri, config)
    }

    /// Creates a transport with an explicit base URI.
    ///
    /// Useful for proxy setups and for pointing the transport at a local
    /// test server. The URI must include scheme, host and the shop segment.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn with_base_uri(base_uri: impl Into<String>, config: &ShopConfig) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri: base_uri.into().trim_end_matches('/').to_string(),
            auth_token: config.auth_token().map(ToString::to_string),
            allowed_methods: [Method::Get, Method::Post, Method::Put, Method::Delete].into(),
        }
    }

    /// Restricts the transport to the given verbs.
    ///
    /// Calls using any other verb fail with
    /// [`TransportError::MethodNotAllowed`] before any network activity.
    #[must_use]
    pub fn with_allowed_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.allowed_methods = methods.into_iter().collect();
        self
    }

    /// Returns the base URI for this transport.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        locale: Option<&LocaleTag>,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        if !self.allows(method) {
            return Err(TransportError::MethodNotAllowed { method });
        }

        let url = format!("{}/{}", self.base_uri, path.trim_start_matches('/'));

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        builder = builder
            .header("Accept", "application/json")
            .header("User-Agent", format!("epages-api-rust v{CLIENT_VERSION}"));

        if let Some(token) = &self.auth_token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        if let Some(locale) = locale {
            builder = builder.query(&[("locale", locale.as_ref())]);
        }

        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let code = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        if !(200..300).contains(&code) {
            return Err(TransportError::Http {
                code,
                message: text,
            });
        }

        if text.is_empty() {
            return Err(TransportError::EmptyResponse);
        }

        serde_json::from_str(&text).map_err(|_| TransportError::EmptyResponse)
    }
}

impl Transport for RestTransport {
    fn allows(&self, method: Method) -> bool {
        self.allowed_methods.contains(&method)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.request(method, path, None, body).await
    }

    async fn send_localized(
        &self,
        method: Method,
        path: &str,
        locale: &LocaleTag,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.request(method, path, Some(locale), body).await
    }
}
