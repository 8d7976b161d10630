//! Configuration types for the ePages API client.
//!
//! This module provides [`ShopConfig`] and its builder for configuring the
//! connection to a shop: the host serving the REST API, the shop's path
//! segment, an optional authentication token, and the cache expiry window
//! shared by all TTL-guarded remote values.
//!
//! # Example
//!
//! ```rust
//! use epages_api::{Host, ShopConfig};
//! use std::time::Duration;
//!
//! let config = ShopConfig::builder()
//!     .host(Host::new("shop.example.com").unwrap())
//!     .shop_name("DemoShop")
//!     .auth_token("secret-token")
//!     .response_wait_window(Duration::from_secs(300))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop_name(), "DemoShop");
//! ```

mod newtypes;

pub use newtypes::{CurrencyCode, Host, LocaleTag, ProductId};

use crate::error::ConfigError;
use std::time::Duration;

/// Default expiry window for TTL-guarded remote values (ten minutes).
///
/// Every cached sub-resource (product attributes, stock levels) is considered
/// stale this long after its last successful fetch. One window is shared by
/// all caches; it can be overridden via
/// [`ShopConfigBuilder::response_wait_window`].
pub const DEFAULT_RESPONSE_WAIT_WINDOW: Duration = Duration::from_millis(600_000);

/// Configuration for connecting to an ePages shop.
///
/// Configuration is instance-based and passed explicitly; there is no global
/// state. Create instances with [`ShopConfig::builder`].
#[derive(Clone, Debug)]
pub struct ShopConfig {
    host: Host,
    shop_name: String,
    auth_token: Option<String>,
    response_wait_window: Duration,
}

impl ShopConfig {
    /// Returns a new [`ShopConfigBuilder`].
    #[must_use]
    pub fn builder() -> ShopConfigBuilder {
        ShopConfigBuilder::default()
    }

    /// Returns the shop host.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the shop's path segment.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    /// Returns the authentication token, if one is configured.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Returns the expiry window for TTL-guarded remote values.
    #[must_use]
    pub const fn response_wait_window(&self) -> Duration {
        self.response_wait_window
    }
}

/// Builder for [`ShopConfig`].
///
/// `host` and `shop_name` are required; everything else has a default.
#[derive(Clone, Debug, Default)]
pub struct ShopConfigBuilder {
    host: Option<Host>,
    shop_name: Option<String>,
    auth_token: Option<String>,
    response_wait_window: Option<Duration>,
}

impl ShopConfigBuilder {
    /// Sets the shop host.
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the shop's path segment (e.g. `DemoShop`).
    #[must_use]
    pub fn shop_name(mut self, shop_name: impl Into<String>) -> Self {
        self.shop_name = Some(shop_name.into());
        self
    }

    /// Sets the authentication token sent as a bearer header.
    #[must_use]
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Overrides the expiry window for TTL-guarded remote values.
    #[must_use]
    pub const fn response_wait_window(mut self, window: Duration) -> Self {
        self.response_wait_window = Some(window);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `host` or `shop_name`
    /// is unset, and [`ConfigError::EmptyShopName`] if the shop name is
    /// empty.
    pub fn build(self) -> Result<ShopConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;
        let shop_name = self
            .shop_name
            .ok_or(ConfigError::MissingRequiredField { field: "shop_name" })?;

        if shop_name.is_empty() {
            return Err(ConfigError::EmptyShopName);
        }

        Ok(ShopConfig {
            host,
            shop_name,
            auth_token: self.auth_token,
            response_wait_window: self
                .response_wait_window
                .unwrap_or(DEFAULT_RESPONSE_WAIT_WINDOW),
        })
    }
}
