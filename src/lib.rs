//! # ePages API Rust Client
//!
//! A Rust client for the ePages shop REST API, providing type-safe
//! configuration and lazily populated, TTL-guarded views of a shop's
//! locale-aware resources.
//!
//! ## Overview
//!
//! This client provides:
//! - Type-safe configuration via [`ShopConfig`] and [`ShopConfigBuilder`]
//! - Validated newtypes for locale tags, currency codes, hosts and product ids
//! - A lazily loaded locale registry via [`Locales`]
//! - Locale-keyed caches of localized text fields via [`LocalizedInformation`]
//! - Product search with validated criteria via [`ProductFilter`]
//! - Per-product sub-resource caches (attributes, stock level, slideshow)
//!   via [`Product`]
//! - An async REST transport with a pluggable seam for tests via
//!   [`clients::Transport`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use epages_api::{Host, Locales, ProductFilter, ShopConfig};
//! use epages_api::clients::RestTransport;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // Create configuration using the builder pattern
//! let config = ShopConfig::builder()
//!     .host(Host::new("shop.example.com")?)
//!     .shop_name("DemoShop")
//!     .auth_token("your-token")
//!     .build()?;
//!
//! let transport = Arc::new(RestTransport::new(&config));
//! let locales = Arc::new(Locales::new(Arc::clone(&transport)));
//!
//! // Search for products in the shop's default locale
//! let mut filter = ProductFilter::new(
//!     Arc::clone(&transport),
//!     Arc::clone(&locales),
//!     config.response_wait_window(),
//! );
//! filter.set_q("shoe");
//!
//! if let Some(products) = filter.products().await {
//!     for product in &products {
//!         println!("{}: {:?}", product.id(), product.name());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Model
//!
//! The public surface never panics and never surfaces transport errors.
//! Getters answer `Option` (absent means "nothing usable cached yet"),
//! mutators answer `bool` (whether the update was accepted). Nothing is
//! retried automatically; a getter whose cache is empty or expired simply
//! re-attempts its fetch on the next call. Malformed responses are logged
//! as errors, rejected input as warnings, both via [`tracing`].
//!
//! ## Design Principles
//!
//! - **No global state**: Every cache is an owned object shared via `Arc`
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`; each cache serializes
//!   its readers behind one async mutex, so concurrent reads of a stale
//!   value coalesce into a single remote call
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod cache;
pub mod clients;
pub mod config;
pub mod error;
pub mod information;
pub mod locales;
pub mod product;
pub mod shopobjects;
pub mod validator;

// Re-export public types at crate root for convenience
pub use config::{
    CurrencyCode, Host, LocaleTag, ProductId, ShopConfig, ShopConfigBuilder,
    DEFAULT_RESPONSE_WAIT_WINDOW,
};
pub use error::ConfigError;
pub use information::{LocalizedInformation, TextField};
pub use locales::Locales;
pub use product::{Product, ProductAttribute, ProductFilter, ProductSlideshow};
pub use shopobjects::{Image, Price, PriceWithQuantity, Quantity, TaxType};
