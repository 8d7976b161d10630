//! Error types for the ePages API client.
//!
//! This module contains error types used throughout the client for
//! configuration and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use epages_api::{LocaleTag, ConfigError};
//!
//! let result = LocaleTag::new("english");
//! assert!(matches!(result, Err(ConfigError::InvalidLocaleTag { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Locale tag is invalid.
    #[error("Invalid locale tag '{tag}'. Expected format: 'language_REGION' (e.g., 'en_US').")]
    InvalidLocaleTag {
        /// The invalid tag that was provided.
        tag: String,
    },

    /// Currency code is invalid.
    #[error("Invalid currency code '{code}'. Expected a three-letter ISO 4217 code (e.g., 'EUR').")]
    InvalidCurrencyCode {
        /// The invalid code that was provided.
        code: String,
    },

    /// Host URL is invalid.
    #[error("Invalid host '{host}'. Please provide a hostname such as 'shop.example.com'.")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Product id cannot be empty.
    #[error("Product id cannot be empty. Please provide a valid product id.")]
    EmptyProductId,

    /// Shop name cannot be empty.
    #[error("Shop name cannot be empty. Please provide the shop path segment of your store.")]
    EmptyShopName,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
