//! Validated newtype wrappers for shop values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear
//! error messages, so a [`LocaleTag`] or [`CurrencyCode`] held anywhere in
//! the crate is always well-formed and safe to use as a cache key.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated locale tag in `language_REGION` form.
///
/// The accepted shape is two to four lowercase letters, an underscore, then
/// two or three uppercase letters (e.g. `en_US`, `de_DE`, `nds_DE`).
///
/// Locale tags key every localized cache in the crate, so they are validated
/// once on construction and never re-checked afterwards.
///
/// # Example
///
/// ```rust
/// use epages_api::LocaleTag;
///
/// let tag = LocaleTag::new("en_GB").unwrap();
/// assert_eq!(tag.as_ref(), "en_GB");
/// assert_eq!(tag.language(), "en");
/// assert_eq!(tag.region(), "GB");
///
/// assert!(LocaleTag::new("en-GB").is_err());
/// assert!(LocaleTag::new("EN_gb").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    tag: String,
    separator: usize,
}

impl LocaleTag {
    /// Creates a new validated locale tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocaleTag`] if the tag does not match
    /// the `language_REGION` shape.
    pub fn new(tag: impl Into<String>) -> Result<Self, ConfigError> {
        let tag = tag.into();

        let Some(separator) = tag.find('_') else {
            return Err(ConfigError::InvalidLocaleTag { tag });
        };

        let language = &tag[..separator];
        let region = &tag[separator + 1..];

        let language_ok = (2..=4).contains(&language.len())
            && language.chars().all(|c| c.is_ascii_lowercase());
        let region_ok =
            (2..=3).contains(&region.len()) && region.chars().all(|c| c.is_ascii_uppercase());

        if !language_ok || !region_ok {
            return Err(ConfigError::InvalidLocaleTag { tag });
        }

        Ok(Self { tag, separator })
    }

    /// Returns the language portion of the tag (e.g. `en` for `en_US`).
    #[must_use]
    pub fn language(&self) -> &str {
        &self.tag[..self.separator]
    }

    /// Returns the region portion of the tag (e.g. `US` for `en_US`).
    #[must_use]
    pub fn region(&self) -> &str {
        &self.tag[self.separator + 1..]
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for LocaleTag {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for LocaleTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.tag)
    }
}

impl<'de> Deserialize<'de> for LocaleTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated three-letter ISO 4217 currency code (e.g. `EUR`, `USD`).
///
/// # Example
///
/// ```rust
/// use epages_api::CurrencyCode;
///
/// let code = CurrencyCode::new("EUR").unwrap();
/// assert_eq!(code.as_ref(), "EUR");
///
/// assert!(CurrencyCode::new("eur").is_err());
/// assert!(CurrencyCode::new("EURO").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a new validated currency code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCurrencyCode`] if the code is not
    /// exactly three uppercase ASCII letters.
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidCurrencyCode { code });
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated shop host name (e.g. `shop.example.com`).
///
/// Only the bare host is stored; the transport always speaks HTTPS.
///
/// # Example
///
/// ```rust
/// use epages_api::Host;
///
/// let host = Host::new("shop.example.com").unwrap();
/// assert_eq!(host.as_ref(), "shop.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Host(String);

impl Host {
    /// Creates a new validated host.
    ///
    /// Accepts dotted host names built from letters, digits and hyphens,
    /// where no label starts or ends with a hyphen.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] if the host is empty or
    /// malformed.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into();
        let host = host.trim().to_lowercase();

        if host.is_empty() || !host.split('.').all(Self::is_valid_label) {
            return Err(ConfigError::InvalidHost { host });
        }

        Ok(Self(host))
    }

    fn is_valid_label(label: &str) -> bool {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for Host {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque, non-empty product identifier.
///
/// Product ids are assigned by the shop backend and are immutable once a
/// [`Product`](crate::Product) has been constructed from a server payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProductId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyProductId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ProductId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
