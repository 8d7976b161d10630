//! Image value object.

use serde_json::Value;

/// An image referenced by a shop resource.
///
/// Only the URL is carried; sizing is expressed by the classifier under
/// which the owning resource stores the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    url: String,
}

impl Image {
    /// Creates an image from a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Parses an image fragment of the form `{"url": "..."}`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .get("url")
            .and_then(Value::as_str)
            .map(|url| Self::new(url))
    }

    /// Returns the image URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}
