//! Product slideshows.
//!
//! A slideshow is fetched at most once per product and never refreshed;
//! the image set of a slideshow changes rarely enough that callers who
//! need a newer one build a new [`Product`](crate::Product).

use crate::clients::{Method, Transport};
use crate::config::ProductId;
use crate::shopobjects::Image;
use serde_json::Value;

/// The image list of a product's slideshow.
///
/// Built by [`Product::slideshow`](crate::Product::slideshow); a failed or
/// uninterpretable fetch yields an empty slideshow that is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSlideshow {
    images: Vec<Image>,
}

impl ProductSlideshow {
    /// Fetches the slideshow of a product once.
    ///
    /// A refused GET, a failed call or a response without `items` all
    /// produce an empty slideshow; the last case is additionally logged as
    /// a contract mismatch.
    pub(crate) async fn load<T: Transport>(transport: &T, product_id: &ProductId) -> Self {
        if !transport.allows(Method::Get) {
            return Self::default();
        }

        let path = format!("products/{}/slideshow", product_id.as_ref());
        let Ok(content) = transport.send(Method::Get, &path, None).await else {
            return Self::default();
        };

        let Some(items) = content.get("items").and_then(Value::as_array) else {
            tracing::error!("response for {path} can not be interpreted");
            return Self::default();
        };

        Self {
            images: items.iter().filter_map(Image::from_value).collect(),
        }
    }

    /// Returns all slideshow images in backend order.
    #[must_use]
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Returns the image at the given position.
    #[must_use]
    pub fn image(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }
}
