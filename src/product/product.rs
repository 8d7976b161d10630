//! The product resource.
//!
//! A [`Product`] is built from one entry of a search response and carries
//! two kinds of state: locale-dependent fields parsed eagerly at
//! construction (name, descriptions, images, prices) and sub-resources
//! fetched lazily with a TTL (custom attributes, stock level) or once
//! (slideshow).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::CachedRemoteValue;
use crate::clients::{Method, Transport};
use crate::config::{LocaleTag, ProductId};
use crate::product::{ProductAttribute, ProductSlideshow};
use crate::shopobjects::{Image, Price, PriceWithQuantity};
use crate::validator;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Image classifiers the backend uses for product images.
const CLASSIFIER_SMALL: &str = "Small";
const CLASSIFIER_MEDIUM: &str = "Medium";
const CLASSIFIER_LARGE: &str = "Large";
const CLASSIFIER_HOT_DEAL: &str = "HotDeal";

#[derive(Debug, Default)]
struct RemoteState {
    attributes: CachedRemoteValue<Vec<ProductAttribute>>,
    stock_level: CachedRemoteValue<f64>,
    slideshow: Option<ProductSlideshow>,
}

/// A product of the shop.
///
/// Locale-dependent fields are snapshots of the search response the product
/// was built from, annotated with the locale the search ran under. The
/// attribute and stock-level sub-resources refresh themselves when read
/// after their shared TTL window expires; the slideshow is fetched at most
/// once. All lazy state sits behind one async mutex, so concurrent readers
/// of a stale value coalesce into a single remote call.
#[derive(Debug)]
pub struct Product<T> {
    transport: Arc<T>,
    response_wait_window: Duration,
    product_id: ProductId,
    locale: Option<LocaleTag>,
    name: Option<String>,
    short_description: Option<String>,
    description: Option<String>,
    availability_text: Option<String>,
    for_sale: bool,
    special_offer: bool,
    images: HashMap<String, Image>,
    price: Option<PriceWithQuantity>,
    deposit_price: Option<Price>,
    eco_participation_price: Option<Price>,
    with_deposit_price: Option<Price>,
    manufacturer_price: Option<Price>,
    base_price: Option<Price>,
    remote: Mutex<RemoteState>,
}

impl<T: Transport> Product<T> {
    /// Builds a product from one entry of a search response.
    ///
    /// Returns `None` when the entry carries no `productId`; every other
    /// field degrades independently. `for_sale` defaults to `true` and
    /// `special_offer` to `false` when absent.
    #[must_use]
    pub fn from_value(
        value: &Value,
        locale: Option<LocaleTag>,
        transport: Arc<T>,
        response_wait_window: Duration,
    ) -> Option<Self> {
        let product_id = value
            .get("productId")
            .and_then(Value::as_str)
            .and_then(|id| ProductId::new(id).ok())?;

        let images = value
            .get("images")
            .and_then(Value::as_array)
            .map(|entries| parse_images(entries))
            .unwrap_or_default();

        let price_info = value.get("priceInfo");

        Some(Self {
            transport,
            response_wait_window,
            product_id,
            locale,
            name: string_field(value, "name"),
            short_description: string_field(value, "shortDescription"),
            description: string_field(value, "description"),
            availability_text: string_field(value, "availabilityText"),
            for_sale: value
                .get("forSale")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            special_offer: value
                .get("specialOffer")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            images,
            price: price_info.and_then(parse_price_with_quantity),
            deposit_price: price_field(price_info, "depositPrice"),
            eco_participation_price: price_field(price_info, "ecoParticipationPrice"),
            with_deposit_price: price_field(price_info, "priceWithDeposits"),
            manufacturer_price: price_field(price_info, "manufactorPrice"),
            base_price: price_field(price_info, "basePrice"),
            remote: Mutex::new(RemoteState::default()),
        })
    }

    /// Returns the product id.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the locale the product's text fields were fetched under.
    #[must_use]
    pub const fn locale(&self) -> Option<&LocaleTag> {
        self.locale.as_ref()
    }

    /// Returns the product name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the short description.
    #[must_use]
    pub fn short_description(&self) -> Option<&str> {
        self.short_description.as_deref()
    }

    /// Returns the long description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the availability text.
    #[must_use]
    pub fn availability_text(&self) -> Option<&str> {
        self.availability_text.as_deref()
    }

    /// Returns whether the product is for sale.
    #[must_use]
    pub const fn is_for_sale(&self) -> bool {
        self.for_sale
    }

    /// Returns whether the product is a special offer.
    #[must_use]
    pub const fn is_special_offer(&self) -> bool {
        self.special_offer
    }

    /// Returns the small image.
    #[must_use]
    pub fn small_image(&self) -> Option<&Image> {
        self.images.get(CLASSIFIER_SMALL)
    }

    /// Returns the medium image.
    #[must_use]
    pub fn medium_image(&self) -> Option<&Image> {
        self.images.get(CLASSIFIER_MEDIUM)
    }

    /// Returns the large image.
    #[must_use]
    pub fn large_image(&self) -> Option<&Image> {
        self.images.get(CLASSIFIER_LARGE)
    }

    /// Returns the hot deal image.
    #[must_use]
    pub fn hot_deal_image(&self) -> Option<&Image> {
        self.images.get(CLASSIFIER_HOT_DEAL)
    }

    /// Returns the price with its quantity.
    #[must_use]
    pub const fn price(&self) -> Option<&PriceWithQuantity> {
        self.price.as_ref()
    }

    /// Returns the deposit price.
    #[must_use]
    pub const fn deposit_price(&self) -> Option<&Price> {
        self.deposit_price.as_ref()
    }

    /// Returns the eco participation price.
    #[must_use]
    pub const fn eco_participation_price(&self) -> Option<&Price> {
        self.eco_participation_price.as_ref()
    }

    /// Returns the price including deposits.
    #[must_use]
    pub const fn with_deposit_price(&self) -> Option<&Price> {
        self.with_deposit_price.as_ref()
    }

    /// Returns the manufacturer price.
    #[must_use]
    pub const fn manufacturer_price(&self) -> Option<&Price> {
        self.manufacturer_price.as_ref()
    }

    /// Returns the base price.
    #[must_use]
    pub const fn base_price(&self) -> Option<&Price> {
        self.base_price.as_ref()
    }

    /// Returns the custom attributes, refreshing them when stale.
    ///
    /// An empty list after the refresh means the backend reported no
    /// attributes or did not answer usably.
    pub async fn attributes(&self) -> Vec<ProductAttribute> {
        let mut remote = self.remote.lock().await;
        self.ensure_attributes(&mut remote).await;
        remote.attributes.value().cloned().unwrap_or_default()
    }

    /// Returns the custom attribute at the given position.
    pub async fn attribute(&self, index: usize) -> Option<ProductAttribute> {
        let mut remote = self.remote.lock().await;
        self.ensure_attributes(&mut remote).await;
        remote
            .attributes
            .value()
            .and_then(|attributes| attributes.get(index))
            .cloned()
    }

    /// Returns the stock level, refreshing it when stale.
    pub async fn stock_level(&self) -> Option<f64> {
        let mut remote = self.remote.lock().await;
        self.ensure_stock_level(&mut remote).await;
        remote.stock_level.value().copied()
    }

    /// Increases the stock level by `step` (typically `1.0`).
    ///
    /// A negative or non-finite step is rejected and the current stock
    /// level is returned unchanged, without any remote write.
    pub async fn increase_stock_level(&self, step: f64) -> Option<f64> {
        self.shift_stock_level(step, 1.0).await
    }

    /// Decreases the stock level by `step` (typically `1.0`).
    ///
    /// The same step validation as
    /// [`increase_stock_level`](Self::increase_stock_level) applies; the
    /// sign is supplied here, not by the caller.
    pub async fn decrease_stock_level(&self, step: f64) -> Option<f64> {
        self.shift_stock_level(step, -1.0).await
    }

    /// Returns the slideshow, fetching it on first access.
    ///
    /// The result is kept for the product's lifetime, even when the fetch
    /// produced an empty slideshow.
    pub async fn slideshow(&self) -> ProductSlideshow {
        let mut remote = self.remote.lock().await;
        if remote.slideshow.is_none() {
            remote.slideshow =
                Some(ProductSlideshow::load(self.transport.as_ref(), &self.product_id).await);
        }
        remote.slideshow.clone().unwrap_or_default()
    }

    /// Deletes the product on the backend.
    ///
    /// Returns whether the DELETE was issued; the response body is not
    /// interpreted and local caches stay as they are.
    pub async fn delete(&self) -> bool {
        if !self.transport.allows(Method::Delete) {
            return false;
        }

        let path = format!("products/{}", self.product_id.as_ref());
        // DELETE answers with an empty body; a transport error here does
        // not make the verb refused.
        let _ = self.transport.send(Method::Delete, &path, None).await;
        true
    }

    async fn ensure_attributes(&self, remote: &mut RemoteState) {
        if !remote.attributes.is_stale(Instant::now()) {
            return;
        }
        if !self.transport.allows(Method::Get) {
            return;
        }

        let path = format!("products/{}/custom-attributes", self.product_id.as_ref());
        let Ok(content) = self.transport.send(Method::Get, &path, None).await else {
            return;
        };

        let Some(items) = content.get("items").and_then(Value::as_array) else {
            tracing::error!("response for {path} can not be interpreted");
            return;
        };

        let attributes = items.iter().map(ProductAttribute::from_value).collect();
        remote
            .attributes
            .store(attributes, Instant::now(), self.response_wait_window);
    }

    async fn ensure_stock_level(&self, remote: &mut RemoteState) {
        if !remote.stock_level.is_stale(Instant::now()) {
            return;
        }
        if !self.transport.allows(Method::Get) {
            return;
        }

        let path = format!("products/{}/stock-level", self.product_id.as_ref());
        let Ok(content) = self.transport.send(Method::Get, &path, None).await else {
            return;
        };

        if let Some(stock_level) = content.get("stocklevel").and_then(Value::as_f64) {
            remote
                .stock_level
                .store(stock_level, Instant::now(), self.response_wait_window);
        }
    }

    async fn shift_stock_level(&self, step: f64, sign: f64) -> Option<f64> {
        let mut remote = self.remote.lock().await;
        self.ensure_stock_level(&mut remote).await;

        if !validator::is_ranged_float(step, Some(0.0), None) {
            tracing::warn!("rejecting stock level change by {step} on {}", self.product_id);
            return remote.stock_level.value().copied();
        }

        if self.transport.allows(Method::Put) {
            let path = format!("products/{}/stock-level", self.product_id.as_ref());
            let payload = json!({ "changeStocklevel": sign * step });

            if let Ok(content) = self.transport.send(Method::Put, &path, Some(payload)).await {
                if let Some(stock_level) = content.get("stocklevel").and_then(Value::as_f64) {
                    remote
                        .stock_level
                        .store(stock_level, Instant::now(), self.response_wait_window);
                }
            }
        }

        remote.stock_level.value().copied()
    }
}

impl<T> fmt::Display for Product<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Product ID: {}", self.product_id)?;
        writeln!(f, "Name: {}", self.name.as_deref().unwrap_or_default())?;
        writeln!(
            f,
            "Short description: {}",
            self.short_description.as_deref().unwrap_or_default()
        )?;
        writeln!(
            f,
            "Description: {}",
            self.description.as_deref().unwrap_or_default()
        )?;
        writeln!(f, "For sale: {}", self.for_sale)?;
        writeln!(f, "Special offer: {}", self.special_offer)?;
        write!(
            f,
            "Availability text: {}",
            self.availability_text.as_deref().unwrap_or_default()
        )
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn price_field(price_info: Option<&Value>, key: &str) -> Option<Price> {
    price_info.and_then(|info| info.get(key)).map(Price::from_value)
}

fn parse_price_with_quantity(price_info: &Value) -> Option<PriceWithQuantity> {
    match (price_info.get("price"), price_info.get("quantity")) {
        (Some(price), Some(quantity)) => Some(PriceWithQuantity::from_values(price, quantity)),
        _ => None,
    }
}

fn parse_images(entries: &[Value]) -> HashMap<String, Image> {
    entries
        .iter()
        .filter_map(|entry| {
            let classifier = entry.get("classifier").and_then(Value::as_str)?;
            let image = Image::from_value(entry)?;
            Some((classifier.to_string(), image))
        })
        .collect()
}
