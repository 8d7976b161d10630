//! Product search.
//!
//! [`ProductFilter`] accumulates validated search criteria and runs one GET
//! against the `products` resource per [`products`](ProductFilter::products)
//! call. Every setter validates its input and returns whether it was
//! accepted; rejected input leaves the previous value in place, so the
//! filter is never partially invalid.

use std::sync::Arc;
use std::time::Duration;

use crate::clients::{Method, Transport};
use crate::config::{CurrencyCode, LocaleTag};
use crate::locales::Locales;
use crate::product::Product;
use crate::validator;
use serde_json::Value;
use sha2::{Digest, Sha512};

/// The REST path searches run against.
const REST_PATH: &str = "products";

/// Filters start on the first page.
const DEFAULT_PAGE: u32 = 1;

/// Filters ask for ten results per page unless told otherwise.
const DEFAULT_RESULTS_PER_PAGE: u32 = 10;

/// The backend caps page size at one hundred.
const MAX_RESULTS_PER_PAGE: u32 = 100;

/// Sorting defaults to the product name.
const DEFAULT_SORT: &str = "name";

/// At most twelve explicit product ids per search.
const MAX_IDS: usize = 12;

/// A validated, serializable product search.
///
/// # Example
///
/// ```rust
/// use epages_api::{Locales, ProductFilter};
/// use epages_api::clients::MockTransport;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let mock = Arc::new(MockTransport::new());
/// let locales = Arc::new(Locales::new(Arc::clone(&mock)));
/// let mut filter = ProductFilter::new(Arc::clone(&mock), locales, Duration::from_secs(600));
///
/// assert!(filter.set_q("shoe"));
/// assert!(filter.set_page(2));
/// assert!(!filter.set_page(0));
/// assert_eq!(filter.page(), 2);
/// ```
#[derive(Debug)]
pub struct ProductFilter<T> {
    transport: Arc<T>,
    locales: Arc<Locales<T>>,
    response_wait_window: Duration,
    locale: Option<LocaleTag>,
    currency: Option<CurrencyCode>,
    page: u32,
    results_per_page: u32,
    direction: Option<String>,
    sort: String,
    q: Option<String>,
    category_id: Option<String>,
    ids: Vec<String>,
}

impl<T: Transport> ProductFilter<T> {
    /// Creates a filter with default paging and sorting.
    ///
    /// `response_wait_window` is handed to every [`Product`] the filter
    /// builds and drives their sub-resource TTLs.
    #[must_use]
    pub fn new(
        transport: Arc<T>,
        locales: Arc<Locales<T>>,
        response_wait_window: Duration,
    ) -> Self {
        Self {
            transport,
            locales,
            response_wait_window,
            locale: None,
            currency: None,
            page: DEFAULT_PAGE,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            direction: None,
            sort: DEFAULT_SORT.to_string(),
            q: None,
            category_id: None,
            ids: Vec::new(),
        }
    }

    /// Applies a key/value map of criteria, e.g. from parsed user input.
    ///
    /// Each entry goes through the corresponding setter; unknown keys are
    /// logged and skipped. Supported keys: `locale`, `currency`, `page`,
    /// `resultsPerPage`, `direction`, `sort`, `q`, `categoryID`.
    pub fn set_product_filter<'a>(
        &mut self,
        criteria: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        for (key, value) in criteria {
            match key {
                "locale" => {
                    self.set_locale(value);
                }
                "currency" => {
                    self.set_currency(value);
                }
                "page" => {
                    if let Ok(page) = value.parse() {
                        self.set_page(page);
                    }
                }
                "resultsPerPage" => {
                    if let Ok(results_per_page) = value.parse() {
                        self.set_results_per_page(results_per_page);
                    }
                }
                "direction" => {
                    self.set_direction(value);
                }
                "sort" => {
                    self.set_sort(value);
                }
                "q" => {
                    self.set_q(value);
                }
                "categoryID" => {
                    self.set_category_id(value);
                }
                _ => tracing::warn!("unknown attribute {key} in product filter attribute"),
            }
        }
    }

    /// Sets the search locale. Returns `false` for a malformed tag.
    pub fn set_locale(&mut self, locale: &str) -> bool {
        match LocaleTag::new(locale) {
            Ok(locale) => {
                self.locale = Some(locale);
                true
            }
            Err(_) => {
                tracing::warn!("this is not a locale tag: {locale}");
                false
            }
        }
    }

    /// Returns the search locale.
    #[must_use]
    pub const fn locale(&self) -> Option<&LocaleTag> {
        self.locale.as_ref()
    }

    /// Sets the price currency. Returns `false` for a malformed code.
    pub fn set_currency(&mut self, currency: &str) -> bool {
        match CurrencyCode::new(currency) {
            Ok(currency) => {
                self.currency = Some(currency);
                true
            }
            Err(_) => {
                tracing::warn!("this is not a currency code: {currency}");
                false
            }
        }
    }

    /// Returns the price currency.
    #[must_use]
    pub const fn currency(&self) -> Option<&CurrencyCode> {
        self.currency.as_ref()
    }

    /// Sets the result page, starting at 1.
    pub fn set_page(&mut self, page: u32) -> bool {
        if !validator::is_ranged_int(i64::from(page), Some(1), None) {
            return false;
        }
        self.page = page;
        true
    }

    /// Returns the result page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Sets the page size, capped at 100.
    pub fn set_results_per_page(&mut self, results_per_page: u32) -> bool {
        if !validator::is_ranged_int(
            i64::from(results_per_page),
            Some(1),
            Some(i64::from(MAX_RESULTS_PER_PAGE)),
        ) {
            return false;
        }
        self.results_per_page = results_per_page;
        true
    }

    /// Returns the page size.
    #[must_use]
    pub const fn results_per_page(&self) -> u32 {
        self.results_per_page
    }

    /// Sets the sort direction, `asc` or `desc`.
    pub fn set_direction(&mut self, direction: &str) -> bool {
        if !validator::is_product_direction(direction) {
            return false;
        }
        self.direction = Some(direction.to_string());
        true
    }

    /// Returns the sort direction.
    #[must_use]
    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }

    /// Sets the sort criterion, `name` or `price`.
    pub fn set_sort(&mut self, sort: &str) -> bool {
        if !validator::is_product_sort(sort) {
            return false;
        }
        self.sort = sort.to_string();
        true
    }

    /// Returns the sort criterion.
    #[must_use]
    pub fn sort(&self) -> &str {
        &self.sort
    }

    /// Sets the free-text search string. Empty input is rejected.
    pub fn set_q(&mut self, q: &str) -> bool {
        if validator::is_empty(q) {
            return false;
        }
        self.q = Some(q.to_string());
        true
    }

    /// Returns the free-text search string.
    #[must_use]
    pub fn q(&self) -> Option<&str> {
        self.q.as_deref()
    }

    /// Sets the category to search in. Empty input is rejected.
    pub fn set_category_id(&mut self, category_id: &str) -> bool {
        if validator::is_empty(category_id) {
            return false;
        }
        self.category_id = Some(category_id.to_string());
        true
    }

    /// Returns the category id.
    #[must_use]
    pub fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    /// Tracks a product id to search for.
    ///
    /// Rejected when empty, already tracked, or the limit of twelve ids is
    /// reached.
    pub fn set_id(&mut self, product_id: &str) -> bool {
        if validator::is_empty(product_id)
            || self.ids.len() >= MAX_IDS
            || self.ids.iter().any(|id| id == product_id)
        {
            return false;
        }
        self.ids.push(product_id.to_string());
        true
    }

    /// Stops tracking a product id. Returns `false` when it was not tracked.
    pub fn unset_id(&mut self, product_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != product_id);
        self.ids.len() != before
    }

    /// Returns the tracked product ids.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Drops all tracked product ids.
    pub fn reset_ids(&mut self) {
        self.ids.clear();
    }

    /// Resets every criterion to its default.
    pub fn reset_filter(&mut self) {
        self.locale = None;
        self.currency = None;
        self.page = DEFAULT_PAGE;
        self.results_per_page = DEFAULT_RESULTS_PER_PAGE;
        self.direction = None;
        self.sort = DEFAULT_SORT.to_string();
        self.q = None;
        self.category_id = None;
        self.ids.clear();
    }

    /// Logs the current criteria at info level.
    pub fn print_filter(&self) {
        let mut message = Vec::new();
        if let Some(locale) = &self.locale {
            message.push(format!("Locale: {locale}"));
        }
        if let Some(currency) = &self.currency {
            message.push(format!("Currency: {currency}"));
        }
        message.push(format!("Page: {}", self.page));
        message.push(format!("Results per page: {}", self.results_per_page));
        if let Some(direction) = &self.direction {
            message.push(format!("Direction: {direction}"));
        }
        message.push(format!("Sort: {}", self.sort));
        if let Some(q) = &self.q {
            message.push(format!("Search string: {q}"));
        }
        if let Some(category_id) = &self.category_id {
            message.push(format!("Category ID: {category_id}"));
        }
        for (number, id) in self.ids.iter().enumerate() {
            message.push(format!("Product id{number}: {id}"));
        }
        tracing::info!("{}", message.join(", "));
    }

    /// Returns a fingerprint of the current criteria.
    ///
    /// Two filters with equal criteria produce equal fingerprints, so the
    /// value works as a cache key for search results.
    #[must_use]
    pub fn hash_code(&self) -> String {
        let mut hasher = Sha512::new();
        hasher.update(self.parameter().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Runs the search.
    ///
    /// Returns `None` when the GET verb is refused, the call fails, or the
    /// response misses any of `results`, `page`, `resultsPerPage`. An
    /// interpretable response without items yields an empty vector. Each
    /// item is annotated with the filter's locale, falling back to the
    /// registry default, and items without a product id are skipped.
    pub async fn products(&self) -> Option<Vec<Product<T>>> {
        if !self.transport.allows(Method::Get) {
            return None;
        }

        let path = format!("{REST_PATH}?{}", self.parameter());
        let content = self.transport.send(Method::Get, &path, None).await.ok()?;

        if content.get("results").is_none()
            || content.get("page").is_none()
            || content.get("resultsPerPage").is_none()
        {
            tracing::error!("response for {REST_PATH} can not be interpreted");
            return None;
        }

        let locale = match &self.locale {
            Some(locale) => Some(locale.clone()),
            None => self.locales.default_locale().await,
        };

        let products = content
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        Product::from_value(
                            item,
                            locale.clone(),
                            Arc::clone(&self.transport),
                            self.response_wait_window,
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(products)
    }

    /// Serializes the criteria as a query string.
    ///
    /// Field order is fixed regardless of setter order: locale, currency,
    /// page, resultsPerPage, direction, sort, q, categoryId, then one `id`
    /// per tracked product id.
    fn parameter(&self) -> String {
        let mut parameter = Vec::new();
        if let Some(locale) = &self.locale {
            parameter.push(format!("locale={locale}"));
        }
        if let Some(currency) = &self.currency {
            parameter.push(format!("currency={currency}"));
        }
        parameter.push(format!("page={}", self.page));
        parameter.push(format!("resultsPerPage={}", self.results_per_page));
        if let Some(direction) = &self.direction {
            parameter.push(format!("direction={direction}"));
        }
        parameter.push(format!("sort={}", self.sort));
        if let Some(q) = &self.q {
            parameter.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(category_id) = &self.category_id {
            parameter.push(format!("categoryId={}", urlencoding::encode(category_id)));
        }
        for id in &self.ids {
            parameter.push(format!("id={}", urlencoding::encode(id)));
        }
        parameter.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockTransport;
    use serde_json::json;

    fn filter() -> (Arc<MockTransport>, ProductFilter<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let locales = Arc::new(Locales::new(Arc::clone(&mock)));
        let filter = ProductFilter::new(Arc::clone(&mock), locales, Duration::from_secs(600));
        (mock, filter)
    }

    #[test]
    fn test_defaults_serialize_to_page_size_and_sort() {
        let (_mock, filter) = filter();
        assert_eq!(filter.parameter(), "page=1&resultsPerPage=10&sort=name");
    }

    #[test]
    fn test_rejected_input_keeps_previous_value() {
        let (_mock, mut filter) = filter();

        assert!(filter.set_page(3));
        assert!(!filter.set_page(0));
        assert_eq!(filter.page(), 3);

        assert!(filter.set_direction("asc"));
        assert!(!filter.set_direction("upwards"));
        assert_eq!(filter.direction(), Some("asc"));

        assert!(!filter.set_results_per_page(101));
        assert_eq!(filter.results_per_page(), 10);

        assert!(!filter.set_locale("en-US"));
        assert!(filter.locale().is_none());

        assert!(!filter.set_q(""));
        assert!(filter.q().is_none());
    }

    #[test]
    fn test_parameter_order_is_independent_of_setter_order() {
        let (_mock, mut a) = filter();
        a.set_page(2);
        a.set_results_per_page(20);
        a.set_sort("price");
        a.set_direction("desc");

        let (_mock, mut b) = filter();
        b.set_direction("desc");
        b.set_sort("price");
        b.set_results_per_page(20);
        b.set_page(2);

        let expected = "page=2&resultsPerPage=20&direction=desc&sort=price";
        assert_eq!(a.parameter(), expected);
        assert_eq!(b.parameter(), expected);
    }

    #[test]
    fn test_search_string_is_url_encoded() {
        let (_mock, mut filter) = filter();
        filter.set_q("red shoe");
        assert_eq!(
            filter.parameter(),
            "page=1&resultsPerPage=10&sort=name&q=red%20shoe"
        );
    }

    #[test]
    fn test_id_tracking_is_unique_and_capped() {
        let (_mock, mut filter) = filter();

        assert!(filter.set_id("P1"));
        assert!(!filter.set_id("P1"));
        assert!(!filter.set_id(""));

        for n in 2..=12 {
            assert!(filter.set_id(&format!("P{n}")));
        }
        assert!(!filter.set_id("P13"));
        assert_eq!(filter.ids().len(), 12);

        assert!(filter.unset_id("P1"));
        assert!(!filter.unset_id("P1"));
        assert!(filter.set_id("P13"));

        filter.reset_ids();
        assert!(filter.ids().is_empty());
    }

    #[test]
    fn test_ids_serialize_one_parameter_each() {
        let (_mock, mut filter) = filter();
        filter.set_id("P1");
        filter.set_id("P2");
        assert_eq!(
            filter.parameter(),
            "page=1&resultsPerPage=10&sort=name&id=P1&id=P2"
        );
    }

    #[test]
    fn test_set_product_filter_applies_known_keys_only() {
        let (_mock, mut filter) = filter();
        filter.set_product_filter([
            ("locale", "de_DE"),
            ("currency", "EUR"),
            ("page", "4"),
            ("resultsPerPage", "25"),
            ("sort", "price"),
            ("direction", "desc"),
            ("q", "boot"),
            ("categoryID", "C7"),
            ("flavor", "salty"),
        ]);

        assert_eq!(filter.locale().unwrap().as_ref(), "de_DE");
        assert_eq!(filter.currency().unwrap().as_ref(), "EUR");
        assert_eq!(filter.page(), 4);
        assert_eq!(filter.results_per_page(), 25);
        assert_eq!(filter.sort(), "price");
        assert_eq!(filter.direction(), Some("desc"));
        assert_eq!(filter.q(), Some("boot"));
        assert_eq!(filter.category_id(), Some("C7"));
    }

    #[test]
    fn test_reset_filter_restores_defaults() {
        let (_mock, mut filter) = filter();
        filter.set_locale("de_DE");
        filter.set_page(5);
        filter.set_sort("price");
        filter.set_id("P1");

        filter.reset_filter();
        assert_eq!(filter.parameter(), "page=1&resultsPerPage=10&sort=name");
        assert!(filter.ids().is_empty());
    }

    #[test]
    fn test_hash_code_reflects_criteria_equality() {
        let (_mock, mut a) = filter();
        let (_mock, mut b) = filter();
        assert_eq!(a.hash_code(), b.hash_code());

        a.set_q("shoe");
        assert_ne!(a.hash_code(), b.hash_code());
        b.set_q("shoe");
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[tokio::test]
    async fn test_products_builds_items_with_filter_locale() {
        let (mock, mut filter) = filter();
        filter.set_locale("de_DE");
        mock.stub(
            Method::Get,
            "products?locale=de_DE&page=1&resultsPerPage=10&sort=name",
            json!({
                "results": 1,
                "page": 1,
                "resultsPerPage": 10,
                "items": [{"productId": "P1", "name": "Schuh"}]
            }),
        );

        let products = filter.products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id().as_ref(), "P1");
        assert_eq!(products[0].name(), Some("Schuh"));
        assert_eq!(products[0].locale().unwrap().as_ref(), "de_DE");
    }

    #[tokio::test]
    async fn test_products_falls_back_to_registry_default_locale() {
        let (mock, filter) = filter();
        mock.stub(
            Method::Get,
            "locales",
            json!({"default": "en_GB", "items": ["en_GB"]}),
        );
        mock.stub(
            Method::Get,
            "products?page=1&resultsPerPage=10&sort=name",
            json!({
                "results": 1,
                "page": 1,
                "resultsPerPage": 10,
                "items": [{"productId": "P1", "name": "Shoe"}]
            }),
        );

        let products = filter.products().await.unwrap();
        assert_eq!(products[0].locale().unwrap().as_ref(), "en_GB");
    }

    #[tokio::test]
    async fn test_products_requires_paging_echo_fields() {
        let (mock, filter) = filter();
        mock.stub(
            Method::Get,
            "products?page=1&resultsPerPage=10&sort=name",
            json!({"results": 1, "items": []}),
        );

        assert!(filter.products().await.is_none());
    }

    #[tokio::test]
    async fn test_products_without_items_is_empty_not_none() {
        let (mock, filter) = filter();
        mock.stub(
            Method::Get,
            "products?page=1&resultsPerPage=10&sort=name",
            json!({"results": 0, "page": 1, "resultsPerPage": 10}),
        );

        let products = filter.products().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_products_skips_items_without_product_id() {
        let (mock, filter) = filter();
        mock.stub(
            Method::Get,
            "products?page=1&resultsPerPage=10&sort=name",
            json!({
                "results": 2,
                "page": 1,
                "resultsPerPage": 10,
                "items": [{"name": "No id"}, {"productId": "P2"}]
            }),
        );

        let products = filter.products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id().as_ref(), "P2");
    }

    #[tokio::test]
    async fn test_products_is_none_when_get_is_refused() {
        let (mock, filter) = filter();
        mock.deny(Method::Get);
        assert!(filter.products().await.is_none());
        assert!(mock.calls().is_empty());
    }
}
