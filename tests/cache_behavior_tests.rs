//! Integration tests for cache staleness and update behavior.
//!
//! These tests drive the resource caches through a [`MockTransport`] and
//! assert the observable remote traffic:
//! - Lazy loading with exactly one fetch per cache miss
//! - TTL-driven refresh on a paused Tokio clock
//! - Update echo semantics for localized text fields
//! - Rejected input producing no remote writes
//! - Malformed responses leaving caches empty and re-attempting per call

use std::sync::Arc;
use std::time::Duration;

use epages_api::clients::{Method, MockTransport};
use epages_api::{LocaleTag, Locales, LocalizedInformation, Product};
use serde_json::json;

fn locale(tag: &str) -> LocaleTag {
    LocaleTag::new(tag).unwrap()
}

fn registry(mock: &Arc<MockTransport>) -> Arc<Locales<MockTransport>> {
    mock.stub(
        Method::Get,
        "locales",
        json!({"default": "en_GB", "items": ["en_GB", "de_DE"]}),
    );
    Arc::new(Locales::new(Arc::clone(mock)))
}

fn product(mock: &Arc<MockTransport>, window: Duration) -> Product<MockTransport> {
    Product::from_value(
        &json!({"productId": "P1", "name": "Shoe"}),
        Some(locale("en_GB")),
        Arc::clone(mock),
        window,
    )
    .unwrap()
}

// ============================================================================
// Localized Field Updates
// ============================================================================

#[tokio::test]
async fn test_set_then_get_echoes_value_for_every_field_kind() {
    let mock = Arc::new(MockTransport::new());
    let locales = registry(&mock);
    let info = LocalizedInformation::new("shopinfo", Arc::clone(&mock), locales);
    let en = locale("en_GB");

    mock.stub(Method::Put, "shopinfo", json!({"name": "A Name"}));
    assert!(info.set_name("A Name", &en).await);
    assert_eq!(info.name(&en).await.as_deref(), Some("A Name"));

    mock.stub(Method::Put, "shopinfo", json!({"navigationCaption": "A Caption"}));
    assert!(info.set_navigation_caption("A Caption", &en).await);
    assert_eq!(
        info.navigation_caption(&en).await.as_deref(),
        Some("A Caption")
    );

    mock.stub(Method::Put, "shopinfo", json!({"description": "A Description"}));
    assert!(info.set_description("A Description", &en).await);
    assert_eq!(info.description(&en).await.as_deref(), Some("A Description"));
}

#[tokio::test]
async fn test_default_locale_setters_resolve_the_registry() {
    let mock = Arc::new(MockTransport::new());
    let locales = registry(&mock);
    let info = LocalizedInformation::new("shopinfo", Arc::clone(&mock), locales);

    mock.stub(Method::Put, "shopinfo", json!({"name": "Default Name"}));
    assert!(info.set_default_name("Default Name").await);
    assert_eq!(info.default_name().await.as_deref(), Some("Default Name"));

    // The update went out scoped to the registry default.
    let puts: Vec<_> = mock
        .calls()
        .into_iter()
        .filter(|call| call.method == Method::Put)
        .collect();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].locale.as_ref().map(AsRef::as_ref), Some("en_GB"));
}

// ============================================================================
// Locale Registry Failure Handling
// ============================================================================

#[tokio::test]
async fn test_malformed_locales_response_leaves_both_getters_empty() {
    let mock = Arc::new(MockTransport::new());
    // "items" is missing, so the response is uninterpretable as a whole.
    mock.stub(Method::Get, "locales", json!({"default": "en_GB"}));
    let locales = Locales::new(Arc::clone(&mock));

    assert!(locales.default_locale().await.is_none());
    assert!(locales.items().await.is_none());

    // Nothing was cached, so each getter re-attempted its own load.
    assert_eq!(mock.call_count(Method::Get, "locales"), 2);
}

// ============================================================================
// TTL-Guarded Sub-Resources
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_unexpired_window_serves_from_cache_then_refreshes_once() {
    let mock = Arc::new(MockTransport::new());
    mock.stub(
        Method::Get,
        "products/P1/stock-level",
        json!({"stocklevel": 5.0}),
    );
    let product = product(&mock, Duration::from_millis(1000));

    // t=0: first read fetches.
    assert_eq!(product.stock_level().await, Some(5.0));
    assert_eq!(mock.call_count(Method::Get, "products/P1/stock-level"), 1);

    // t=500: inside the window, no remote call.
    tokio::time::advance(Duration::from_millis(500)).await;
    assert_eq!(product.stock_level().await, Some(5.0));
    assert_eq!(mock.call_count(Method::Get, "products/P1/stock-level"), 1);

    // t=1500: expired, exactly one refresh.
    tokio::time::advance(Duration::from_millis(1000)).await;
    assert_eq!(product.stock_level().await, Some(5.0));
    assert_eq!(mock.call_count(Method::Get, "products/P1/stock-level"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_attributes_share_the_same_window_discipline() {
    let mock = Arc::new(MockTransport::new());
    mock.stub(
        Method::Get,
        "products/P1/custom-attributes",
        json!({"items": [{"name": "color", "values": ["red"]}]}),
    );
    let product = product(&mock, Duration::from_millis(1000));

    assert_eq!(product.attributes().await.len(), 1);
    tokio::time::advance(Duration::from_millis(999)).await;
    assert_eq!(product.attributes().await.len(), 1);
    assert_eq!(
        mock.call_count(Method::Get, "products/P1/custom-attributes"),
        1
    );

    tokio::time::advance(Duration::from_millis(1)).await;
    product.attributes().await;
    assert_eq!(
        mock.call_count(Method::Get, "products/P1/custom-attributes"),
        2
    );
}

// ============================================================================
// Stock Level Mutation
// ============================================================================

#[tokio::test]
async fn test_negative_step_never_mutates_stock_nor_issues_a_put() {
    let mock = Arc::new(MockTransport::new());
    mock.stub(
        Method::Get,
        "products/P1/stock-level",
        json!({"stocklevel": 5.0}),
    );
    let product = product(&mock, Duration::from_secs(600));

    assert_eq!(product.increase_stock_level(-1.0).await, Some(5.0));
    assert_eq!(product.decrease_stock_level(-3.5).await, Some(5.0));
    assert_eq!(product.stock_level().await, Some(5.0));
    assert_eq!(mock.call_count(Method::Put, "products/P1/stock-level"), 0);
}

#[tokio::test]
async fn test_accepted_step_overwrites_cache_from_the_echo() {
    let mock = Arc::new(MockTransport::new());
    mock.stub(
        Method::Get,
        "products/P1/stock-level",
        json!({"stocklevel": 5.0}),
    );
    mock.stub(
        Method::Put,
        "products/P1/stock-level",
        json!({"stocklevel": 6.0}),
    );
    let product = product(&mock, Duration::from_secs(600));

    assert_eq!(product.increase_stock_level(1.0).await, Some(6.0));
    // The echoed value is now the cached one; no extra GET needed.
    assert_eq!(product.stock_level().await, Some(6.0));
    assert_eq!(mock.call_count(Method::Get, "products/P1/stock-level"), 1);
}
