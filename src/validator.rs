//! Input format predicates.
//!
//! Pure boolean checks used by setters and cache getters to classify
//! caller-supplied strings and numbers before any remote call is made. A
//! failed check is a "validation-rejected" outcome: the predicates log a
//! warning for malformed shaped values (locale tags, currency codes, sort
//! parameters) and never affect control flow beyond their return value.

use crate::config::LocaleTag;

/// Returns `true` if `value` is a well-formed locale tag (`en_US` style).
#[must_use]
pub fn is_locale(value: &str) -> bool {
    let ok = LocaleTag::new(value).is_ok();
    if !ok && !is_empty(value) {
        tracing::warn!("this is not a locale tag: {value}");
    }
    ok
}

/// Returns `true` if `value` is a three-letter uppercase currency code.
#[must_use]
pub fn is_currency(value: &str) -> bool {
    let ok = value.len() == 3 && value.chars().all(|c| c.is_ascii_uppercase());
    if !ok && !is_empty(value) {
        tracing::warn!("this is not a currency code: {value}");
    }
    ok
}

/// Returns `true` if `value` is a product sort direction (`asc` or `desc`).
#[must_use]
pub fn is_product_direction(value: &str) -> bool {
    let ok = value == "asc" || value == "desc";
    if !ok && !is_empty(value) {
        tracing::warn!("this is not a product sort direction: {value}");
    }
    ok
}

/// Returns `true` if `value` is a product sort parameter (`name` or `price`).
#[must_use]
pub fn is_product_sort(value: &str) -> bool {
    let ok = value == "name" || value == "price";
    if !ok && !is_empty(value) {
        tracing::warn!("this is not a product sort parameter: {value}");
    }
    ok
}

/// Returns `true` if `value` lies within the given inclusive bounds.
///
/// Either bound may be `None` to leave that side open.
#[must_use]
pub fn is_ranged_int(value: i64, minimum: Option<i64>, maximum: Option<i64>) -> bool {
    minimum.map_or(true, |min| value >= min) && maximum.map_or(true, |max| value <= max)
}

/// Returns `true` if `value` is a finite float within the given inclusive
/// bounds.
///
/// Either bound may be `None` to leave that side open. Non-finite values
/// (NaN, infinities) never pass.
#[must_use]
pub fn is_ranged_float(value: f64, minimum: Option<f64>, maximum: Option<f64>) -> bool {
    value.is_finite()
        && minimum.map_or(true, |min| value >= min)
        && maximum.map_or(true, |max| value <= max)
}

/// Returns `true` if `value` is empty.
#[must_use]
pub fn is_empty(value: &str) -> bool {
    value.is_empty()
}
