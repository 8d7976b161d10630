//! Locale-keyed text field caches.
//!
//! [`LocalizedInformation`] caches the three localized text fields a shop
//! resource carries (name, navigation caption, description) as
//! locale-to-text mappings, fetching each locale on demand and falling back
//! to the registry's default locale when asked for "the" value.
//!
//! The staleness discipline differs from the locale registry on purpose:
//! a *failed* load is a silent no-op that keeps every already-known locale,
//! while a *successful* load or update is authoritative and replaces the
//! cached state of all three fields wholesale. The backend may rewrite any
//! of the three fields when one is updated, so they always refresh together.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::{Method, Transport};
use crate::config::LocaleTag;
use crate::locales::Locales;
use crate::validator;
use serde_json::{json, Value};
use tokio::sync::Mutex;

/// The localized text fields of a shop resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// The resource's display name.
    Name,
    /// The caption shown in shop navigation.
    NavigationCaption,
    /// The long description.
    Description,
}

impl TextField {
    /// Returns the field's key in request and response payloads.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::NavigationCaption => "navigationCaption",
            Self::Description => "description",
        }
    }
}

#[derive(Debug, Default)]
struct Fields {
    name: HashMap<LocaleTag, String>,
    navigation_caption: HashMap<LocaleTag, String>,
    description: HashMap<LocaleTag, String>,
}

impl Fields {
    fn map(&self, field: TextField) -> &HashMap<LocaleTag, String> {
        match field {
            TextField::Name => &self.name,
            TextField::NavigationCaption => &self.navigation_caption,
            TextField::Description => &self.description,
        }
    }

    fn map_mut(&mut self, field: TextField) -> &mut HashMap<LocaleTag, String> {
        match field {
            TextField::Name => &mut self.name,
            TextField::NavigationCaption => &mut self.navigation_caption,
            TextField::Description => &mut self.description,
        }
    }

    /// Clears all locales for all three fields.
    fn reset(&mut self) {
        self.name.clear();
        self.navigation_caption.clear();
        self.description.clear();
    }

    /// Stores whichever of the three fields the payload carries, for one
    /// locale. Fields the payload omits are left as they are.
    fn absorb(&mut self, locale: &LocaleTag, content: &Value) {
        for field in [
            TextField::Name,
            TextField::NavigationCaption,
            TextField::Description,
        ] {
            if let Some(value) = content.get(field.key()).and_then(Value::as_str) {
                self.map_mut(field)
                    .insert(locale.clone(), value.to_string());
            }
        }
    }
}

/// Per-resource cache of localized name, navigation caption and description.
///
/// Constructed with the owning resource's REST path; every fetch and update
/// is scoped to that path plus a locale.
///
/// # Example
///
/// ```rust
/// use epages_api::{LocaleTag, LocalizedInformation, Locales};
/// use epages_api::clients::{Method, MockTransport};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # async fn run() {
/// let mock = Arc::new(MockTransport::new());
/// mock.stub(Method::Get, "shopinfo", json!({"name": "Milestone Shop"}));
///
/// let locales = Arc::new(Locales::new(Arc::clone(&mock)));
/// let info = LocalizedInformation::new("shopinfo", Arc::clone(&mock), locales);
///
/// let locale = LocaleTag::new("en_GB").unwrap();
/// assert_eq!(info.name(&locale).await.as_deref(), Some("Milestone Shop"));
/// # }
/// ```
#[derive(Debug)]
pub struct LocalizedInformation<T> {
    transport: Arc<T>,
    locales: Arc<Locales<T>>,
    rest_path: String,
    fields: Mutex<Fields>,
}

impl<T: Transport> LocalizedInformation<T> {
    /// Creates an empty cache for the resource at `rest_path`.
    #[must_use]
    pub fn new(rest_path: impl Into<String>, transport: Arc<T>, locales: Arc<Locales<T>>) -> Self {
        Self {
            transport,
            locales,
            rest_path: rest_path.into(),
            fields: Mutex::new(Fields::default()),
        }
    }

    /// Returns the name in the given localization.
    pub async fn name(&self, locale: &LocaleTag) -> Option<String> {
        self.get(TextField::Name, locale).await
    }

    /// Returns the name in the shop's default localization, or `None` when
    /// no default locale is known.
    pub async fn default_name(&self) -> Option<String> {
        let locale = self.locales.default_locale().await?;
        self.name(&locale).await
    }

    /// Returns the navigation caption in the given localization.
    pub async fn navigation_caption(&self, locale: &LocaleTag) -> Option<String> {
        self.get(TextField::NavigationCaption, locale).await
    }

    /// Returns the navigation caption in the shop's default localization.
    pub async fn default_navigation_caption(&self) -> Option<String> {
        let locale = self.locales.default_locale().await?;
        self.navigation_caption(&locale).await
    }

    /// Returns the description in the given localization.
    pub async fn description(&self, locale: &LocaleTag) -> Option<String> {
        self.get(TextField::Description, locale).await
    }

    /// Returns the description in the shop's default localization.
    pub async fn default_description(&self) -> Option<String> {
        let locale = self.locales.default_locale().await?;
        self.description(&locale).await
    }

    /// Sets the name for the given localization. Returns whether the update
    /// was accepted by the backend.
    pub async fn set_name(&self, value: &str, locale: &LocaleTag) -> bool {
        self.put(TextField::Name, value, locale).await
    }

    /// Sets the name for the shop's default localization.
    pub async fn set_default_name(&self, value: &str) -> bool {
        match self.locales.default_locale().await {
            Some(locale) => self.set_name(value, &locale).await,
            None => false,
        }
    }

    /// Sets the navigation caption for the given localization.
    pub async fn set_navigation_caption(&self, value: &str, locale: &LocaleTag) -> bool {
        self.put(TextField::NavigationCaption, value, locale).await
    }

    /// Sets the navigation caption for the shop's default localization.
    pub async fn set_default_navigation_caption(&self, value: &str) -> bool {
        match self.locales.default_locale().await {
            Some(locale) => self.set_navigation_caption(value, &locale).await,
            None => false,
        }
    }

    /// Sets the description for the given localization.
    pub async fn set_description(&self, value: &str, locale: &LocaleTag) -> bool {
        self.put(TextField::Description, value, locale).await
    }

    /// Sets the description for the shop's default localization.
    pub async fn set_default_description(&self, value: &str) -> bool {
        match self.locales.default_locale().await {
            Some(locale) => self.set_description(value, &locale).await,
            None => false,
        }
    }

    /// Returns a field for a locale, fetching once when it is not cached.
    ///
    /// Still-absent after the fetch means "no value for this locale" and is
    /// not an error.
    async fn get(&self, field: TextField, locale: &LocaleTag) -> Option<String> {
        let mut fields = self.fields.lock().await;
        if !fields.map(field).contains_key(locale) {
            self.load(locale, &mut fields).await;
        }
        fields.map(field).get(locale).cloned()
    }

    /// Loads the resource for one locale.
    ///
    /// Any failure is a silent no-op: the cache keeps every value it
    /// already holds. A successful response replaces all three fields
    /// wholesale.
    async fn load(&self, locale: &LocaleTag, fields: &mut Fields) {
        if !self.transport.allows(Method::Get) {
            return;
        }

        let Ok(content) = self
            .transport
            .send_localized(Method::Get, &self.rest_path, locale, None)
            .await
        else {
            return;
        };

        fields.reset();
        fields.absorb(locale, &content);
    }

    /// Sends one changed field to the backend.
    ///
    /// A non-empty echo repopulates the cache for all three fields from the
    /// response, since the backend may rewrite the other two.
    async fn put(&self, field: TextField, value: &str, locale: &LocaleTag) -> bool {
        if validator::is_empty(value) {
            tracing::warn!("refusing to set empty {} on {}", field.key(), self.rest_path);
            return false;
        }

        if !self.transport.allows(Method::Put) {
            return false;
        }

        let payload = json!({ field.key(): value });

        let Ok(content) = self
            .transport
            .send_localized(Method::Put, &self.rest_path, locale, Some(payload))
            .await
        else {
            return false;
        };

        let mut fields = self.fields.lock().await;
        fields.reset();
        fields.absorb(locale, &content);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockTransport;

    fn locale(tag: &str) -> LocaleTag {
        LocaleTag::new(tag).unwrap()
    }

    fn info_with_registry(
        mock: &Arc<MockTransport>,
    ) -> LocalizedInformation<MockTransport> {
        mock.stub(
            Method::Get,
            "locales",
            json!({"default": "en_GB", "items": ["en_GB", "de_DE"]}),
        );
        let locales = Arc::new(Locales::new(Arc::clone(mock)));
        LocalizedInformation::new("shopinfo", Arc::clone(mock), locales)
    }

    #[tokio::test]
    async fn test_get_fetches_once_per_locale() {
        let mock = Arc::new(MockTransport::new());
        let info = info_with_registry(&mock);
        mock.stub(Method::Get, "shopinfo", json!({"name": "Shop"}));

        let en = locale("en_GB");
        assert_eq!(info.name(&en).await.as_deref(), Some("Shop"));
        assert_eq!(info.name(&en).await.as_deref(), Some("Shop"));
        assert_eq!(mock.call_count(Method::Get, "shopinfo"), 1);
    }

    #[tokio::test]
    async fn test_absent_field_after_fetch_is_none_not_error() {
        let mock = Arc::new(MockTransport::new());
        let info = info_with_registry(&mock);
        mock.stub(Method::Get, "shopinfo", json!({"name": "Shop"}));

        let en = locale("en_GB");
        assert!(info.description(&en).await.is_none());
        // The name from the same response is cached.
        assert_eq!(info.name(&en).await.as_deref(), Some("Shop"));
    }

    #[tokio::test]
    async fn test_default_getters_resolve_registry_default() {
        let mock = Arc::new(MockTransport::new());
        let info = info_with_registry(&mock);
        mock.stub(
            Method::Get,
            "shopinfo",
            json!({"name": "Shop", "navigationCaption": "Home", "description": "About"}),
        );

        assert_eq!(info.default_name().await.as_deref(), Some("Shop"));
        assert_eq!(info.default_navigation_caption().await.as_deref(), Some("Home"));
        assert_eq!(info.default_description().await.as_deref(), Some("About"));
    }

    #[tokio::test]
    async fn test_default_getters_are_none_without_registry_default() {
        let mock = Arc::new(MockTransport::new());
        let locales = Arc::new(Locales::new(Arc::clone(&mock)));
        let info = LocalizedInformation::new("shopinfo", Arc::clone(&mock), locales);

        assert!(info.default_name().await.is_none());
        // No resource fetch happened, only the (failed) locales load.
        assert_eq!(mock.call_count(Method::Get, "shopinfo"), 0);
    }

    #[tokio::test]
    async fn test_set_then_get_echoes_value() {
        let mock = Arc::new(MockTransport::new());
        let info = info_with_registry(&mock);
        mock.stub(Method::Put, "shopinfo", json!({"name": "New Name"}));

        let en = locale("en_GB");
        assert!(info.set_name("New Name", &en).await);
        assert_eq!(info.name(&en).await.as_deref(), Some("New Name"));
        // The set already populated the cache; no extra GET was needed.
        assert_eq!(mock.call_count(Method::Get, "shopinfo"), 0);
    }

    #[tokio::test]
    async fn test_set_refreshes_all_three_fields_from_echo() {
        let mock = Arc::new(MockTransport::new());
        let info = info_with_registry(&mock);
        mock.stub(
            Method::Put,
            "shopinfo",
            json!({"name": "New", "navigationCaption": "Rewritten", "description": "Also new"}),
        );

        let en = locale("en_GB");
        assert!(info.set_name("New", &en).await);
        assert_eq!(info.navigation_caption(&en).await.as_deref(), Some("Rewritten"));
        assert_eq!(info.description(&en).await.as_deref(), Some("Also new"));
        assert_eq!(mock.call_count(Method::Get, "shopinfo"), 0);
    }

    #[tokio::test]
    async fn test_set_empty_value_is_rejected_without_remote_call() {
        let mock = Arc::new(MockTransport::new());
        let info = info_with_registry(&mock);

        let en = locale("en_GB");
        assert!(!info.set_name("", &en).await);
        assert_eq!(mock.call_count(Method::Put, "shopinfo"), 0);
    }

    #[tokio::test]
    async fn test_refused_put_verb_aborts_without_side_effects() {
        let mock = Arc::new(MockTransport::new());
        let info = info_with_registry(&mock);
        mock.stub(Method::Get, "shopinfo", json!({"name": "Old"}));
        mock.deny(Method::Put);

        let en = locale("en_GB");
        assert_eq!(info.name(&en).await.as_deref(), Some("Old"));
        assert!(!info.set_name("New", &en).await);
        assert_eq!(info.name(&en).await.as_deref(), Some("Old"));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_values_for_other_locales() {
        let mock = Arc::new(MockTransport::new());
        let info = info_with_registry(&mock);
        mock.stub(Method::Get, "shopinfo", json!({"name": "English"}));

        let en = locale("en_GB");
        assert_eq!(info.name(&en).await.as_deref(), Some("English"));

        // Backend goes silent; fetching another locale must not evict en_GB.
        mock.unstub(Method::Get, "shopinfo");
        let de = locale("de_DE");
        assert!(info.name(&de).await.is_none());
        assert_eq!(info.name(&en).await.as_deref(), Some("English"));
    }

    #[tokio::test]
    async fn test_successful_reload_is_authoritative() {
        let mock = Arc::new(MockTransport::new());
        let info = info_with_registry(&mock);
        mock.stub(Method::Get, "shopinfo", json!({"name": "English"}));

        let en = locale("en_GB");
        info.name(&en).await;

        // A successful fetch for another locale replaces everything,
        // including en_GB values from the earlier load.
        mock.stub(Method::Get, "shopinfo", json!({"name": "Deutsch"}));
        let de = locale("de_DE");
        assert_eq!(info.name(&de).await.as_deref(), Some("Deutsch"));
        // en_GB is gone until re-fetched; the next get re-loads it.
        assert_eq!(mock.call_count(Method::Get, "shopinfo"), 2);
        assert_eq!(info.name(&en).await.as_deref(), Some("Deutsch"));
        assert_eq!(mock.call_count(Method::Get, "shopinfo"), 3);
    }
}
