//! Custom product attributes.

use serde_json::Value;

/// One custom attribute of a product.
///
/// Parsed from an entry of the `items` array the custom-attributes
/// sub-resource answers with. Fields degrade independently; only entries
/// that are not objects at all are dropped by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAttribute {
    name: Option<String>,
    attribute_type: Option<String>,
    values: Vec<String>,
}

impl ProductAttribute {
    /// Parses an attribute fragment.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let values = value
            .get("values")
            .and_then(Value::as_array)
            .map(|array| {
                array
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: value
                .get("name")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            attribute_type: value
                .get("type")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            values,
        }
    }

    /// Returns the attribute name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the attribute type reported by the backend.
    #[must_use]
    pub fn attribute_type(&self) -> Option<&str> {
        self.attribute_type.as_deref()
    }

    /// Returns the attribute's values.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}
