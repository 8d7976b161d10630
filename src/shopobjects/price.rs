//! Price value objects.
//!
//! A price fragment in the wire format looks like
//! `{"amount": 1.99, "taxType": "GROSS", "currency": "EUR"}`. Fragments are
//! frequently partial, so every field parses independently and an absent or
//! malformed field degrades to `None` instead of discarding the whole price.

use crate::config::CurrencyCode;
use serde_json::Value;
use std::fmt;

/// Whether a price amount includes tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxType {
    /// Tax included.
    Gross,
    /// Tax not included.
    Net,
}

impl TaxType {
    /// Parses the wire representation, `"GROSS"` or `"NET"`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "GROSS" => Some(Self::Gross),
            "NET" => Some(Self::Net),
            _ => None,
        }
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gross => "GROSS",
            Self::Net => "NET",
        }
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monetary amount with tax type and currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    amount: Option<f64>,
    tax_type: Option<TaxType>,
    currency: Option<CurrencyCode>,
}

impl Price {
    /// Parses a price fragment.
    ///
    /// Every field degrades independently; a fragment that is not even an
    /// object yields a price with all fields absent.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            amount: value.get("amount").and_then(Value::as_f64),
            tax_type: value
                .get("taxType")
                .and_then(Value::as_str)
                .and_then(TaxType::parse),
            currency: value
                .get("currency")
                .and_then(Value::as_str)
                .and_then(|code| CurrencyCode::new(code).ok()),
        }
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> Option<f64> {
        self.amount
    }

    /// Returns the tax type.
    #[must_use]
    pub const fn tax_type(&self) -> Option<TaxType> {
        self.tax_type
    }

    /// Returns the currency.
    #[must_use]
    pub const fn currency(&self) -> Option<&CurrencyCode> {
        self.currency.as_ref()
    }
}

/// The quantity a price refers to, e.g. "per 100 g".
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    amount: Option<f64>,
    unit: Option<String>,
}

impl Quantity {
    /// Parses a quantity fragment of the form `{"amount": 1, "unit": "piece(s)"}`.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            amount: value.get("amount").and_then(Value::as_f64),
            unit: value
                .get("unit")
                .and_then(Value::as_str)
                .map(ToString::to_string),
        }
    }

    /// Returns the quantity amount.
    #[must_use]
    pub const fn amount(&self) -> Option<f64> {
        self.amount
    }

    /// Returns the quantity unit.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
}

/// A price together with the quantity it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceWithQuantity {
    price: Price,
    quantity: Quantity,
}

impl PriceWithQuantity {
    /// Builds from separate price and quantity fragments.
    #[must_use]
    pub fn from_values(price: &Value, quantity: &Value) -> Self {
        Self {
            price: Price::from_value(price),
            quantity: Quantity::from_value(quantity),
        }
    }

    /// Returns the price.
    #[must_use]
    pub const fn price(&self) -> &Price {
        &self.price
    }

    /// Returns the quantity.
    #[must_use]
    pub const fn quantity(&self) -> &Quantity {
        &self.quantity
    }
}
