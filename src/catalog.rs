//! Read-only product catalog
//!
//! The catalog is built once at startup and handed to the agent. It is
//! serialized in full into every prompt, so entries are kept in insertion
//! order to make that rendering deterministic.

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Stock level shown to customers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Availability {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Limited Stock")]
    LimitedStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl Availability {
    pub fn label(self) -> &'static str {
        match self {
            Availability::InStock => "In Stock",
            Availability::LimitedStock => "Limited Stock",
            Availability::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub price: Decimal,
    pub specs: String,
    pub availability: Availability,
    pub category: String,
}

impl Product {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        specs: impl Into<String>,
        availability: Availability,
        category: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            price,
            specs: specs.into(),
            availability,
            category: category.into(),
        }
    }
}

/// Catalog construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Product key must not be empty")]
    EmptyKey,
    #[error("Duplicate product key: {0}")]
    DuplicateKey(String),
    #[error("Product {key} has a negative price: {price}")]
    NegativePrice { key: String, price: Decimal },
}

/// Immutable mapping from product key to product
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Validate and build a catalog. Keys must be unique and non-empty, prices non-negative.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if product.key.trim().is_empty() {
                return Err(CatalogError::EmptyKey);
            }
            if !seen.insert(product.key.as_str()) {
                return Err(CatalogError::DuplicateKey(product.key.clone()));
            }
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice {
                    key: product.key.clone(),
                    price: product.price,
                });
            }
        }
        Ok(Self { products })
    }

    /// The electronics store inventory the assistant ships with.
    pub fn electronics_store() -> Self {
        let electronics = |key: &str, name: &str, cents: i64, specs: &str, availability| {
            Product::new(
                key,
                name,
                Decimal::new(cents, 2),
                specs,
                availability,
                "Electronics",
            )
        };

        Self {
            products: vec![
                electronics(
                    "laptop",
                    "ProBook X1",
                    99_999,
                    "13-inch, 16GB RAM, 512GB SSD",
                    Availability::InStock,
                ),
                electronics(
                    "headphones",
                    "SoundMax Pro",
                    14_999,
                    "Wireless, Noise-cancelling",
                    Availability::LimitedStock,
                ),
                electronics(
                    "smartphone",
                    "GalaxyTech Pro",
                    89_999,
                    "6.7-inch OLED, 256GB Storage, 5G",
                    Availability::InStock,
                ),
                electronics(
                    "smartwatch",
                    "FitTrack Elite",
                    29_999,
                    "Always-on Display, Heart Rate, GPS",
                    Availability::InStock,
                ),
                electronics(
                    "tablet",
                    "SlateBook Air",
                    64_999,
                    "10.9-inch, 128GB, WiFi+5G",
                    Availability::LimitedStock,
                ),
                electronics(
                    "camera",
                    "PhotoPro X100",
                    129_999,
                    "24MP, 4K Video, Mirrorless",
                    Availability::InStock,
                ),
            ],
        }
    }

    /// Look up a product by key. Unknown keys are `None`, not an error.
    pub fn lookup(&self, key: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Pretty-printed JSON object keyed by product key, as embedded in prompts
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to serialize catalog");
            "{}".to_string()
        })
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.products.len()))?;
        for product in &self.products {
            map.serialize_entry(&product.key, product)?;
        }
        map.end()
    }
}
