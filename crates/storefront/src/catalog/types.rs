//! Domain types for the product catalog.
//!
//! These types mirror what the external catalog provider supplies. They are
//! plain data: all derived answers (variant matching, availability, totals)
//! live in the snapshot and index layers.

use std::collections::BTreeMap;

use pawmart_core::{CollectionId, Money, ProductId, VariantId};
use serde::{Deserialize, Serialize};

/// Product option definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option name (e.g., "Size"), unique within a product.
    pub name: String,
    /// Allowed values in display order (e.g., `["S", "M", "L"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of option values).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: VariantId,
    /// Chosen value per option name; must cover every product option exactly once.
    pub selected_options: BTreeMap<String, String>,
    /// Current price in minor units.
    pub price: Money,
    /// Compare-at price (original price if on sale).
    pub compare_at_price: Option<Money>,
    /// Stock on hand; `None` means inventory is untracked (always available).
    pub stock: Option<i64>,
}

impl ProductVariant {
    /// Effective stock check: untracked inventory counts as available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.is_none_or(|s| s > 0)
    }
}

/// A product in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Product tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the product is merchandised as featured.
    #[serde(default)]
    pub featured: bool,
    /// Product options in display order.
    #[serde(default)]
    pub options: Vec<ProductOption>,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Look up an option by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Whether any variant has effective stock.
    #[must_use]
    pub fn any_in_stock(&self) -> bool {
        self.variants.iter().any(ProductVariant::in_stock)
    }
}

/// A merchandised collection of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: CollectionId,
    /// URL handle.
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Collection image URL.
    pub image: Option<String>,
    /// Member products in display order.
    pub product_ids: Vec<ProductId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: i32, stock: Option<i64>) -> ProductVariant {
        ProductVariant {
            id: VariantId::new(id),
            selected_options: BTreeMap::new(),
            price: Money::from_cents(1000),
            compare_at_price: None,
            stock,
        }
    }

    #[test]
    fn test_in_stock_untracked() {
        assert!(variant(1, None).in_stock());
    }

    #[test]
    fn test_in_stock_tracked() {
        assert!(variant(1, Some(5)).in_stock());
        assert!(!variant(1, Some(0)).in_stock());
    }

    #[test]
    fn test_any_in_stock() {
        let product = Product {
            id: ProductId::new(1),
            handle: "cat-bed".to_string(),
            title: "Cat Bed".to_string(),
            description: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
            featured: false,
            options: Vec::new(),
            variants: vec![variant(1, Some(0)), variant(2, Some(3))],
        };
        assert!(product.any_in_stock());
    }
}
