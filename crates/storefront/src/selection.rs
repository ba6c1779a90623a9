//! Per-card option selection state machine.
//!
//! Each rendered product card owns one `ProductSelection`. Every accepted
//! choice re-resolves the matching variant through the catalog's variant
//! index; choices that the index reports as unavailable are rejected outright
//! so the UI can never force an out-of-stock or nonexistent combination.

use std::collections::BTreeMap;

use pawmart_core::{ProductId, VariantId};
use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::error::{Result, StorefrontError};

/// Where the in-progress selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    /// No options chosen yet.
    Empty,
    /// Some but not all options chosen.
    Partial,
    /// All options chosen and resolved to a variant.
    Complete,
    /// All options chosen but the combination no longer exists. Unreachable
    /// through `select` alone; a catalog refresh can strand a selection here.
    CompleteNoMatch,
}

/// The user's in-progress option choices for one product card.
#[derive(Debug, Clone)]
pub struct ProductSelection {
    product_id: ProductId,
    chosen: BTreeMap<String, String>,
    status: SelectionStatus,
    matched: Option<VariantId>,
}

impl ProductSelection {
    /// Start a fresh selection for a product.
    ///
    /// A product with zero options and a single variant is born `Complete`:
    /// there is nothing for the user to choose.
    ///
    /// # Errors
    ///
    /// `UnknownProduct` if the product is not in the snapshot.
    pub fn new(catalog: &CatalogSnapshot, product_id: ProductId) -> Result<Self> {
        let mut selection = Self {
            product_id,
            chosen: BTreeMap::new(),
            status: SelectionStatus::Empty,
            matched: None,
        };
        selection.evaluate(catalog)?;
        Ok(selection)
    }

    /// The product this selection is bound to.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> SelectionStatus {
        self.status
    }

    /// The variant the current (complete) selection resolves to.
    #[must_use]
    pub const fn matched_variant(&self) -> Option<VariantId> {
        self.matched
    }

    /// The chosen value for an option, if any.
    #[must_use]
    pub fn selected_value(&self, option: &str) -> Option<&str> {
        self.chosen.get(option).map(String::as_str)
    }

    /// The full set of chosen options.
    #[must_use]
    pub const fn chosen(&self) -> &BTreeMap<String, String> {
        &self.chosen
    }

    /// Whether the UI should offer `value` for `option` given current choices.
    #[must_use]
    pub fn value_available(&self, catalog: &CatalogSnapshot, option: &str, value: &str) -> bool {
        catalog
            .index(self.product_id)
            .is_some_and(|index| index.is_value_available(option, value, &self.chosen))
    }

    /// Choose a value for an option, replacing any prior choice on that axis.
    ///
    /// # Errors
    ///
    /// Rejected without state change when the option or value is not declared
    /// by the product (`UnknownOption` / `UnknownValue`) or when no
    /// purchasable variant is reachable through it (`ValueUnavailable`).
    pub fn select(&mut self, catalog: &CatalogSnapshot, option: &str, value: &str) -> Result<()> {
        let product = catalog
            .product(self.product_id)
            .ok_or(StorefrontError::UnknownProduct(self.product_id))?;
        let declared = product
            .option(option)
            .ok_or_else(|| StorefrontError::UnknownOption(option.to_string()))?;
        if !declared.values.iter().any(|v| v == value) {
            return Err(StorefrontError::UnknownValue {
                option: option.to_string(),
                value: value.to_string(),
            });
        }
        if !self.value_available(catalog, option, value) {
            debug!(
                product = %self.product_id,
                option,
                value,
                "Rejected unavailable option value"
            );
            return Err(StorefrontError::ValueUnavailable {
                option: option.to_string(),
                value: value.to_string(),
            });
        }

        self.chosen.insert(option.to_string(), value.to_string());
        self.evaluate(catalog)
    }

    /// Clear all choices, returning to the initial state for this product.
    ///
    /// # Errors
    ///
    /// `UnknownProduct` if the product has left the snapshot.
    pub fn reset(&mut self, catalog: &CatalogSnapshot) -> Result<()> {
        self.chosen.clear();
        self.evaluate(catalog)
    }

    /// Bind this card to a different product, discarding all choices.
    ///
    /// # Errors
    ///
    /// `UnknownProduct` if the new product is not in the snapshot.
    pub fn rebind(&mut self, catalog: &CatalogSnapshot, product_id: ProductId) -> Result<()> {
        self.product_id = product_id;
        self.reset(catalog)
    }

    /// Re-resolve against a refreshed catalog snapshot.
    ///
    /// Keeps the chosen values; a combination that vanished from the catalog
    /// leaves the selection in `CompleteNoMatch`.
    ///
    /// # Errors
    ///
    /// `UnknownProduct` if the product has left the snapshot.
    pub fn refresh(&mut self, catalog: &CatalogSnapshot) -> Result<()> {
        self.evaluate(catalog)
    }

    /// Whether the matched variant can go into the cart right now.
    #[must_use]
    pub fn can_add_to_cart(&self, catalog: &CatalogSnapshot) -> bool {
        if self.status != SelectionStatus::Complete {
            return false;
        }
        self.matched
            .and_then(|variant| catalog.variant(self.product_id, variant))
            .is_some_and(crate::catalog::ProductVariant::in_stock)
    }

    /// Recompute status and matched variant from the index.
    fn evaluate(&mut self, catalog: &CatalogSnapshot) -> Result<()> {
        let index = catalog
            .index(self.product_id)
            .ok_or(StorefrontError::UnknownProduct(self.product_id))?;

        self.matched = index.match_variant(&self.chosen);
        self.status = if self.chosen.len() < index.option_count() {
            if self.chosen.is_empty() {
                SelectionStatus::Empty
            } else {
                SelectionStatus::Partial
            }
        } else if self.matched.is_some() {
            SelectionStatus::Complete
        } else {
            SelectionStatus::CompleteNoMatch
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pawmart_core::Money;

    use super::*;
    use crate::catalog::{Product, ProductOption, ProductVariant};

    fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    /// Size S is out of stock, M has 5 on hand.
    fn cat_bed_catalog() -> CatalogSnapshot {
        let product = Product {
            id: ProductId::new(1),
            handle: "cat-bed".to_string(),
            title: "Cat Bed".to_string(),
            description: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
            featured: false,
            options: vec![ProductOption {
                name: "Size".to_string(),
                values: vec!["S".to_string(), "M".to_string()],
            }],
            variants: vec![
                ProductVariant {
                    id: VariantId::new(11),
                    selected_options: mapping(&[("Size", "S")]),
                    price: Money::from_cents(1000),
                    compare_at_price: None,
                    stock: Some(0),
                },
                ProductVariant {
                    id: VariantId::new(12),
                    selected_options: mapping(&[("Size", "M")]),
                    price: Money::from_cents(1200),
                    compare_at_price: None,
                    stock: Some(5),
                },
            ],
        };
        CatalogSnapshot::new(vec![product], Vec::new()).expect("valid catalog")
    }

    #[test]
    fn test_starts_empty() {
        let catalog = cat_bed_catalog();
        let selection = ProductSelection::new(&catalog, ProductId::new(1)).expect("product");
        assert_eq!(selection.status(), SelectionStatus::Empty);
        assert_eq!(selection.matched_variant(), None);
        assert!(!selection.can_add_to_cart(&catalog));
    }

    #[test]
    fn test_unknown_product() {
        let catalog = cat_bed_catalog();
        let err = ProductSelection::new(&catalog, ProductId::new(9)).expect_err("missing");
        assert_eq!(err, StorefrontError::UnknownProduct(ProductId::new(9)));
    }

    #[test]
    fn test_out_of_stock_value_rejected() {
        let catalog = cat_bed_catalog();
        let mut selection = ProductSelection::new(&catalog, ProductId::new(1)).expect("product");
        let err = selection
            .select(&catalog, "Size", "S")
            .expect_err("S is out of stock");
        assert!(matches!(err, StorefrontError::ValueUnavailable { .. }));
        // State unchanged; nothing purchasable
        assert_eq!(selection.status(), SelectionStatus::Empty);
        assert!(!selection.can_add_to_cart(&catalog));
    }

    #[test]
    fn test_complete_selection_purchasable() {
        let catalog = cat_bed_catalog();
        let mut selection = ProductSelection::new(&catalog, ProductId::new(1)).expect("product");
        selection.select(&catalog, "Size", "M").expect("available");
        assert_eq!(selection.status(), SelectionStatus::Complete);
        assert_eq!(selection.matched_variant(), Some(VariantId::new(12)));
        assert_eq!(selection.selected_value("Size"), Some("M"));
        assert!(selection.can_add_to_cart(&catalog));
    }

    #[test]
    fn test_unknown_option_and_value() {
        let catalog = cat_bed_catalog();
        let mut selection = ProductSelection::new(&catalog, ProductId::new(1)).expect("product");
        assert!(matches!(
            selection.select(&catalog, "Color", "Blue"),
            Err(StorefrontError::UnknownOption(_))
        ));
        assert!(matches!(
            selection.select(&catalog, "Size", "XL"),
            Err(StorefrontError::UnknownValue { .. })
        ));
        assert_eq!(selection.status(), SelectionStatus::Empty);
    }

    #[test]
    fn test_reset_and_rebind() {
        let catalog = cat_bed_catalog();
        let mut selection = ProductSelection::new(&catalog, ProductId::new(1)).expect("product");
        selection.select(&catalog, "Size", "M").expect("available");
        selection.reset(&catalog).expect("same product");
        assert_eq!(selection.status(), SelectionStatus::Empty);
        assert_eq!(selection.chosen().len(), 0);

        let err = selection
            .rebind(&catalog, ProductId::new(9))
            .expect_err("missing");
        assert!(matches!(err, StorefrontError::UnknownProduct(_)));
    }

    #[test]
    fn test_single_variant_product_implicitly_complete() {
        let product = Product {
            id: ProductId::new(2),
            handle: "catnip".to_string(),
            title: "Catnip".to_string(),
            description: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
            featured: false,
            options: Vec::new(),
            variants: vec![ProductVariant {
                id: VariantId::new(21),
                selected_options: BTreeMap::new(),
                price: Money::from_cents(500),
                compare_at_price: None,
                stock: None,
            }],
        };
        let catalog = CatalogSnapshot::new(vec![product], Vec::new()).expect("valid catalog");
        let selection = ProductSelection::new(&catalog, ProductId::new(2)).expect("product");
        assert_eq!(selection.status(), SelectionStatus::Complete);
        assert_eq!(selection.matched_variant(), Some(VariantId::new(21)));
        assert!(selection.can_add_to_cart(&catalog));
    }

    #[test]
    fn test_catalog_refresh_can_strand_selection() {
        let catalog = cat_bed_catalog();
        let mut selection = ProductSelection::new(&catalog, ProductId::new(1)).expect("product");
        selection.select(&catalog, "Size", "M").expect("available");

        // The M variant disappears in the refreshed snapshot
        let mut product = catalog.product(ProductId::new(1)).expect("product").clone();
        product.variants.retain(|v| v.id != VariantId::new(12));
        let refreshed = CatalogSnapshot::new(vec![product], Vec::new()).expect("valid catalog");

        selection.refresh(&refreshed).expect("product still listed");
        assert_eq!(selection.status(), SelectionStatus::CompleteNoMatch);
        assert_eq!(selection.matched_variant(), None);
        assert!(!selection.can_add_to_cart(&refreshed));
    }
}
