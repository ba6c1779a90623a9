//! Display-ready projections for the presentation layer.
//!
//! Templates never touch engine state directly; they render these plain
//! structs. Views are deliberately lenient: a cart line whose variant left
//! the catalog is skipped with a warning rather than failing the whole
//! render (strictness lives in the cart operations themselves).

use pawmart_core::Money;
use tracing::warn;

use crate::cart::Cart;
use crate::catalog::{CatalogSnapshot, Product};
use crate::config::DisplayConfig;
use crate::pricing;
use crate::selection::{ProductSelection, SelectionStatus};

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub handle: String,
    pub title: String,
    /// Joined option values ("M / Gray"); `None` for single-variant products.
    pub variant_title: Option<String>,
    pub quantity: i64,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: i64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(config: &DisplayConfig) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Money::ZERO.display(config.currency),
            item_count: 0,
        }
    }

    /// Project the cart against the current catalog.
    #[must_use]
    pub fn build(cart: &Cart, catalog: &CatalogSnapshot, config: &DisplayConfig) -> Self {
        let mut items = Vec::with_capacity(cart.lines().len());
        let mut subtotal = Money::ZERO;
        let mut item_count = 0;

        for line in cart.lines() {
            let Some(product) = catalog.product(line.product_id) else {
                warn!(product = %line.product_id, "Skipping cart line for unlisted product");
                continue;
            };
            let Some(variant) = catalog.variant(line.product_id, line.variant_id) else {
                warn!(
                    product = %line.product_id,
                    variant = %line.variant_id,
                    "Skipping cart line for unlisted variant"
                );
                continue;
            };

            let line_price = variant
                .price
                .checked_mul(line.quantity)
                .unwrap_or(Money::ZERO);
            subtotal = subtotal.checked_add(line_price).unwrap_or(subtotal);
            item_count += line.quantity;

            items.push(CartItemView {
                handle: product.handle.clone(),
                title: product.title.clone(),
                variant_title: variant_title(product, variant.id),
                quantity: line.quantity,
                price: variant.price.display(config.currency),
                line_price: line_price.display(config.currency),
                image: product.images.first().cloned(),
            });
        }

        Self {
            items,
            subtotal: subtotal.display(config.currency),
            item_count,
        }
    }
}

/// Product card display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub handle: String,
    pub title: String,
    /// Matched variant's price when the selection is complete, otherwise the
    /// cheapest variant (the "from" price).
    pub price: String,
    /// Compare-at price of the priced variant, when it is on sale.
    pub compare_at: Option<String>,
    pub discount_percentage: Option<u32>,
    pub featured: bool,
    pub in_stock: bool,
    pub can_add_to_cart: bool,
    pub image: Option<String>,
}

impl ProductCardView {
    /// Project one product card from its selection state.
    #[must_use]
    pub fn build(
        selection: &ProductSelection,
        catalog: &CatalogSnapshot,
        config: &DisplayConfig,
    ) -> Option<Self> {
        let product = catalog.product(selection.product_id())?;

        let priced = match selection.status() {
            SelectionStatus::Complete => selection
                .matched_variant()
                .and_then(|v| catalog.variant(product.id, v)),
            _ => product.variants.iter().min_by_key(|v| v.price),
        };

        let (price, compare_at, discount) = priced.map_or_else(
            || (Money::ZERO.display(config.currency), None, None),
            |variant| {
                let compare_at = pricing::has_discount(variant)
                    .then(|| variant.compare_at_price.map(|p| p.display(config.currency)))
                    .flatten();
                (
                    variant.price.display(config.currency),
                    compare_at,
                    pricing::discount_percentage(variant),
                )
            },
        );

        Some(Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            price,
            compare_at,
            discount_percentage: discount,
            featured: pricing::is_featured(product),
            in_stock: product.any_in_stock(),
            can_add_to_cart: selection.can_add_to_cart(catalog),
            image: product.images.first().cloned(),
        })
    }
}

/// Header badge label for the cart item total.
///
/// Totals above the configured cap render as "99+"-style labels. Display
/// rule only - the underlying total is never capped.
#[must_use]
pub fn badge_label(total_items: i64, config: &DisplayConfig) -> String {
    if total_items > config.badge_cap {
        format!("{}+", config.badge_cap)
    } else {
        total_items.to_string()
    }
}

/// Variant display title: option values in declaration order, or `None` when
/// the product has no options to distinguish by.
fn variant_title(product: &Product, variant_id: pawmart_core::VariantId) -> Option<String> {
    let variant = product.variants.iter().find(|v| v.id == variant_id)?;
    if product.options.is_empty() {
        return None;
    }
    let parts: Vec<&str> = product
        .options
        .iter()
        .filter_map(|o| variant.selected_options.get(&o.name).map(String::as_str))
        .collect();
    Some(parts.join(" / "))
}
