//! Session cart aggregation.
//!
//! One cart per session, created empty and mutated only by explicit user
//! intents. Lines are unique per (product, variant) pair; re-adding a pair
//! increments its quantity instead of appending a duplicate line. Totals are
//! always computed from the current catalog snapshot, so a mid-session price
//! change shows up in the subtotal immediately (expected drift, not a bug).

use chrono::{DateTime, Utc};
use pawmart_core::{Money, ProductId, VariantId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::error::{Result, StorefrontError};

/// One (product, variant, quantity) entry in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Owning product.
    pub product_id: ProductId,
    /// Concrete purchasable variant.
    pub variant_id: VariantId,
    /// Always >= 1; a line at zero is removed, never kept.
    pub quantity: i64,
}

/// Serializable cart view for external session persistence.
///
/// The engine does not define a storage format; it hands this ordered line
/// list to whatever the host wants to persist it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Lines in cart order.
    pub lines: Vec<CartLine>,
}

/// The session shopping cart.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart at session start.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Lines in cart order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// When the cart was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the cart was last mutated.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Add `quantity` of a variant, merging into an existing line if present.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` if `quantity < 1`; `UnknownVariant` if the
    /// (product, variant) pair is not in the catalog snapshot. The cart is
    /// unchanged on error.
    pub fn add_item(
        &mut self,
        catalog: &CatalogSnapshot,
        product_id: ProductId,
        variant_id: VariantId,
        quantity: i64,
    ) -> Result<()> {
        if quantity < 1 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }
        if catalog.variant(product_id, variant_id).is_none() {
            return Err(StorefrontError::UnknownVariant {
                product: product_id,
                variant: variant_id,
            });
        }

        if let Some(line) = self.line_mut(product_id, variant_id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id,
                variant_id,
                quantity,
            });
        }
        self.touch();
        debug!(%product_id, %variant_id, quantity, "Added to cart");
        Ok(())
    }

    /// Set a line's quantity; zero removes the line entirely.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` for negative quantities; `LineNotFound` if no line
    /// exists for the pair. The cart is unchanged on error.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        variant_id: VariantId,
        quantity: i64,
    ) -> Result<()> {
        if quantity < 0 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }
        if self.line_mut(product_id, variant_id).is_none() {
            return Err(StorefrontError::LineNotFound {
                product: product_id,
                variant: variant_id,
            });
        }

        if quantity == 0 {
            self.lines
                .retain(|l| !(l.product_id == product_id && l.variant_id == variant_id));
            debug!(%product_id, %variant_id, "Removed cart line via zero quantity");
        } else if let Some(line) = self.line_mut(product_id, variant_id) {
            line.quantity = quantity;
            debug!(%product_id, %variant_id, quantity, "Updated cart line");
        }
        self.touch();
        Ok(())
    }

    /// Remove a line if present; removing an absent line is a no-op.
    pub fn remove_item(&mut self, product_id: ProductId, variant_id: VariantId) {
        let before = self.lines.len();
        self.lines
            .retain(|l| !(l.product_id == product_id && l.variant_id == variant_id));
        if self.lines.len() != before {
            self.touch();
            debug!(%product_id, %variant_id, "Removed cart line");
        }
    }

    /// Drop every line (checkout completion or explicit clear).
    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.touch();
            debug!("Cleared cart");
        }
    }

    /// Sum of line quantities (not line count).
    #[must_use]
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of quantity x current catalog price over all lines.
    ///
    /// Prices are read live from the snapshot; no add-time price is kept.
    ///
    /// # Errors
    ///
    /// `UnknownVariant` if a line's variant has left the catalog;
    /// `SubtotalOverflow` if the total exceeds the money representation.
    pub fn subtotal(&self, catalog: &CatalogSnapshot) -> Result<Money> {
        let mut total = Money::ZERO;
        for line in &self.lines {
            let variant = catalog
                .variant(line.product_id, line.variant_id)
                .ok_or(StorefrontError::UnknownVariant {
                    product: line.product_id,
                    variant: line.variant_id,
                })?;
            let line_total = variant
                .price
                .checked_mul(line.quantity)
                .ok_or(StorefrontError::SubtotalOverflow)?;
            total = total
                .checked_add(line_total)
                .ok_or(StorefrontError::SubtotalOverflow)?;
        }
        Ok(total)
    }

    /// Ordered line view for external persistence.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
        }
    }

    /// Rebuild a cart from a persisted snapshot, re-validating every line.
    ///
    /// Duplicate (product, variant) pairs in the stored data are merged the
    /// same way repeated adds would be.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` or `UnknownVariant` per line, as in [`Self::add_item`].
    pub fn restore(snapshot: CartSnapshot, catalog: &CatalogSnapshot) -> Result<Self> {
        let mut cart = Self::new();
        for line in snapshot.lines {
            cart.add_item(catalog, line.product_id, line.variant_id, line.quantity)?;
        }
        Ok(cart)
    }

    fn line_mut(&mut self, product_id: ProductId, variant_id: VariantId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id == product_id && l.variant_id == variant_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
