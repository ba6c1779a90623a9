//! The engine handle the presentation layer holds.
//!
//! `StorefrontState` ties together the display config, the current catalog
//! snapshot, and the session cart. Templates and components receive it as a
//! passed-in handle and drive it through the [`StorefrontLogic`] trait - no
//! global singleton, no logic hidden in render closures.

use pawmart_core::{Money, ProductId, VariantId};
use tracing::instrument;

use crate::cart::{Cart, CartSnapshot};
use crate::catalog::CatalogSnapshot;
use crate::config::DisplayConfig;
use crate::error::{Result, StorefrontError};
use crate::selection::{ProductSelection, SelectionStatus};
use crate::views::{self, CartView, ProductCardView};

/// The operations the presentation layer is allowed to drive.
///
/// Implemented by [`StorefrontState`]; components depend on the trait so
/// tests can substitute a scripted implementation.
pub trait StorefrontLogic {
    /// Add a variant to the cart, merging into an existing line.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` or `UnknownVariant`; cart unchanged on error.
    fn add_item(&mut self, product: ProductId, variant: VariantId, quantity: i64) -> Result<()>;

    /// Set a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` or `LineNotFound`; cart unchanged on error.
    fn update_quantity(
        &mut self,
        product: ProductId,
        variant: VariantId,
        quantity: i64,
    ) -> Result<()>;

    /// Remove a line if present (no-op otherwise).
    fn remove_item(&mut self, product: ProductId, variant: VariantId);

    /// Sum of line quantities across the cart.
    fn total_items(&self) -> i64;

    /// Sum of quantity x current catalog price over all lines.
    ///
    /// # Errors
    ///
    /// `UnknownVariant` or `SubtotalOverflow`.
    fn subtotal(&self) -> Result<Money>;
}

/// Session-scoped engine state.
#[derive(Debug, Clone)]
pub struct StorefrontState {
    config: DisplayConfig,
    catalog: CatalogSnapshot,
    cart: Cart,
}

impl StorefrontState {
    /// Create a fresh session against a catalog snapshot.
    #[must_use]
    pub fn new(config: DisplayConfig, catalog: CatalogSnapshot) -> Self {
        Self {
            config,
            catalog,
            cart: Cart::new(),
        }
    }

    /// Display configuration.
    #[must_use]
    pub const fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Current catalog snapshot.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// The session cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Start a selection for a product card.
    ///
    /// # Errors
    ///
    /// `UnknownProduct` if the product is not in the snapshot.
    pub fn selection(&self, product: ProductId) -> Result<ProductSelection> {
        ProductSelection::new(&self.catalog, product)
    }

    /// Add the variant a completed selection resolved to.
    ///
    /// # Errors
    ///
    /// `IncompleteSelection` unless the selection is `Complete`; otherwise
    /// as [`StorefrontLogic::add_item`].
    #[instrument(skip(self, selection))]
    pub fn add_selection(&mut self, selection: &ProductSelection, quantity: i64) -> Result<()> {
        if selection.status() != SelectionStatus::Complete {
            return Err(StorefrontError::IncompleteSelection);
        }
        let variant = selection
            .matched_variant()
            .ok_or(StorefrontError::IncompleteSelection)?;
        self.cart
            .add_item(&self.catalog, selection.product_id(), variant, quantity)
    }

    /// Replace the catalog with a refreshed snapshot.
    ///
    /// The cart keeps its lines; totals and views follow the new prices.
    #[instrument(skip(self, catalog))]
    pub fn swap_catalog(&mut self, catalog: CatalogSnapshot) {
        self.catalog = catalog;
    }

    /// Restore a persisted cart, replacing the current one.
    ///
    /// # Errors
    ///
    /// As [`Cart::restore`]; the current cart is kept on error.
    pub fn restore_cart(&mut self, snapshot: CartSnapshot) -> Result<()> {
        self.cart = Cart::restore(snapshot, &self.catalog)?;
        Ok(())
    }

    /// Clear the cart after a completed checkout.
    #[instrument(skip(self))]
    pub fn complete_checkout(&mut self) {
        self.cart.clear();
    }

    /// Cart projection for templates.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::build(&self.cart, &self.catalog, &self.config)
    }

    /// Product card projection for a selection.
    #[must_use]
    pub fn product_card(&self, selection: &ProductSelection) -> Option<ProductCardView> {
        ProductCardView::build(selection, &self.catalog, &self.config)
    }

    /// Header badge label for the current item total.
    #[must_use]
    pub fn badge_label(&self) -> String {
        views::badge_label(self.cart.total_items(), &self.config)
    }
}

impl StorefrontLogic for StorefrontState {
    #[instrument(skip(self))]
    fn add_item(&mut self, product: ProductId, variant: VariantId, quantity: i64) -> Result<()> {
        self.cart.add_item(&self.catalog, product, variant, quantity)
    }

    #[instrument(skip(self))]
    fn update_quantity(
        &mut self,
        product: ProductId,
        variant: VariantId,
        quantity: i64,
    ) -> Result<()> {
        self.cart.update_quantity(product, variant, quantity)
    }

    #[instrument(skip(self))]
    fn remove_item(&mut self, product: ProductId, variant: VariantId) {
        self.cart.remove_item(product, variant);
    }

    fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    fn subtotal(&self) -> Result<Money> {
        self.cart.subtotal(&self.catalog)
    }
}
