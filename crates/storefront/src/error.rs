//! Unified error handling for the commerce engine.
//!
//! Every operation that can fail returns `Result<T, StorefrontError>` and
//! leaves all engine state unchanged on the error path. Nothing in this
//! crate is fatal to the process; callers surface the failure to the UI and
//! carry on.

use pawmart_core::{ProductId, VariantId};
use thiserror::Error;

/// Engine-level error type for the storefront.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorefrontError {
    /// Quantity was zero or negative where a positive quantity is required.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Referenced variant is not in the current catalog snapshot.
    #[error("Unknown variant {variant} for product {product}")]
    UnknownVariant {
        product: ProductId,
        variant: VariantId,
    },

    /// Referenced product is not in the current catalog snapshot.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Add-to-cart attempted before every option was resolved to a variant.
    #[error("Selection is incomplete")]
    IncompleteSelection,

    /// Option name is not declared by the selected product.
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// Value is not declared for the given option.
    #[error("Unknown value {value:?} for option {option:?}")]
    UnknownValue { option: String, value: String },

    /// Value exists but no purchasable variant is reachable through it.
    #[error("Value {value:?} for option {option:?} is unavailable")]
    ValueUnavailable { option: String, value: String },

    /// Cart line for the given (product, variant) pair does not exist.
    #[error("No cart line for variant {variant} of product {product}")]
    LineNotFound {
        product: ProductId,
        variant: VariantId,
    },

    /// Line totals overflowed the money representation.
    #[error("Cart subtotal overflowed")]
    SubtotalOverflow,
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
