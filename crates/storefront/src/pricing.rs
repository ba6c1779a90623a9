//! Display predicates derived from catalog prices.
//!
//! Pure functions over variants and products; the UI uses them to decide
//! which badges to show on a card.

use crate::catalog::{Product, ProductVariant};

/// Whether the variant is on sale: compare-at present and strictly above price.
#[must_use]
pub fn has_discount(variant: &ProductVariant) -> bool {
    variant
        .compare_at_price
        .is_some_and(|compare_at| compare_at > variant.price)
}

/// Percentage off, rounded to the nearest integer.
///
/// Defined only while [`has_discount`] holds; returns `None` otherwise.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn discount_percentage(variant: &ProductVariant) -> Option<u32> {
    if !has_discount(variant) {
        return None;
    }
    let compare_at = variant.compare_at_price?.cents();
    let price = variant.price.cents();
    // compare_at > price >= 0, so the divisor is never zero
    let percent = ((compare_at - price) as f64 / compare_at as f64 * 100.0).round();
    Some(percent as u32)
}

/// Whether the product is merchandised as featured.
#[must_use]
pub const fn is_featured(product: &Product) -> bool {
    product.featured
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pawmart_core::{Money, VariantId};

    use super::*;

    fn variant(price: i64, compare_at: Option<i64>) -> ProductVariant {
        ProductVariant {
            id: VariantId::new(1),
            selected_options: BTreeMap::new(),
            price: Money::from_cents(price),
            compare_at_price: compare_at.map(Money::from_cents),
            stock: None,
        }
    }

    #[test]
    fn test_has_discount() {
        assert!(has_discount(&variant(1500, Some(2000))));
        assert!(!has_discount(&variant(1500, Some(1500))));
        assert!(!has_discount(&variant(1500, Some(1000))));
        assert!(!has_discount(&variant(1500, None)));
    }

    #[test]
    fn test_discount_percentage_quarter_off() {
        // 2000 -> 1500 is 25% off
        assert_eq!(discount_percentage(&variant(1500, Some(2000))), Some(25));
    }

    #[test]
    fn test_discount_percentage_rounds_to_nearest() {
        // 2999 -> 1999 is 33.34%, rounds to 33
        assert_eq!(discount_percentage(&variant(1999, Some(2999))), Some(33));
        // 300 -> 200 is 33.33..%, rounds to 33
        assert_eq!(discount_percentage(&variant(200, Some(300))), Some(33));
        // 1000 -> 125 is 87.5%, rounds to 88
        assert_eq!(discount_percentage(&variant(125, Some(1000))), Some(88));
    }

    #[test]
    fn test_discount_percentage_undefined_without_discount() {
        assert_eq!(discount_percentage(&variant(1500, None)), None);
        assert_eq!(discount_percentage(&variant(1500, Some(1500))), None);
    }
}
