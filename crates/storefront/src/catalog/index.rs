//! Variant lookup and option availability index.
//!
//! Built once per product when a catalog snapshot is assembled. Answers the
//! two questions the product card keeps asking: "which variant does this
//! complete selection resolve to" and "is this option value still reachable
//! given what is already chosen".

use std::collections::{BTreeMap, HashMap};

use pawmart_core::VariantId;

use super::types::Product;

/// One indexed variant: its full option mapping plus a precomputed stock flag.
#[derive(Debug, Clone)]
struct IndexEntry {
    id: VariantId,
    mapping: BTreeMap<String, String>,
    in_stock: bool,
}

/// Per-product lookup from option-value combinations to variants.
#[derive(Debug, Clone)]
pub struct VariantIndex {
    /// Option names in the product's declaration order.
    option_names: Vec<String>,
    /// Full combination (values in declaration order) -> variant.
    by_combination: HashMap<Vec<String>, VariantId>,
    entries: Vec<IndexEntry>,
}

impl VariantIndex {
    /// Build the index for a validated product.
    ///
    /// Variants that do not cover every option are skipped; snapshot
    /// validation rejects such catalogs before an index is ever built.
    #[must_use]
    pub fn build(product: &Product) -> Self {
        let option_names: Vec<String> = product.options.iter().map(|o| o.name.clone()).collect();

        let entries: Vec<IndexEntry> = product
            .variants
            .iter()
            .map(|v| IndexEntry {
                id: v.id,
                mapping: v.selected_options.clone(),
                in_stock: v.in_stock(),
            })
            .collect();

        let by_combination = entries
            .iter()
            .filter_map(|entry| {
                let key: Option<Vec<String>> = option_names
                    .iter()
                    .map(|name| entry.mapping.get(name).cloned())
                    .collect();
                key.map(|k| (k, entry.id))
            })
            .collect();

        Self {
            option_names,
            by_combination,
            entries,
        }
    }

    /// Number of options a selection must cover to be complete.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.option_names.len()
    }

    /// Resolve a selection to its unique variant.
    ///
    /// Returns `None` unless the selection covers every option and the exact
    /// combination exists. A partial selection never resolves - returning the
    /// first loosely-matching variant would silently pick an arbitrary one.
    #[must_use]
    pub fn match_variant(&self, selection: &BTreeMap<String, String>) -> Option<VariantId> {
        if selection.len() != self.option_names.len() {
            return None;
        }
        let key: Vec<String> = self
            .option_names
            .iter()
            .map(|name| selection.get(name).cloned())
            .collect::<Option<Vec<String>>>()?;
        self.by_combination.get(&key).copied()
    }

    /// Whether choosing `value` for `option` can still lead to a purchasable
    /// variant, given the options already chosen in `selection`.
    ///
    /// The check agrees with `selection` on every option *except* `option`
    /// itself, so re-picking a different value on an already-chosen axis is
    /// evaluated against the remaining constraints only. A variant with zero
    /// tracked stock does not count; untracked stock does.
    #[must_use]
    pub fn is_value_available(
        &self,
        option: &str,
        value: &str,
        selection: &BTreeMap<String, String>,
    ) -> bool {
        self.entries.iter().any(|entry| {
            entry.in_stock
                && entry.mapping.get(option).is_some_and(|v| v == value)
                && selection
                    .iter()
                    .filter(|(name, _)| name.as_str() != option)
                    .all(|(name, chosen)| entry.mapping.get(name).is_some_and(|v| v == chosen))
        })
    }
}

#[cfg(test)]
mod tests {
    use pawmart_core::{Money, ProductId};

    use super::*;
    use crate::catalog::types::{ProductOption, ProductVariant};

    fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn cat_bed() -> Product {
        Product {
            id: ProductId::new(1),
            handle: "cat-bed".to_string(),
            title: "Cat Bed".to_string(),
            description: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
            featured: false,
            options: vec![
                ProductOption {
                    name: "Size".to_string(),
                    values: vec!["S".to_string(), "M".to_string()],
                },
                ProductOption {
                    name: "Color".to_string(),
                    values: vec!["Gray".to_string(), "Blue".to_string()],
                },
            ],
            variants: vec![
                ProductVariant {
                    id: VariantId::new(11),
                    selected_options: mapping(&[("Size", "S"), ("Color", "Gray")]),
                    price: Money::from_cents(1000),
                    compare_at_price: None,
                    stock: Some(0),
                },
                ProductVariant {
                    id: VariantId::new(12),
                    selected_options: mapping(&[("Size", "M"), ("Color", "Gray")]),
                    price: Money::from_cents(1200),
                    compare_at_price: None,
                    stock: Some(5),
                },
                ProductVariant {
                    id: VariantId::new(13),
                    selected_options: mapping(&[("Size", "M"), ("Color", "Blue")]),
                    price: Money::from_cents(1200),
                    compare_at_price: None,
                    stock: None,
                },
            ],
        }
    }

    #[test]
    fn test_match_requires_complete_selection() {
        let index = VariantIndex::build(&cat_bed());
        assert_eq!(index.match_variant(&mapping(&[("Size", "M")])), None);
        assert_eq!(
            index.match_variant(&mapping(&[("Size", "M"), ("Color", "Gray")])),
            Some(VariantId::new(12))
        );
    }

    #[test]
    fn test_match_nonexistent_combination() {
        let index = VariantIndex::build(&cat_bed());
        // S/Blue was never produced
        assert_eq!(
            index.match_variant(&mapping(&[("Size", "S"), ("Color", "Blue")])),
            None
        );
    }

    #[test]
    fn test_availability_respects_stock() {
        let index = VariantIndex::build(&cat_bed());
        let none_chosen = BTreeMap::new();
        // S only exists in Gray with zero stock
        assert!(!index.is_value_available("Size", "S", &none_chosen));
        assert!(index.is_value_available("Size", "M", &none_chosen));
    }

    #[test]
    fn test_availability_untracked_stock_counts() {
        let index = VariantIndex::build(&cat_bed());
        let chosen = mapping(&[("Size", "M")]);
        // M/Blue has untracked stock
        assert!(index.is_value_available("Color", "Blue", &chosen));
    }

    #[test]
    fn test_availability_excludes_own_option() {
        let index = VariantIndex::build(&cat_bed());
        // With Gray already chosen, switching Color to Blue is judged against
        // the remaining constraints (Size), not the prior Color choice.
        let chosen = mapping(&[("Size", "M"), ("Color", "Gray")]);
        assert!(index.is_value_available("Color", "Blue", &chosen));
    }

    #[test]
    fn test_availability_constrained_by_other_choices() {
        let index = VariantIndex::build(&cat_bed());
        let chosen = mapping(&[("Color", "Blue")]);
        // Only M exists in Blue
        assert!(!index.is_value_available("Size", "S", &chosen));
        assert!(index.is_value_available("Size", "M", &chosen));
    }

    #[test]
    fn test_availability_unknown_option_or_value() {
        let index = VariantIndex::build(&cat_bed());
        let none_chosen = BTreeMap::new();
        assert!(!index.is_value_available("Material", "Wool", &none_chosen));
        assert!(!index.is_value_available("Size", "XL", &none_chosen));
    }

    #[test]
    fn test_single_variant_no_options() {
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
                stock: Some(10),
            }],
        };
        let index = VariantIndex::build(&product);
        // Empty selection is implicitly complete for a zero-option product
        assert_eq!(
            index.match_variant(&BTreeMap::new()),
            Some(VariantId::new(21))
        );
    }
}
