//! Validated, read-only catalog snapshots.
//!
//! A snapshot is built once from provider data and never mutated; refreshes
//! arrive as whole new snapshots. Building validates the catalog invariants
//! (declared option values, full option coverage, unique combinations,
//! non-negative prices and stock) so every later lookup can trust the data.

use std::collections::{HashMap, HashSet};

use pawmart_core::{CollectionId, ProductId, VariantId};
use thiserror::Error;

use super::index::VariantIndex;
use super::types::{Collection, Product, ProductVariant};

/// Catalog validation errors surfaced when building a snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate product id {0}")]
    DuplicateProduct(ProductId),

    #[error("Duplicate option {option:?} on product {product}")]
    DuplicateOption { product: ProductId, option: String },

    #[error("Duplicate variant id {variant} on product {product}")]
    DuplicateVariant {
        product: ProductId,
        variant: VariantId,
    },

    #[error("Variant {variant} of product {product} uses undeclared option {option:?}")]
    UndeclaredOption {
        product: ProductId,
        variant: VariantId,
        option: String,
    },

    #[error("Variant {variant} of product {product} uses undeclared value {value:?} for option {option:?}")]
    UndeclaredOptionValue {
        product: ProductId,
        variant: VariantId,
        option: String,
        value: String,
    },

    #[error("Variant {variant} of product {product} does not choose a value for option {option:?}")]
    OptionNotCovered {
        product: ProductId,
        variant: VariantId,
        option: String,
    },

    #[error("Variant {variant} of product {product} repeats another variant's combination")]
    DuplicateCombination {
        product: ProductId,
        variant: VariantId,
    },

    #[error("Variant {variant} of product {product} has a negative price")]
    NegativePrice {
        product: ProductId,
        variant: VariantId,
    },

    #[error("Variant {variant} of product {product} has negative stock")]
    NegativeStock {
        product: ProductId,
        variant: VariantId,
    },

    #[error("Duplicate collection id {0}")]
    DuplicateCollection(CollectionId),

    #[error("Collection {collection} references unknown product {product}")]
    UnknownCollectionProduct {
        collection: CollectionId,
        product: ProductId,
    },
}

/// Read-only catalog snapshot with per-product variant indexes.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Products in provider display order.
    products: Vec<Product>,
    by_product: HashMap<ProductId, usize>,
    indexes: HashMap<ProductId, VariantIndex>,
    /// Collections in provider display order.
    collections: Vec<Collection>,
    by_collection: HashMap<CollectionId, usize>,
}

impl CatalogSnapshot {
    /// Validate provider data and build the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` encountered; a snapshot is only ever
    /// built from a fully consistent catalog.
    pub fn new(
        products: Vec<Product>,
        collections: Vec<Collection>,
    ) -> Result<Self, CatalogError> {
        let mut by_product = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            validate_product(product)?;
            if by_product.insert(product.id, pos).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        let mut by_collection = HashMap::with_capacity(collections.len());
        for (pos, collection) in collections.iter().enumerate() {
            if by_collection.insert(collection.id, pos).is_some() {
                return Err(CatalogError::DuplicateCollection(collection.id));
            }
            for product_id in &collection.product_ids {
                if !by_product.contains_key(product_id) {
                    return Err(CatalogError::UnknownCollectionProduct {
                        collection: collection.id,
                        product: *product_id,
                    });
                }
            }
        }

        let indexes = products
            .iter()
            .map(|p| (p.id, VariantIndex::build(p)))
            .collect();

        Ok(Self {
            products,
            by_product,
            indexes,
            collections,
            by_collection,
        })
    }

    /// Build an empty snapshot (catalog not yet loaded).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            by_product: HashMap::new(),
            indexes: HashMap::new(),
            collections: Vec::new(),
            by_collection: HashMap::new(),
        }
    }

    /// All products in display order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.by_product.get(&id).and_then(|&pos| self.products.get(pos))
    }

    /// Look up a variant by (product, variant) pair.
    #[must_use]
    pub fn variant(&self, product: ProductId, variant: VariantId) -> Option<&ProductVariant> {
        self.product(product)
            .and_then(|p| p.variants.iter().find(|v| v.id == variant))
    }

    /// Variant index for a product.
    #[must_use]
    pub fn index(&self, product: ProductId) -> Option<&VariantIndex> {
        self.indexes.get(&product)
    }

    /// All collections in display order.
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter()
    }

    /// Look up a collection by id.
    #[must_use]
    pub fn collection(&self, id: CollectionId) -> Option<&Collection> {
        self.by_collection
            .get(&id)
            .and_then(|&pos| self.collections.get(pos))
    }

    /// Member products of a collection, in the collection's order.
    #[must_use]
    pub fn collection_products(&self, id: CollectionId) -> Option<Vec<&Product>> {
        let collection = self.collection(id)?;
        // Membership was validated at build time
        Some(
            collection
                .product_ids
                .iter()
                .filter_map(|&pid| self.product(pid))
                .collect(),
        )
    }

    /// Products flagged as featured, in display order.
    #[must_use]
    pub fn featured_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Case-insensitive substring search over title and description.
    ///
    /// A blank term matches everything, mirroring an empty search box.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Check one product's internal invariants.
fn validate_product(product: &Product) -> Result<(), CatalogError> {
    let mut option_names = HashSet::new();
    for option in &product.options {
        if !option_names.insert(option.name.as_str()) {
            return Err(CatalogError::DuplicateOption {
                product: product.id,
                option: option.name.clone(),
            });
        }
    }

    let mut variant_ids = HashSet::new();
    let mut combinations = HashSet::new();
    for variant in &product.variants {
        if !variant_ids.insert(variant.id) {
            return Err(CatalogError::DuplicateVariant {
                product: product.id,
                variant: variant.id,
            });
        }
        if variant.price.is_negative()
            || variant.compare_at_price.is_some_and(|p| p.is_negative())
        {
            return Err(CatalogError::NegativePrice {
                product: product.id,
                variant: variant.id,
            });
        }
        if variant.stock.is_some_and(|s| s < 0) {
            return Err(CatalogError::NegativeStock {
                product: product.id,
                variant: variant.id,
            });
        }

        for (option, value) in &variant.selected_options {
            let Some(declared) = product.option(option) else {
                return Err(CatalogError::UndeclaredOption {
                    product: product.id,
                    variant: variant.id,
                    option: option.clone(),
                });
            };
            if !declared.values.contains(value) {
                return Err(CatalogError::UndeclaredOptionValue {
                    product: product.id,
                    variant: variant.id,
                    option: option.clone(),
                    value: value.clone(),
                });
            }
        }
        for option in &product.options {
            if !variant.selected_options.contains_key(&option.name) {
                return Err(CatalogError::OptionNotCovered {
                    product: product.id,
                    variant: variant.id,
                    option: option.name.clone(),
                });
            }
        }

        if !combinations.insert(variant.selected_options.clone()) {
            return Err(CatalogError::DuplicateCombination {
                product: product.id,
                variant: variant.id,
            });
        }
    }

    Ok(())
}
