//! Integration tests for Pawmart.
//!
//! Scenario tests drive the whole engine - catalog snapshot, selection,
//! cart, views - against a shared JSON catalog fixture, the same shape a
//! real catalog provider would deliver.
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart aggregation scenarios and totals
//! - `selection_flow` - Option selection and availability scenarios
//! - `random_ops` - Randomized cart operation sequences

#![cfg_attr(not(test), forbid(unsafe_code))]

use pawmart_storefront::catalog::{CatalogSnapshot, Collection, Product};
use serde::Deserialize;

/// On-disk shape of the catalog fixture.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<Product>,
    #[serde(default)]
    collections: Vec<Collection>,
}

/// Load the shared pet-supplies catalog fixture.
///
/// # Panics
///
/// Panics if the fixture is malformed; that is a bug in the fixture, not a
/// condition tests should tolerate.
#[must_use]
pub fn load_catalog() -> CatalogSnapshot {
    let raw = include_str!("../fixtures/catalog.json");
    let fixture: CatalogFixture =
        serde_json::from_str(raw).expect("fixture parses as catalog data");
    CatalogSnapshot::new(fixture.products, fixture.collections)
        .expect("fixture satisfies catalog invariants")
}
